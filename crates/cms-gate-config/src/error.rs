//! Error types for configuration loading.

use thiserror::Error;

/// Result alias for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Primary error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Bind address value was invalid.
    #[error("invalid bind address")]
    InvalidBindAddr {
        /// Bind address payload provided by the caller.
        value: String,
        /// Source address parse error.
        source: std::net::AddrParseError,
    },
    /// Upstream URL value was invalid.
    #[error("invalid upstream url")]
    InvalidUpstreamUrl {
        /// URL payload provided by the caller.
        value: String,
        /// Source URL parse error.
        source: url::ParseError,
    },
    /// Upstream URL used a scheme other than http/https.
    #[error("unsupported upstream url scheme")]
    UnsupportedUpstreamScheme {
        /// Scheme found in the URL.
        scheme: String,
    },
    /// Boolean toggle had an unrecognised value.
    #[error("invalid boolean toggle")]
    InvalidToggle {
        /// Variable name that failed to parse.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}
