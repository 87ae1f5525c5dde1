//! # Design
//!
//! - One crate-level error for server bootstrap and serve failures.
//! - Messages are constant; context lives in structured fields.
//! - Sources are preserved for diagnostics.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::net::SocketAddr;

/// Result alias for API server operations.
pub type ApiServerResult<T> = std::result::Result<T, ApiServerError>;

/// Errors raised while building or serving the gate.
#[derive(Debug)]
pub enum ApiServerError {
    /// The upstream HTTP client could not be constructed.
    HttpClient {
        /// Underlying client error.
        source: reqwest::Error,
    },
    /// Binding the listener failed.
    Bind {
        /// Address attempted.
        addr: SocketAddr,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Serving failed.
    Serve {
        /// Underlying IO error.
        source: std::io::Error,
    },
}

impl Display for ApiServerError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpClient { .. } => formatter.write_str("failed to build upstream http client"),
            Self::Bind { .. } => formatter.write_str("failed to bind gate listener"),
            Self::Serve { .. } => formatter.write_str("gate server terminated unexpectedly"),
        }
    }
}

impl Error for ApiServerError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::HttpClient { source } => Some(source),
            Self::Bind { source, .. } | Self::Serve { source } => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::io;

    use super::ApiServerError;

    #[test]
    fn display_is_constant_and_source_is_kept() {
        let err = ApiServerError::Bind {
            addr: "127.0.0.1:3000".parse().expect("addr"),
            source: io::Error::new(io::ErrorKind::AddrInUse, "in use"),
        };
        assert_eq!(err.to_string(), "failed to bind gate listener");
        assert_eq!(err.source().map(ToString::to_string).as_deref(), Some("in use"));

        let err = ApiServerError::Serve {
            source: io::Error::other("reset"),
        };
        assert_eq!(err.to_string(), "gate server terminated unexpectedly");
        assert!(err.source().is_some());
    }
}
