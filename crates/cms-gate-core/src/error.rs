//! Error types for token encoding and decoding.

use std::string::FromUtf8Error;

use thiserror::Error;

/// Result alias for token operations.
pub type TokenResult<T> = Result<T, TokenError>;

/// Reasons a `Basic` token could not be decoded into credentials.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token did not start with the `Basic ` scheme prefix.
    #[error("token is missing the basic scheme prefix")]
    MissingScheme,
    /// Payload after the scheme prefix was not valid base64.
    #[error("token payload is not valid base64")]
    InvalidBase64 {
        /// Underlying base64 decode error.
        source: base64::DecodeError,
    },
    /// Decoded payload was not valid UTF-8 text.
    #[error("token payload is not valid utf-8")]
    InvalidUtf8 {
        /// Underlying UTF-8 conversion error.
        source: FromUtf8Error,
    },
    /// Decoded payload did not contain the `username:password` delimiter.
    #[error("token payload is missing the credential delimiter")]
    MissingDelimiter,
}
