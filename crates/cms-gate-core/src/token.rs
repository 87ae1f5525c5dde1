//! Credential pair and the `Basic` token codec shared by both providers.
//!
//! # Design
//! - The token is exactly the `Authorization` header value: `Basic base64(user:pass)`.
//! - Decoding splits on the first colon, so a username containing `:` is mis-parsed.
//!   That limitation is kept as-is; changing it would alter how existing tokens resolve.
//! - Base64 padding is optional on decode to accept tokens produced by lenient encoders.

use std::fmt;

use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};

use crate::error::{TokenError, TokenResult};

/// Scheme prefix (including the separating space) of a Basic Auth header value.
pub const BASIC_SCHEME_PREFIX: &str = "Basic ";

const CREDENTIAL_DELIMITER: char = ':';

const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Username/password pair carried by a `Basic` token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Username value.
    pub username: String,
    /// Password value.
    pub password: String,
}

impl Credentials {
    /// Build a credential pair.
    #[must_use]
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Encode the pair into a `Basic` token.
    #[must_use]
    pub fn encode(&self) -> BasicToken {
        let payload = TOKEN_ENGINE.encode(format!(
            "{}{CREDENTIAL_DELIMITER}{}",
            self.username, self.password
        ));
        BasicToken(format!("{BASIC_SCHEME_PREFIX}{payload}"))
    }

    /// Decode the base64 payload that follows the scheme prefix.
    ///
    /// # Errors
    ///
    /// Returns an error when the payload is not base64, not UTF-8, or lacks the
    /// `username:password` delimiter.
    pub fn decode_payload(payload: &str) -> TokenResult<Self> {
        let bytes = TOKEN_ENGINE
            .decode(payload.trim())
            .map_err(|source| TokenError::InvalidBase64 { source })?;
        let text = String::from_utf8(bytes).map_err(|source| TokenError::InvalidUtf8 { source })?;
        let (username, password) = text
            .split_once(CREDENTIAL_DELIMITER)
            .ok_or(TokenError::MissingDelimiter)?;
        Ok(Self::new(username, password))
    }

    /// Whether this pair matches `other` exactly (case-sensitive, both fields).
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.username == other.username && self.password == other.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Encoded `Basic` token, usable verbatim as an `Authorization` header value.
#[derive(Clone, PartialEq, Eq)]
pub struct BasicToken(String);

impl BasicToken {
    /// Wrap a raw token string (for example one read back from storage) without validating it.
    #[must_use]
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Decode the token back into its credential pair.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::MissingScheme`] when the `Basic ` prefix is absent, or any
    /// payload error from [`Credentials::decode_payload`].
    pub fn decode(&self) -> TokenResult<Credentials> {
        let payload = self
            .0
            .strip_prefix(BASIC_SCHEME_PREFIX)
            .ok_or(TokenError::MissingScheme)?;
        Credentials::decode_payload(payload)
    }

    /// Borrow the raw token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token and return the raw text.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for BasicToken {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("BasicToken(<redacted>)")
    }
}

impl From<&Credentials> for BasicToken {
    fn from(credentials: &Credentials) -> Self {
        credentials.encode()
    }
}
