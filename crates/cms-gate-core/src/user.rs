//! Session-facing payloads exchanged with the CMS host.

use serde::{Deserialize, Serialize};

use crate::token::BasicToken;

/// Authenticated admin user as reported to the CMS host.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    /// Username decoded from the active token.
    pub username: String,
}

impl SessionUser {
    /// Build a session user for `username`.
    #[must_use]
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}

/// Token wrapper attached to outbound CMS API calls.
///
/// The host expects the field to be named `id_token`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdToken {
    /// Raw `Authorization` header value.
    pub id_token: String,
}

impl From<BasicToken> for IdToken {
    fn from(token: BasicToken) -> Self {
        Self {
            id_token: token.into_inner(),
        }
    }
}
