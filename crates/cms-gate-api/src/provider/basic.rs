use async_trait::async_trait;
use axum::http::{HeaderMap, header::AUTHORIZATION};
use cms_gate_config::{BasicAuthConfig, Environment};
use cms_gate_core::{BasicToken, Credentials};
use tracing::{debug, warn};

use super::BackendAuthProvider;

/// Validates `Authorization: Basic` headers against one configured credential pair.
pub struct BasicAuthBackendProvider {
    expected: Credentials,
}

impl BasicAuthBackendProvider {
    /// Resolve the expected pair from `config`, then `env`, then the built-in fallback.
    ///
    /// Warns when a production runtime ends up with an empty password.
    #[must_use]
    pub fn new(config: &BasicAuthConfig, env: &Environment) -> Self {
        let resolved = config.resolve(env);
        if resolved.password_missing_in_production() {
            warn!(
                username = %resolved.credentials.username,
                "admin password is empty in production; set CMS_ADMIN_PASSWORD"
            );
        }
        Self::with_credentials(resolved.credentials)
    }

    /// Provider expecting exactly `expected`.
    #[must_use]
    pub const fn with_credentials(expected: Credentials) -> Self {
        Self { expected }
    }

    /// Username requests must present.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.expected.username
    }

    fn check(&self, headers: &HeaderMap) -> bool {
        let Some(value) = headers.get(AUTHORIZATION) else {
            debug!("request carries no authorization header");
            return false;
        };
        let Ok(value) = value.to_str() else {
            debug!("authorization header is not visible ascii");
            return false;
        };
        match BasicToken::from_raw(value).decode() {
            Ok(presented) => presented.matches(&self.expected),
            Err(err) => {
                debug!(error = %err, "rejected malformed basic credentials");
                false
            }
        }
    }
}

#[async_trait]
impl BackendAuthProvider for BasicAuthBackendProvider {
    async fn is_authorized(&self, headers: &HeaderMap) -> bool {
        self.check(headers)
    }

    fn name(&self) -> &'static str {
        "basic"
    }
}
