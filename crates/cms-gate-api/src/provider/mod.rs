//! Backend authentication provider contract and its implementations.
//!
//! # Design
//! - The CMS host only asks one question per request: is it authorized? Providers answer
//!   with a plain boolean and never fail; decode problems are logged and mapped to `false`.
//! - Alternate strategies are sibling implementations of the same trait.

mod basic;
mod local;

use std::sync::Arc;

use async_trait::async_trait;
use axum::http::HeaderMap;
use cms_gate_config::{Environment, GateConfig, ProviderMode};

pub use basic::BasicAuthBackendProvider;
pub use local::LocalBackendAuthProvider;

/// Capability set the CMS host requires from a backend auth provider.
#[async_trait]
pub trait BackendAuthProvider: Send + Sync {
    /// Whether the request carrying `headers` may reach protected CMS routes.
    async fn is_authorized(&self, headers: &HeaderMap) -> bool;

    /// Short provider name for diagnostics.
    fn name(&self) -> &'static str;
}

/// Build the backend provider selected by `config`.
#[must_use]
pub fn backend_provider_for(config: &GateConfig, env: &Environment) -> Arc<dyn BackendAuthProvider> {
    match config.provider {
        ProviderMode::Basic => Arc::new(BasicAuthBackendProvider::new(&config.auth, env)),
        ProviderMode::Local => Arc::new(LocalBackendAuthProvider),
    }
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header::AUTHORIZATION};
    use cms_gate_config::{Environment, GateConfig};

    use super::backend_provider_for;

    #[tokio::test]
    async fn factory_follows_local_mode_toggle() {
        let env = Environment::from_pairs([("CMS_LOCAL_MODE", "true")]);
        let config = GateConfig::from_env(&env).expect("config");
        let provider = backend_provider_for(&config, &env);
        assert_eq!(provider.name(), "local");
        assert!(provider.is_authorized(&HeaderMap::new()).await);

        let env = Environment::from_pairs([("CMS_ADMIN_PASSWORD", "hunter2")]);
        let config = GateConfig::from_env(&env).expect("config");
        let provider = backend_provider_for(&config, &env);
        assert_eq!(provider.name(), "basic");
        assert!(!provider.is_authorized(&HeaderMap::new()).await);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_static("Basic YWRtaW46aHVudGVyMg=="),
        );
        assert!(provider.is_authorized(&headers).await);
    }
}
