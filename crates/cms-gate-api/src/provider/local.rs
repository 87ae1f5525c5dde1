use async_trait::async_trait;
use axum::http::HeaderMap;

use super::BackendAuthProvider;

/// Provider for local development: every request is authorized.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalBackendAuthProvider;

#[async_trait]
impl BackendAuthProvider for LocalBackendAuthProvider {
    async fn is_authorized(&self, _headers: &HeaderMap) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
