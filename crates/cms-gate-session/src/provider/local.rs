use std::sync::Arc;

use async_trait::async_trait;
use cms_gate_core::{IdToken, SessionUser};

use super::FrontendAuthProvider;
use crate::context::SessionProvider;
use crate::error::SessionResult;
use crate::storage::MemoryStorage;

/// Username reported by the local provider.
const LOCAL_USERNAME: &str = "local";

/// Provider for local development: always authenticated, never prompts.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalFrontendProvider;

#[async_trait]
impl FrontendAuthProvider for LocalFrontendProvider {
    async fn authenticate(&self) -> SessionResult<SessionUser> {
        Ok(SessionUser::new(LOCAL_USERNAME))
    }

    async fn get_user(&self) -> SessionResult<Option<SessionUser>> {
        Ok(Some(SessionUser::new(LOCAL_USERNAME)))
    }

    async fn get_token(&self) -> SessionResult<Option<IdToken>> {
        Ok(Some(IdToken {
            id_token: String::new(),
        }))
    }

    async fn logout(&self) -> SessionResult<()> {
        Ok(())
    }

    fn session_provider(&self) -> SessionProvider {
        SessionProvider::detached(Arc::new(MemoryStorage::default()))
    }
}
