//! Frontend authentication provider contract and its implementations.
//!
//! The CMS host drives the admin surface through this trait only. Alternate strategies
//! (OAuth, SSO) are sibling implementations.

mod basic;
mod local;

pub use basic::BasicAuthFrontendProvider;
pub use local::LocalFrontendProvider;

use async_trait::async_trait;
use cms_gate_core::{IdToken, SessionUser};

use crate::context::SessionProvider;
use crate::error::SessionResult;

/// Capability set the CMS host requires from a client-side auth provider.
#[async_trait]
pub trait FrontendAuthProvider: Send + Sync {
    /// Resolve once a user is established, offering the login UI if needed.
    ///
    /// # Errors
    ///
    /// Fails when the session provider was never mounted or when no user appears before
    /// the handshake deadline.
    async fn authenticate(&self) -> SessionResult<SessionUser>;

    /// Current user according to persisted state.
    ///
    /// # Errors
    ///
    /// Fails only when storage cannot be read.
    async fn get_user(&self) -> SessionResult<Option<SessionUser>>;

    /// Token to attach to outbound CMS API calls.
    ///
    /// # Errors
    ///
    /// Fails only when storage cannot be read.
    async fn get_token(&self) -> SessionResult<Option<IdToken>>;

    /// End the current session. Calling it while logged out is a no-op.
    ///
    /// # Errors
    ///
    /// Fails only when storage cannot be written.
    async fn logout(&self) -> SessionResult<()>;

    /// Wrapper the host mounts around the admin UI tree.
    fn session_provider(&self) -> SessionProvider;
}
