use std::sync::Arc;

use async_trait::async_trait;
use cms_gate_core::{BasicToken, IdToken, SessionUser};
use tracing::{debug, info, warn};

use super::FrontendAuthProvider;
use crate::context::{ContextSlot, SessionContext, SessionProvider};
use crate::error::{SessionError, SessionResult};
use crate::handshake::{AuthenticatePolicy, PollEvent, SessionPoll};
use crate::state::load_user;
use crate::storage::{AUTH_STORAGE_KEY, TokenStorage};

/// Basic Auth provider holding its token in durable client storage.
pub struct BasicAuthFrontendProvider {
    storage: Arc<dyn TokenStorage>,
    slot: Arc<ContextSlot>,
    policy: AuthenticatePolicy,
}

impl BasicAuthFrontendProvider {
    /// Provider backed by `storage` with the default handshake timing.
    #[must_use]
    pub fn new(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            storage,
            slot: Arc::new(ContextSlot::default()),
            policy: AuthenticatePolicy::default(),
        }
    }

    /// Override the handshake timing.
    #[must_use]
    pub const fn with_policy(mut self, policy: AuthenticatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Handshake timing in effect.
    #[must_use]
    pub const fn policy(&self) -> AuthenticatePolicy {
        self.policy
    }

    /// Context published by the most recent mount, if any.
    #[must_use]
    pub fn context(&self) -> Option<SessionContext> {
        self.slot.current()
    }

    /// `get_user` for the poll loop: storage failures are logged and treated as "no user yet".
    fn poll_user(&self, context: &SessionContext) -> Option<SessionUser> {
        match self.resolve_user(Some(context)) {
            Ok(user) => user,
            Err(err) => {
                warn!(error = %err, "session check failed during authentication");
                None
            }
        }
    }

    /// Read storage and bring the mounted context in line with what it holds.
    fn resolve_user(&self, context: Option<&SessionContext>) -> SessionResult<Option<SessionUser>> {
        let user = load_user(self.storage.as_ref())?;
        if let Some(context) = context {
            match &user {
                Some(user) => context.adopt(user),
                None => context.invalidate(),
            }
        }
        Ok(user)
    }
}

#[async_trait]
impl FrontendAuthProvider for BasicAuthFrontendProvider {
    async fn authenticate(&self) -> SessionResult<SessionUser> {
        let context = self.context().ok_or(SessionError::ContextNotInitialized)?;

        if let Some(user) = self.poll_user(&context) {
            context.withdraw_login();
            debug!(username = %user.username, "persisted session accepted");
            return Ok(user);
        }

        context.offer_login();
        info!(
            timeout_secs = self.policy.timeout.as_secs(),
            "waiting for admin login"
        );

        let mut poll = SessionPoll::start(self.policy);
        loop {
            match poll.next().await {
                PollEvent::Tick => {
                    if let Some(user) = self.poll_user(&context) {
                        context.withdraw_login();
                        info!(username = %user.username, "authentication completed");
                        return Ok(user);
                    }
                }
                PollEvent::Expired => {
                    context.withdraw_login();
                    warn!(
                        timeout_secs = self.policy.timeout.as_secs(),
                        "authentication timed out"
                    );
                    return Err(SessionError::AuthenticationTimeout {
                        waited: self.policy.timeout,
                    });
                }
            }
        }
    }

    async fn get_user(&self) -> SessionResult<Option<SessionUser>> {
        let context = self.context();
        self.resolve_user(context.as_ref())
    }

    async fn get_token(&self) -> SessionResult<Option<IdToken>> {
        let token = self
            .storage
            .get(AUTH_STORAGE_KEY)
            .map_err(|err| SessionError::storage("session.read_token", err))?;
        Ok(token.map(|raw| IdToken::from(BasicToken::from_raw(raw))))
    }

    async fn logout(&self) -> SessionResult<()> {
        match self.context() {
            Some(context) => context.logout(),
            None => self
                .storage
                .remove(AUTH_STORAGE_KEY)
                .map_err(|err| SessionError::storage("session.remove_token", err)),
        }
    }

    fn session_provider(&self) -> SessionProvider {
        SessionProvider::bound(Arc::clone(&self.storage), Arc::clone(&self.slot))
    }
}
