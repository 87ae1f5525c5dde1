//! Session cell and its transitions.
//!
//! # Design
//! - One owned cell per mounted session; every mutation goes through a named transition.
//! - `Unauthenticated -> Authenticated` on restore or login, back on logout or a corrupt
//!   restore. There is no pending state: a token is either persisted and decodable, or absent.
//! - Observers subscribe through a `watch` channel instead of re-reading storage.

use std::sync::Arc;

use cms_gate_core::{BasicToken, Credentials, SessionUser};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::{SessionError, SessionResult};
use crate::storage::{AUTH_STORAGE_KEY, TokenStorage};

/// Client-side session state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No usable token is persisted.
    #[default]
    Unauthenticated,
    /// A decodable token is persisted for this user.
    Authenticated(SessionUser),
}

impl SessionState {
    /// User of an authenticated session.
    #[must_use]
    pub const fn user(&self) -> Option<&SessionUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            Self::Unauthenticated => None,
        }
    }

    /// Whether the session carries a user.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Read the persisted token and resolve it to a user.
///
/// A token that fails to decode is purged so later reads do not fail the same way.
pub(crate) fn load_user(storage: &dyn TokenStorage) -> SessionResult<Option<SessionUser>> {
    let Some(raw) = storage
        .get(AUTH_STORAGE_KEY)
        .map_err(|err| SessionError::storage("session.read_token", err))?
    else {
        return Ok(None);
    };

    match BasicToken::from_raw(raw).decode() {
        Ok(credentials) => Ok(Some(SessionUser::new(credentials.username))),
        Err(err) => {
            warn!(error = %err, "purging undecodable session token");
            storage
                .remove(AUTH_STORAGE_KEY)
                .map_err(|err| SessionError::storage("session.purge_token", err))?;
            Ok(None)
        }
    }
}

/// Owned session cell shared by a mounted context.
pub(crate) struct SessionCell {
    storage: Arc<dyn TokenStorage>,
    state: watch::Sender<SessionState>,
    login_prompt: watch::Sender<bool>,
}

impl SessionCell {
    /// Build a cell restored from whatever token is currently persisted.
    pub(crate) fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        let initial = match load_user(storage.as_ref()) {
            Ok(Some(user)) => {
                debug!(username = %user.username, "restored persisted session");
                SessionState::Authenticated(user)
            }
            Ok(None) => SessionState::Unauthenticated,
            Err(err) => {
                warn!(error = %err, "failed to restore persisted session");
                SessionState::Unauthenticated
            }
        };
        Self {
            storage,
            state: watch::Sender::new(initial),
            login_prompt: watch::Sender::new(false),
        }
    }

    pub(crate) fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Persist `credentials` and move to `Authenticated`, closing the login prompt.
    pub(crate) fn login(&self, credentials: &Credentials) -> SessionResult<SessionUser> {
        let token = credentials.encode();
        self.storage
            .set(AUTH_STORAGE_KEY, token.as_str())
            .map_err(|err| SessionError::storage("session.persist_token", err))?;
        let user = SessionUser::new(credentials.username.clone());
        self.state
            .send_replace(SessionState::Authenticated(user.clone()));
        self.login_prompt.send_replace(false);
        info!(username = %user.username, "admin session established");
        Ok(user)
    }

    /// Remove the persisted token and move to `Unauthenticated`. Idempotent.
    pub(crate) fn logout(&self) -> SessionResult<()> {
        self.storage
            .remove(AUTH_STORAGE_KEY)
            .map_err(|err| SessionError::storage("session.remove_token", err))?;
        let previous = self.state.send_replace(SessionState::Unauthenticated);
        if let SessionState::Authenticated(user) = previous {
            info!(username = %user.username, "admin session closed");
        }
        Ok(())
    }

    /// Take over a user whose token reached storage without going through [`Self::login`]
    /// (another tab or process). Notifies only when the state actually changes.
    pub(crate) fn adopt(&self, user: &SessionUser) {
        let adopted = self.state.send_if_modified(|state| {
            if state.user() == Some(user) {
                false
            } else {
                *state = SessionState::Authenticated(user.clone());
                true
            }
        });
        if adopted {
            debug!(username = %user.username, "adopted externally persisted session");
        }
    }

    /// Drop the in-memory user after the persisted token was found to be unusable.
    pub(crate) fn invalidate(&self) {
        self.state.send_if_modified(|state| {
            if state.is_authenticated() {
                *state = SessionState::Unauthenticated;
                true
            } else {
                false
            }
        });
    }

    pub(crate) fn set_login_prompt(&self, visible: bool) {
        self.login_prompt.send_if_modified(|current| {
            let changed = *current != visible;
            *current = visible;
            changed
        });
    }

    pub(crate) fn login_prompt_visible(&self) -> bool {
        *self.login_prompt.borrow()
    }

    pub(crate) fn subscribe_login_prompt(&self) -> watch::Receiver<bool> {
        self.login_prompt.subscribe()
    }
}
