//! Mounted session context and the provider wrapper the host mounts around the admin UI.
//!
//! # Design
//! - Mounting restores the session from storage and publishes the context to the frontend
//!   provider, so the UI and `authenticate()` share one cell.
//! - The context is a cheap handle; clones observe the same state.

use std::sync::{Arc, PoisonError, RwLock};

use cms_gate_core::{Credentials, SessionUser};
use tokio::sync::watch;

use crate::error::SessionResult;
use crate::state::{SessionCell, SessionState};
use crate::storage::TokenStorage;

/// Handle exposing the current session (`user`, `login`, `logout`) to UI code.
#[derive(Clone)]
pub struct SessionContext {
    cell: Arc<SessionCell>,
}

impl SessionContext {
    fn restore(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            cell: Arc::new(SessionCell::restore(storage)),
        }
    }

    /// Current user, if authenticated.
    #[must_use]
    pub fn user(&self) -> Option<SessionUser> {
        self.cell.snapshot().user().cloned()
    }

    /// Current session state.
    #[must_use]
    pub fn state(&self) -> SessionState {
        self.cell.snapshot()
    }

    /// Subscribe to session state transitions.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.cell.subscribe()
    }

    /// Encode and persist `username`/`password`, then mark the session authenticated and
    /// close the login prompt.
    ///
    /// # Errors
    ///
    /// Returns an error when the token cannot be persisted.
    pub fn login(&self, username: &str, password: &str) -> SessionResult<SessionUser> {
        self.cell.login(&Credentials::new(username, password))
    }

    /// Clear the persisted token and the in-memory user. Calling it again is a no-op.
    ///
    /// # Errors
    ///
    /// Returns an error when the persisted token cannot be removed.
    pub fn logout(&self) -> SessionResult<()> {
        self.cell.logout()
    }

    /// Whether the login prompt should currently be shown.
    #[must_use]
    pub fn login_prompt_visible(&self) -> bool {
        !self.cell.snapshot().is_authenticated() && self.cell.login_prompt_visible()
    }

    /// Subscribe to login prompt visibility changes.
    #[must_use]
    pub fn subscribe_login_prompt(&self) -> watch::Receiver<bool> {
        self.cell.subscribe_login_prompt()
    }

    pub(crate) fn offer_login(&self) {
        self.cell.set_login_prompt(true);
    }

    pub(crate) fn withdraw_login(&self) {
        self.cell.set_login_prompt(false);
    }

    pub(crate) fn adopt(&self, user: &SessionUser) {
        self.cell.adopt(user);
    }

    pub(crate) fn invalidate(&self) {
        self.cell.invalidate();
    }
}

/// Slot through which a mounted context is published to its frontend provider.
#[derive(Default)]
pub(crate) struct ContextSlot {
    current: RwLock<Option<SessionContext>>,
}

impl ContextSlot {
    pub(crate) fn current(&self) -> Option<SessionContext> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn publish(&self, context: SessionContext) {
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(context);
    }
}

/// Wrapper the host mounts around the admin UI tree.
#[derive(Clone)]
pub struct SessionProvider {
    storage: Arc<dyn TokenStorage>,
    slot: Option<Arc<ContextSlot>>,
}

impl SessionProvider {
    pub(crate) fn bound(storage: Arc<dyn TokenStorage>, slot: Arc<ContextSlot>) -> Self {
        Self {
            storage,
            slot: Some(slot),
        }
    }

    /// Provider whose contexts are not consulted by any frontend provider.
    #[must_use]
    pub fn detached(storage: Arc<dyn TokenStorage>) -> Self {
        Self {
            storage,
            slot: None,
        }
    }

    /// Restore the session from storage and publish the resulting context.
    ///
    /// Mounting again replaces the published context.
    #[must_use]
    pub fn mount(&self) -> SessionContext {
        let context = SessionContext::restore(Arc::clone(&self.storage));
        if let Some(slot) = &self.slot {
            slot.publish(context.clone());
        }
        context
    }
}
