//! Login form contract: collect username and password, validate, submit.
//!
//! Rendering is left to the host; this type carries the form's state and rules so it can
//! be driven from a terminal, a web view, or tests alike.

use std::fmt;

use cms_gate_core::SessionUser;
use tracing::warn;

use crate::context::SessionContext;

/// Inline error shown when a field is left empty.
pub const MISSING_FIELDS_MESSAGE: &str = "Please enter both username and password";
/// Inline error shown when the session rejects the submission.
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed";

/// State of the login form.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    username: String,
    password: String,
    error: Option<&'static str>,
}

impl LoginForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the username field.
    pub fn set_username(&mut self, value: impl Into<String>) {
        self.username = value.into();
    }

    /// Replace the password field.
    pub fn set_password(&mut self, value: impl Into<String>) {
        self.password = value.into();
    }

    /// Current username field.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Inline error to display, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&'static str> {
        self.error
    }

    /// Validate and submit the form to `context`.
    ///
    /// Empty fields set [`MISSING_FIELDS_MESSAGE`] without touching the session. A failed
    /// login sets [`LOGIN_FAILED_MESSAGE`]. On success the password field is cleared.
    pub fn submit(&mut self, context: &SessionContext) -> Option<SessionUser> {
        if self.username.is_empty() || self.password.is_empty() {
            self.error = Some(MISSING_FIELDS_MESSAGE);
            return None;
        }
        match context.login(&self.username, &self.password) {
            Ok(user) => {
                self.error = None;
                self.password.clear();
                Some(user)
            }
            Err(err) => {
                warn!(error = %err, "login submission failed");
                self.error = Some(LOGIN_FAILED_MESSAGE);
                None
            }
        }
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("error", &self.error)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use cms_gate_core::SessionUser;

    use super::{LOGIN_FAILED_MESSAGE, LoginForm, MISSING_FIELDS_MESSAGE};
    use crate::context::SessionProvider;
    use crate::error::{StorageError, StorageResult};
    use crate::storage::{MemoryStorage, TokenStorage};

    struct ReadOnlyStorage;

    impl TokenStorage for ReadOnlyStorage {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Browser {
                operation: "set",
                detail: "quota exceeded".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn empty_fields_are_rejected_without_login() {
        let context = SessionProvider::detached(Arc::new(MemoryStorage::default())).mount();
        let mut form = LoginForm::new();
        form.set_username("alice");
        assert_eq!(form.submit(&context), None);
        assert_eq!(form.error(), Some(MISSING_FIELDS_MESSAGE));
        assert_eq!(context.user(), None);

        let mut form = LoginForm::new();
        form.set_password("secret");
        assert_eq!(form.submit(&context), None);
        assert_eq!(form.error(), Some(MISSING_FIELDS_MESSAGE));
    }

    #[test]
    fn successful_submit_clears_error_and_password() {
        let context = SessionProvider::detached(Arc::new(MemoryStorage::default())).mount();
        let mut form = LoginForm::new();
        form.submit(&context);
        form.set_username("alice");
        form.set_password("secret");
        assert_eq!(form.submit(&context), Some(SessionUser::new("alice")));
        assert_eq!(form.error(), None);
        assert_eq!(form.username(), "alice");
        assert!(!format!("{form:?}").contains("secret"));
        assert_eq!(context.user(), Some(SessionUser::new("alice")));
    }

    #[test]
    fn storage_failure_reports_login_failed() {
        let context = SessionProvider::detached(Arc::new(ReadOnlyStorage)).mount();
        let mut form = LoginForm::new();
        form.set_username("alice");
        form.set_password("secret");
        assert_eq!(form.submit(&context), None);
        assert_eq!(form.error(), Some(LOGIN_FAILED_MESSAGE));
        assert_eq!(context.user(), None);
    }
}
