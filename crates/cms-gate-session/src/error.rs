//! # Design
//!
//! - "Not authenticated" is a value (`Ok(None)`), never an error.
//! - Errors are reserved for the handshake timeout, an unmounted session, and storage I/O.
//! - Messages stay constant; context travels in fields.

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Result alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Result alias for token storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Session-level error type.
#[derive(Debug, Error)]
pub enum SessionError {
    /// `authenticate()` ran before the session provider was mounted.
    #[error("auth context not initialized")]
    ContextNotInitialized,
    /// No user was established before the handshake deadline.
    #[error("authentication timeout")]
    AuthenticationTimeout {
        /// How long the handshake waited.
        waited: Duration,
    },
    /// Reading or writing the persisted token failed.
    #[error("session storage operation failed")]
    Storage {
        /// Operation identifier.
        operation: &'static str,
        /// Source storage error.
        source: StorageError,
    },
}

impl SessionError {
    pub(crate) const fn storage(operation: &'static str, source: StorageError) -> Self {
        Self::Storage { operation, source }
    }
}

/// Failures raised by token storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem access failed.
    #[error("storage io failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
    /// The backing document could not be parsed or rendered.
    #[error("storage document invalid")]
    Document {
        /// Path of the document.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Browser storage rejected the operation.
    #[error("browser storage unavailable")]
    Browser {
        /// Operation identifier.
        operation: &'static str,
        /// Error detail reported by the browser.
        detail: String,
    },
}
