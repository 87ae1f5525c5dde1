//! Durable token slot backends.
//!
//! # Design
//! - The slot holds exactly one string: the `Basic` token.
//! - Backends are read on every access; nothing is cached, so edits made outside the
//!   session manager are observed on the next read.

mod file;
mod memory;
#[cfg(feature = "browser")]
mod browser;

#[cfg(feature = "browser")]
pub use browser::BrowserStorage;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::error::StorageResult;

/// Fixed key of the persisted token entry.
pub const AUTH_STORAGE_KEY: &str = "cms_basic_auth_token";

/// Key/value store holding the persisted session token.
pub trait TokenStorage: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be read.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend cannot be written.
    fn remove(&self, key: &str) -> StorageResult<()>;
}
