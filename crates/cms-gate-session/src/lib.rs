#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls
)]
#![warn(missing_docs, unreachable_pub)]

//! Client-side session management for the CMS admin surface.
//!
//! Layout:
//! - `storage/`: durable token slot backends (memory, file, browser `localStorage`)
//! - `state.rs`: the session cell and its transitions
//! - `context.rs`: the mounted session context shared by the UI and the handshake
//! - `handshake.rs`: poll task driving `authenticate()`
//! - `login.rs`: login form contract
//! - `provider/`: frontend provider trait with Basic and Local implementations

pub mod context;
pub mod error;
pub mod handshake;
pub mod login;
pub mod provider;
pub mod state;
pub mod storage;

pub use cms_gate_core::{IdToken, SessionUser};
pub use context::{SessionContext, SessionProvider};
pub use error::{SessionError, SessionResult, StorageError, StorageResult};
pub use handshake::{AuthenticatePolicy, DEFAULT_AUTH_TIMEOUT, DEFAULT_POLL_INTERVAL};
pub use login::{LOGIN_FAILED_MESSAGE, LoginForm, MISSING_FIELDS_MESSAGE};
pub use provider::{BasicAuthFrontendProvider, FrontendAuthProvider, LocalFrontendProvider};
pub use state::SessionState;
#[cfg(feature = "browser")]
pub use storage::BrowserStorage;
pub use storage::{AUTH_STORAGE_KEY, FileStorage, MemoryStorage, TokenStorage};
