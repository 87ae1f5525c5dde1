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

//! Telemetry primitives shared across the CMS gate workspace.
//!
//! Logging setup, the build identifier, and the process-wide context span.

pub mod context;
pub mod error;
pub mod init;

pub use context::{GlobalContextGuard, record_provider_mode};
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LogOutput, LoggingConfig, build_sha, init_logging};
