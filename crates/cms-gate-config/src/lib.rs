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

//! Environment-backed configuration for the CMS gate.
//!
//! Layout: `env.rs` (environment snapshot), `model.rs` (typed configuration and
//! credential resolution), `defaults.rs` (variable names and fallbacks), `error.rs`.

pub mod defaults;
pub mod env;
pub mod error;
pub mod model;

pub use env::Environment;
pub use error::{ConfigError, ConfigResult};
pub use model::{BasicAuthConfig, GateConfig, ProviderMode, ResolvedCredentials, RuntimeMode};
