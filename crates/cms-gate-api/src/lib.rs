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

//! Backend side of the CMS gate: request validators and the HTTP surface that enforces them.
//!
//! Layout:
//! - `provider/`: backend provider trait with Basic and Local validators
//! - `http/`: auth middleware, problem errors, router, health, upstream forwarding
//! - `state.rs`: shared router state
//! - `models.rs`: response payloads
//! - `error.rs`: server bootstrap errors

pub mod error;
pub mod http;
pub mod models;
pub mod provider;
pub(crate) mod state;

pub use error::{ApiServerError, ApiServerResult};
pub use http::router::ApiServer;
pub use models::{HealthResponse, ProblemDetails, SessionResponse};
pub use provider::{
    BackendAuthProvider, BasicAuthBackendProvider, LocalBackendAuthProvider, backend_provider_for,
};
