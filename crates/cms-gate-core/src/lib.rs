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

//! Shared Basic Auth primitives for the CMS gate.
//!
//! Layout: `token.rs` (credential pair and `Basic` token codec), `user.rs` (session user
//! and outbound token payloads), `error.rs` (`TokenError`).

pub mod error;
pub mod token;
pub mod user;

pub use error::{TokenError, TokenResult};
pub use token::{BASIC_SCHEME_PREFIX, BasicToken, Credentials};
pub use user::{IdToken, SessionUser};
