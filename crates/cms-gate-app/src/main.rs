#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Binary entrypoint for the CMS gate server.

use cms_gate_app::{AppResult, run_app};

/// Boots the gate and blocks until the server stops.
#[tokio::main]
async fn main() -> AppResult<()> {
    run_app().await
}
