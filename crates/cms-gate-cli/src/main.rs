//! Thin entrypoint for the CMS gate admin CLI.

use std::process;

#[tokio::main]
async fn main() {
    let exit_code = cms_gate_cli::run().await;
    process::exit(exit_code);
}
