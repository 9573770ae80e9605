//! # Storefront Entry Point
//!
//! ```text
//! stdin ──► storefront_cli::run() ──► stdout (page)
//!                                 └─► stderr (logs)
//! ```
//!
//! Everything happens on one current-thread runtime: the storefront is a
//! single-user, event-driven UI and never needs parallelism.

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Setup lives in lib.rs so the event loop can be tested
    storefront_cli::run().await
}
