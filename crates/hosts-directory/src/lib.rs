//! hosts-directory library crate
//!
//! Exposes the server modules so integration tests can drive the router
//! in-process, plus the [`run`] entry point used by the binary.

pub mod server;

use anyhow::Result;

/// Main entry point for hosts-directory.
///
/// Parses command line arguments, loads configuration and serves until shutdown.
pub async fn run() -> Result<()> {
    server::run().await
}
