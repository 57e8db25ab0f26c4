use anyhow::Result;
use tracing::info;

use sable_uci::UciEngine;

fn main() -> Result<()> {
    // Stdout carries the protocol; logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    info!("sable starting");
    UciEngine::new().run()?;
    info!("sable shutting down");
    Ok(())
}
