//! Binary entrypoint.
//!
//! This crate is split into Clean Architecture layers:
//! - domain: graph types and ports, no IO
//! - usecase: the graph algorithms and the analysis pipeline
//! - infrastructure: Tarjan detector, serde + async IO, schemas, events
//! - interface: CLI wiring

use anyhow::Result;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    scc_dagsp::interface::cli::run().await
}

fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .try_init();
}
