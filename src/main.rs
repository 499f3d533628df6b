//! Load generator service.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────┐
//!                     │                    LOADGEN                       │
//!   GET /entrypoint   │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!   ──────────────────┼─▶│  http   │───▶│   job    │───▶│   worker    │  │
//!                     │  │ server  │    │  intake  │    │  registry   │  │
//!                     │  └─────────┘    └──────────┘    └──────┬──────┘  │
//!                     │                                        │ spawn   │
//!                     │                                        ▼         │
//!                     │                                 ┌─────────────┐  │     Target
//!                     │                                 │   worker    │──┼──── (redis or
//!                     │                                 │  + probe    │  │      HTTP)
//!                     │                                 └─────────────┘  │
//!                     │                                                  │
//!                     │  config · observability · lifecycle              │
//!                     └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use loadgen::config::{load_config, LoadgenConfig};
use loadgen::lifecycle::startup;
use loadgen::observability::init_logging;

#[derive(Parser)]
#[command(name = "loadgen")]
#[command(about = "Probe deployed workloads at a memory-derived rate", long_about = None)]
struct Args {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => LoadgenConfig::default(),
    };

    init_logging(&config.observability)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = ?args.config,
        bind_address = %config.listener.bind_address,
        tick_millis = config.worker.tick_millis,
        idle_secs = config.worker.idle_secs,
        "loadgen starting"
    );

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
