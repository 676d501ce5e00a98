//! yamlink: redirect service driven by a hot-reloaded YAML mapping.
//!
//! # Architecture Overview
//!
//! ```text
//!                         ┌──────────────────────────────────────────────┐
//!                         │                   YAMLINK                    │
//!                         │                                              │
//!     GET /team/docs/1    │  ┌─────────┐    ┌──────────┐    ┌─────────┐  │
//!     ────────────────────┼─▶│  http   │───▶│ document │───▶│ Scalar  │  │
//!                         │  │ handler │    │ resolver │    │ "https…"│  │
//!                         │  └────┬────┘    └──────────┘    └────┬────┘  │
//!     302 Location        │       │ current()                    │       │
//!     ◀───────────────────┼───────┼──────────────────────────────┘       │
//!                         │       ▼                                      │
//!                         │  ┌─────────────────────┐                     │
//!                         │  │ reload::MappingStore│◀── atomic swap ─┐   │
//!                         │  │  ArcSwap<Snapshot>  │                 │   │
//!                         │  └─────────────────────┘                 │   │
//!                         │                          ┌─────────────┐ │   │
//!     mapping.yaml ───────┼─────── stat / read ─────▶│  Refresher  │─┘   │
//!                         │                          │ (interval)  │     │
//!                         │                          └─────────────┘     │
//!                         └──────────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use yamlink::config::load_config;
use yamlink::lifecycle::startup;
use yamlink::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "yamlink")]
#[command(about = "Redirect service backed by a hot-reloaded YAML mapping", long_about = None)]
struct Cli {
    /// Service configuration file (YAML, or TOML with a .toml extension).
    #[arg(short, long, env = "CONFIG_FILE")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;

    init_logging(&config.observability);

    tracing::info!("yamlink v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        mapping = %config.mapping.path.display(),
        refresh_interval_secs = config.mapping.refresh_interval_secs,
        "Configuration loaded"
    );

    if let Err(e) = startup::run(config).await {
        tracing::error!(error = %e, "Service failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
