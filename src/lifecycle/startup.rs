//! Startup orchestration.
//!
//! # Order
//! 1. Metrics recorder (optional)
//! 2. Initial mapping load; any error here is fatal
//! 3. Refresh loop task
//! 4. Listener bind, then serve until a termination signal
//!
//! Traffic is only accepted once a mapping is published.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::metrics;
use crate::reload::{LoadError, MappingStore, Refresher};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("initial mapping load failed: {0}")]
    Load(#[from] LoadError),

    #[error("failed to bind {address}: {source}")]
    Bind { address: String, source: io::Error },

    #[error("failed to install metrics exporter: {0}")]
    Metrics(#[from] BuildError),

    #[error("server error: {0}")]
    Serve(io::Error),
}

/// Start every subsystem and serve until shutdown.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let mapping_span = tracing::info_span!("mapping", source = %config.mapping.path.display());
    let store = Arc::new(MappingStore::open(&config.mapping.path, mapping_span)?);

    let shutdown = Arc::new(Shutdown::new());
    let refresher = Refresher::new(
        store.clone(),
        Duration::from_secs(config.mapping.refresh_interval_secs),
    )
    .spawn(shutdown.subscribe());

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    tokio::spawn({
        let shutdown = shutdown.clone();
        async move { signals::shutdown_on_signal(&shutdown).await }
    });

    let server = HttpServer::new(&config, store, tracing::info_span!("http"));
    let served = server.run(listener, shutdown.subscribe()).await;

    // The server may also stop on its own; make sure the refresh loop follows.
    shutdown.trigger();
    let _ = refresher.await;

    served.map_err(StartupError::Serve)
}
