//! Metrics collection and exposition.
//!
//! # Metrics
//! - `yamlink_lookups_total` (counter): lookups by outcome
//!   (`redirect`, `invalid_path`, `invalid_target` or a lookup error kind)
//! - `yamlink_lookup_duration_seconds` (histogram): resolution latency
//! - `yamlink_reloads_total` (counter): mapping loads by result
//!   (`ok`, `io`, `parse`)
//! - `yamlink_document_entries` (gauge): leaves in the published mapping
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_lookup(outcome: &'static str, start: Instant) {
    counter!("yamlink_lookups_total", "outcome" => outcome).increment(1);
    histogram!("yamlink_lookup_duration_seconds").record(start.elapsed().as_secs_f64());
}

pub fn record_reload(result: &'static str) {
    counter!("yamlink_reloads_total", "result" => result).increment(1);
}

pub fn record_document_entries(entries: usize) {
    gauge!("yamlink_document_entries").set(entries as f64);
}
