//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! reload and http subsystems produce:
//!     → tracing events inside the span handed to them at construction
//!     → metrics.rs (counters, gauges, histograms)
//!
//! Consumers:
//!     → logging.rs subscriber (JSON or pretty, stderr)
//!     → Prometheus scrape endpoint (when enabled)
//! ```
//!
//! # Design Decisions
//! - Lookup error kinds are visible here and nowhere in HTTP responses
//! - Request ID flows through the per-request trace span

pub mod logging;
pub mod metrics;
