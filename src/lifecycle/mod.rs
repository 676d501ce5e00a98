//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Metrics → Initial mapping load → Refresh loop → Listener → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → broadcast → server drains, refresh loop exits
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Ordered startup: mapping first, listeners last
//! - A failed initial load is fatal; the service never serves without a mapping

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use startup::StartupError;
