//! Mapping hot-reload subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     MappingStore::open(path)
//!     → loader.rs (stat, read, parse)
//!     → first Snapshot published (serving may begin)
//!
//! Every refresh interval (refresher.rs):
//!     stat source file
//!     → mtime strictly newer than snapshot.modified?
//!     → loader.rs loads new Document
//!     → atomic swap of Arc<Snapshot>
//!     → readers observe new Document on their next load
//! ```
//!
//! # Design Decisions
//! - A Snapshot is immutable; a reload replaces it whole
//! - Readers never take a lock, they clone an Arc out of an ArcSwap
//! - A failed reload keeps the previous Snapshot published
//! - The refresh loop owns a shutdown receiver and exposes a single
//!   `tick` so it can be driven without wall-clock sleeps

pub mod loader;
pub mod refresher;
pub mod store;

pub use loader::LoadError;
pub use refresher::{Refresher, TickOutcome};
pub use store::{MappingStore, Snapshot};
