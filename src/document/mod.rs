//! Document model and path resolution subsystem.
//!
//! # Data Flow
//! ```text
//! YAML text
//!     → node.rs (serde_yaml::Value → Document)
//!     → Document (immutable tree of Mapping / Sequence / Scalar / Literal)
//!
//! Request path "/team/docs/1"
//!     → path.rs (strip one leading and one trailing '/', split)
//!     → resolver.rs (walk the tree one segment at a time)
//!     → Scalar string, or LookupError
//! ```
//!
//! # Design Decisions
//! - Segment kind decides the dispatch: all-digit segments index sequences,
//!   everything else is a mapping key
//! - A mapping key made only of digits can therefore never be reached
//! - Resolution is pure: no I/O, no state, no allocation on the success path

pub mod error;
pub mod node;
pub mod path;
pub mod resolver;

pub use error::{LookupError, ParseError};
pub use node::{Document, NodeKind};
pub use path::{Path, Segment};
pub use resolver::resolve;
