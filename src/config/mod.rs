//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (YAML/TOML, structured or legacy flat layout)
//!     → loader.rs (parse & deserialize, LOG_LEVEL override)
//!     → validation.rs (semantic checks)
//!     → ServiceConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Service config is read once at startup; only the mapping file reloads
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ServiceConfig;
pub use schema::ListenerConfig;
pub use schema::MappingConfig;
pub use schema::ObservabilityConfig;
