//! YAML-backed path redirect service library.

pub mod config;
pub mod document;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod reload;

pub use config::schema::ServiceConfig;
pub use document::{resolve, Document, LookupError, Path};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use reload::{MappingStore, Refresher};
