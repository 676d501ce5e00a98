//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration for the redirect service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Mapping file and refresh policy.
    pub mapping: MappingConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Mapping file configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MappingConfig {
    /// Path to the YAML mapping file.
    pub path: PathBuf,

    /// Seconds between modification time checks.
    pub refresh_interval_secs: u64,
}

impl Default for MappingConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("mapping.yaml"),
            refresh_interval_secs: 5,
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeoutConfig {
    /// Request timeout in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Json,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// The flat layout used by older deployments:
///
/// ```yaml
/// host: 0.0.0.0
/// port: 8080
/// map_file: mapping.yaml
/// refresh_interval: 5
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LegacyConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    pub map_file: PathBuf,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_refresh_interval() -> u64 {
    5
}

impl From<LegacyConfig> for ServiceConfig {
    fn from(legacy: LegacyConfig) -> Self {
        Self {
            listener: ListenerConfig {
                bind_address: format!("{}:{}", legacy.host, legacy.port),
            },
            mapping: MappingConfig {
                path: legacy.map_file,
                refresh_interval_secs: legacy.refresh_interval,
            },
            ..Self::default()
        }
    }
}

/// Top-level keys that only appear in the flat layout.
pub(crate) const LEGACY_KEYS: [&str; 4] = ["host", "port", "map_file", "refresh_interval"];

/// A file using any flat-layout key is read as [`LegacyConfig`].
pub(crate) fn is_legacy_layout<'a>(mut keys: impl Iterator<Item = &'a str>) -> bool {
    keys.any(|key| LEGACY_KEYS.contains(&key))
}
