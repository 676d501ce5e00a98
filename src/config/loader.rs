//! Configuration loading from disk.

use std::env;
use std::fs;
use std::path::Path;

use crate::config::schema::{is_legacy_layout, LegacyConfig, ServiceConfig};
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `observability.log_level`.
pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Yaml(serde_yaml::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Toml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Yaml(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 { write!(f, ", ")?; }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Load and validate configuration from a TOML or YAML file.
///
/// Files ending in `.toml` are read as TOML, anything else as YAML.
/// `LOG_LEVEL` from the environment replaces the configured log level.
pub fn load_config(path: &Path) -> Result<ServiceConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let is_toml = path.extension().is_some_and(|ext| ext == "toml");

    let mut config = parse_config(&content, is_toml)?;
    apply_log_level_override(&mut config, env::var(LOG_LEVEL_ENV).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_config(content: &str, is_toml: bool) -> Result<ServiceConfig, ConfigError> {
    if is_toml {
        let table: toml::Table = toml::from_str(content).map_err(ConfigError::Toml)?;
        let legacy = is_legacy_layout(table.keys().map(String::as_str));
        let value = toml::Value::Table(table);
        if legacy {
            value.try_into::<LegacyConfig>().map(Into::into)
        } else {
            value.try_into()
        }
        .map_err(ConfigError::Toml)
    } else {
        let value: serde_yaml::Value = serde_yaml::from_str(content).map_err(ConfigError::Yaml)?;
        let legacy = value
            .as_mapping()
            .is_some_and(|m| is_legacy_layout(m.keys().filter_map(serde_yaml::Value::as_str)));
        if legacy {
            serde_yaml::from_value::<LegacyConfig>(value).map(Into::into)
        } else {
            serde_yaml::from_value(value)
        }
        .map_err(ConfigError::Yaml)
    }
}

fn apply_log_level_override(config: &mut ServiceConfig, level: Option<String>) {
    if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
        config.observability.log_level = level.trim().to_lowercase();
    }
}
