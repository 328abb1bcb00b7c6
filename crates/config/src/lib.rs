//! Parameter tree loading and runtime settings
//!
//! Supports loading parameter trees from:
//! - YAML files (`.yaml`, `.yml`)
//! - TOML files (`.toml`)
//! - JSON files (anything else)
//!
//! Runtime settings are layered:
//! - `config/default` file
//! - `config/{env}` file
//! - Environment variables (`HLT_CONFIG__` prefix)

pub mod constants;
pub mod settings;
pub mod tree;

pub use settings::{load_settings, DumpSettings, InputSettings, ObservabilityConfig, Settings};
pub use tree::{Param, ParamTree};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_crate_errors_map_to_parse_error() {
        let err = config::Config::builder()
            .add_source(config::File::with_name("config/absent-environment"))
            .build()
            .unwrap_err();
        let err = ConfigError::from(err);
        assert!(matches!(err, ConfigError::ParseError(_)));
        assert!(err.to_string().starts_with("Failed to parse configuration: "));
    }
}
