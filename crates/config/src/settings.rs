//! Runtime settings for the inspection tools

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{dump, env, logging, paths};
use crate::ConfigError;

/// Main settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Logging configuration
    #[serde(default)]
    pub observability: ObservabilityConfig,

    /// Tree input configuration
    #[serde(default)]
    pub input: InputSettings,

    /// Diagnostic dump configuration
    #[serde(default)]
    pub dump: DumpSettings,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Enable JSON logging
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_level() -> String {
    logging::DEFAULT_LEVEL.to_string()
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_json: false,
        }
    }
}

/// Where the parameter tree comes from when not given on the command line
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct InputSettings {
    #[serde(default)]
    pub tree_path: Option<String>,
}

/// Tables rendered when no target is requested explicitly
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DumpSettings {
    #[serde(default = "default_dump_targets")]
    pub targets: Vec<String>,
}

fn default_dump_targets() -> Vec<String> {
    vec![dump::DEFAULT_TARGET.to_string()]
}

impl Default for DumpSettings {
    fn default() -> Self {
        Self {
            targets: default_dump_targets(),
        }
    }
}

impl Settings {
    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.observability.log_level.to_lowercase();
        if !logging::LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "observability.log_level".to_string(),
                message: format!(
                    "Unknown level '{}', expected one of {}",
                    self.observability.log_level,
                    logging::LEVELS.join(", ")
                ),
            });
        }

        if self.dump.targets.iter().any(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "dump.targets".to_string(),
                message: "Dump targets must not be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// Load settings from files and environment
///
/// Priority: env vars > config/{env} > config/default > defaults
pub fn load_settings(environment: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name(paths::DEFAULT_SETTINGS).required(false));

    if let Some(env_name) = environment {
        builder = builder.add_source(
            File::with_name(&format!("{}/{}", paths::SETTINGS_DIR, env_name)).required(false),
        );
    }

    builder = builder.add_source(
        Environment::with_prefix(env::PREFIX)
            .separator(env::SEPARATOR)
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    tracing::debug!(
        environment = environment.unwrap_or("default"),
        log_level = %settings.observability.log_level,
        "Settings loaded"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.observability.log_level, "info");
        assert!(!settings.observability.log_json);
        assert!(settings.input.tree_path.is_none());
        assert_eq!(settings.dump.targets, vec!["Triggers"]);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_settings_validation() {
        let mut settings = Settings::default();
        settings.observability.log_level = "loud".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));

        settings.observability.log_level = "DEBUG".to_string();
        assert!(settings.validate().is_ok());

        settings.dump.targets.push(" ".to_string());
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_partial_deserialize_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "observability": { "log_json": true } }"#).unwrap();
        assert!(settings.observability.log_json);
        assert_eq!(settings.observability.log_level, "info");
        assert_eq!(settings.dump.targets, vec!["Triggers"]);
    }

    #[test]
    fn test_load_without_files_uses_defaults() {
        let settings = load_settings(Some("no-such-environment")).unwrap();
        assert!(settings.validate().is_ok());
    }
}
