//! Centralized defaults for settings and tree loading

/// Settings file locations
pub mod paths {
    /// Base settings file (extension resolved by the `config` crate)
    pub const DEFAULT_SETTINGS: &str = "config/default";

    /// Directory holding per-environment settings files
    pub const SETTINGS_DIR: &str = "config";
}

/// Environment variable conventions
pub mod env {
    /// Prefix for settings overrides, e.g. `HLT_CONFIG__OBSERVABILITY__LOG_LEVEL`
    pub const PREFIX: &str = "HLT_CONFIG";

    pub const SEPARATOR: &str = "__";

    /// Selects the `config/{env}` settings layer
    pub const ENVIRONMENT: &str = "HLT_CONFIG_ENV";
}

/// Logging defaults
pub mod logging {
    pub const DEFAULT_LEVEL: &str = "info";

    pub const LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
}

/// Dump defaults
pub mod dump {
    pub const DEFAULT_TARGET: &str = "Triggers";
}
