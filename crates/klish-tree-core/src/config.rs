// crates/klish-tree-core/src/config.rs - Configuration System
//
// CONFIGURATION HIERARCHY (highest to lowest priority):
// 1. Environment variables (KLISH_TREE_LOG, KLISH_TREE_MAX_RESULTS)
// 2. Config file passed by the caller (TOML)
// 3. Built-in defaults
//
// Every section and field has a default, so partial files are fine.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::render::RenderConfig;
use crate::search::SearchConfig;

/// Errors that can occur during configuration loading and validation
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Invalid TOML syntax in {file}: {error}")]
    ParseError { file: String, error: String },

    #[error("Invalid configuration value: {0}")]
    ValidationError(String),

    #[error("I/O error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

/// Complete configuration for tree queries
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KlishTreeConfig {
    /// Diagnostic logging
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Command search behaviour
    #[serde(default)]
    pub search: SearchConfig,

    /// Tree view layout
    #[serde(default)]
    pub render: RenderConfig,
}

/// Logging levels, globally and per module
///
/// Module keys are tracing targets such as `klish_tree_core::search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Level applied to everything without a module override
    #[serde(default = "default_log_level")]
    pub default: String,

    #[serde(default)]
    pub modules: HashMap<String, String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration: defaults, then the given file, then environment overrides.
    ///
    /// An explicitly named file that does not exist is an error. The merged
    /// result is validated before it is returned.
    pub fn load_config(config_path: Option<&Path>) -> ConfigResult<KlishTreeConfig> {
        let mut config = match config_path {
            Some(path) => Self::load_file(path)?,
            None => KlishTreeConfig::default(),
        };

        Self::apply_overrides(&mut config, |key| std::env::var(key).ok())?;
        Self::validate_config(&config)?;

        Ok(config)
    }

    /// Parse a single TOML file without applying overrides
    pub fn load_file(path: &Path) -> ConfigResult<KlishTreeConfig> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        Self::parse(&content, &path.display().to_string())
    }

    fn parse(content: &str, origin: &str) -> ConfigResult<KlishTreeConfig> {
        toml::from_str(content).map_err(|e| ConfigError::ParseError {
            file: origin.to_string(),
            error: e.to_string(),
        })
    }

    /// Apply variable overrides through `lookup`:
    /// - KLISH_TREE_LOG -> logging.default
    /// - KLISH_TREE_MAX_RESULTS -> search.max_results
    pub fn apply_overrides<F>(config: &mut KlishTreeConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("KLISH_TREE_LOG") {
            config.logging.default = level;
        }

        if let Some(max) = lookup("KLISH_TREE_MAX_RESULTS") {
            config.search.max_results = max.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "KLISH_TREE_MAX_RESULTS must be a non-negative integer, got '{max}'"
                ))
            })?;
        }

        Ok(())
    }

    pub fn validate_config(config: &KlishTreeConfig) -> ConfigResult<()> {
        Self::validate_level("logging.default", &config.logging.default)?;

        for (module, level) in &config.logging.modules {
            Self::validate_level(&format!("logging.modules.{module}"), level)?;
        }

        Ok(())
    }

    fn validate_level(key: &str, level: &str) -> ConfigResult<()> {
        if LOG_LEVELS.contains(&level.to_ascii_lowercase().as_str()) {
            Ok(())
        } else {
            Err(ConfigError::ValidationError(format!(
                "Invalid log level '{level}' for {key}. Must be one of: {}",
                LOG_LEVELS.join(", ")
            )))
        }
    }

    /// Commented configuration file matching the built-in defaults
    pub fn generate_default_config() -> String {
        r#"# klish-tree configuration

[logging]
# Level for everything without a module override:
# off, error, warn, info, debug, trace
default = "warn"

[logging.modules]
# klish_tree_core = "debug"

[search]
# Stop after this many matches (0 = unlimited)
max_results = 0

[render]
# Blank line after each top-level view
separate_views = true
"#
        .to_string()
    }
}
