//! Configuration handling
//!
//! Configuration is read from the path given by `--config` (or
//! `SHOPPING_LIST_CONFIG`), falling back to
//! `~/.config/shopping-list/config.toml`. A missing file means defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cli::OutputFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output format when `--format` is not given
    pub default_format: OutputFormat,

    /// TUI input poll interval in milliseconds
    pub tick_rate_ms: u64,

    /// Ask for confirmation before deleting an item in the TUI
    pub confirm_delete: bool,

    /// Quantity text prefilled in the add dialog
    pub default_quantity: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            tick_rate_ms: 250,
            confirm_delete: true,
            default_quantity: "1".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from an explicit path or the default location
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Returns the default config file location
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("dev", "shopping-list", "shopping-list")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Loads configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to load config: {}", path.display()))
    }

    /// Parses and validates TOML configuration
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if crate::domain::parse_strict(&self.default_quantity).is_err() {
            return Err(ConfigError::Invalid(format!(
                "default_quantity '{}' is not a whole number",
                self.default_quantity
            )));
        }
        Ok(())
    }
}
