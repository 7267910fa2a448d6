//! Configuration handling for projboard
//!
//! Configuration is stored in `~/.config/projboard/config.toml` (or the
//! platform equivalent). A `--config` path overrides the location.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::FormRules;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),
}

/// User configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log filter used when `RUST_LOG` is unset (e.g. "info", "projboard=debug")
    pub log_level: String,

    /// Log file written while the board owns the terminal
    pub log_file: Option<PathBuf>,

    /// Event poll interval for the board, in milliseconds
    pub tick_rate_ms: u64,

    /// Form validation limits
    pub validation: FormRules,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_file: None,
            tick_rate_ms: 250,
            validation: FormRules::default(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or from the default location
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()).into());
                }
                Self::load_from(path)?
            }
            None => match Self::config_dir() {
                Some(dir) if dir.join("config.toml").exists() => {
                    Self::load_from(&dir.join("config.toml"))?
                }
                _ => Self::default(),
            },
        };

        config.check()?;
        Ok(config)
    }

    /// Parses configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;

        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Rejects settings the board cannot work with
    pub fn check(&self) -> Result<(), ConfigError> {
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_rate_ms must be greater than zero".to_string(),
            ));
        }
        if self.validation.people_min >= self.validation.people_max {
            return Err(ConfigError::Invalid(format!(
                "validation.people_min ({}) must be below validation.people_max ({})",
                self.validation.people_min, self.validation.people_max
            )));
        }
        Ok(())
    }

    /// Returns the config directory
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "projboard", "projboard")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Returns the log file path, falling back to the data directory
    pub fn log_path(&self) -> Option<PathBuf> {
        self.log_file.clone().or_else(|| {
            ProjectDirs::from("dev", "projboard", "projboard")
                .map(|dirs| dirs.data_dir().join("projboard.log"))
        })
    }
}
