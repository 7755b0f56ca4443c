//! Configuration management module
//!
//! Handles loading and validation of the optional user configuration.
//! Without a config file every field takes the default shown below.

use crate::{Result, TyuDiskError, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

/// User configuration for a tyu-disk run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Explicit fio executable; looked up in PATH when unset
    pub fio_path: Option<PathBuf>,
    /// Directory fio runs in and whose free space sizes the test
    pub target_dir: PathBuf,
    /// fio ioengine override; the platform default is used when unset
    pub io_engine: Option<String>,
    /// Maximum level of diagnostics written to stderr
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            fio_path: None,
            target_dir: PathBuf::from("."),
            io_engine: None,
            log_level: "warn".to_string(),
        }
    }
}

impl AppConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.target_dir.exists() {
            return Err(TyuDiskError::ConfigError(format!(
                "Target directory does not exist: {}",
                self.target_dir.display()
            )));
        }

        if !self.target_dir.is_dir() {
            return Err(TyuDiskError::ConfigError(format!(
                "Target path is not a directory: {}",
                self.target_dir.display()
            )));
        }

        if let Some(engine) = &self.io_engine {
            if engine.trim().is_empty() {
                return Err(TyuDiskError::ConfigError(
                    "io_engine must not be empty".to_string(),
                ));
            }
        }

        self.tracing_level()?;

        Ok(())
    }

    /// Parsed `log_level`
    pub fn tracing_level(&self) -> Result<tracing::Level> {
        tracing::Level::from_str(self.log_level.trim()).map_err(|_| {
            TyuDiskError::ConfigError(format!("Unknown log level: {}", self.log_level))
        })
    }

    /// Set the fio executable
    pub fn with_fio_path(mut self, path: PathBuf) -> Self {
        self.fio_path = Some(path);
        self
    }

    /// Set the target directory
    pub fn with_target_dir(mut self, dir: PathBuf) -> Self {
        self.target_dir = dir;
        self
    }

    /// Set the fio ioengine
    pub fn with_io_engine(mut self, engine: impl Into<String>) -> Self {
        self.io_engine = Some(engine.into());
        self
    }

    /// Set the log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if file doesn't exist
    ///
    /// The file is optional and nothing else (flags, environment) is read.
    /// Without it a run is fully determined by the defaults: fio from PATH,
    /// the current directory as target, the platform ioengine, `warn` logs.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            TyuDiskError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Self::from_toml(&content).map_err(|e| {
            TyuDiskError::ConfigError(format!(
                "Invalid config file {}: {}",
                config_path.display(),
                e
            ))
        })
    }

    /// Parse and validate a TOML document
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/tyu-disk/tyu-disk.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            TyuDiskError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}
