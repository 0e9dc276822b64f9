//! Configuration settings for claimquery.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub backend: BackendConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::ReadFile)?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Find the first config file in the default locations.
    pub fn locate() -> Option<PathBuf> {
        let config_paths = [
            // Current directory
            Some(PathBuf::from("claimquery.toml")),
            // User config directory
            dirs::config_dir().map(|p| p.join("claimquery/config.toml")),
            // Home directory
            dirs::home_dir().map(|p| p.join(".claimquery/config.toml")),
        ];
        first_existing(config_paths.into_iter().flatten())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.backend.max_aggregation_documents == 0 {
            return Err(
                ConfigError::Invalid("max_aggregation_documents must be > 0".to_string()).into(),
            );
        }
        if self.backend.max_analytics_documents == 0 {
            return Err(
                ConfigError::Invalid("max_analytics_documents must be > 0".to_string()).into(),
            );
        }
        if self.logging.level.trim().is_empty() {
            return Err(ConfigError::MissingField("logging.level".to_string()).into());
        }
        Ok(())
    }

    /// Expand the records path, if one is configured.
    pub fn records_path(&self) -> Option<PathBuf> {
        self.data.records_path.as_deref().map(|path| {
            let expanded = shellexpand::tilde(path);
            PathBuf::from(expanded.as_ref())
        })
    }
}

fn first_existing(candidates: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    candidates.into_iter().find(|path| path.is_file())
}

/// Claims data configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// JSON array or JSON Lines file of claim records
    pub records_path: Option<String>,
}

/// Backend query limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Maximum records scanned for a scalar aggregation
    pub max_aggregation_documents: usize,
    /// Maximum records scanned for a grouped ranking
    pub max_analytics_documents: usize,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            max_aggregation_documents: 1000,
            max_analytics_documents: 10000,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset
    pub level: String,
    /// Emit JSON log lines
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}
