use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TrainLoadError;
use crate::load::LoadConfig;
use crate::logging::LogConfig;
use crate::plan::PlanConfig;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// Rolling window and chronic method settings
    pub load: LoadConfig,

    /// Plan completion settings
    pub plan: PlanConfig,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();

        ConfigMetadata {
            version: "1.0".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            load: LoadConfig::default(),
            plan: PlanConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

/// Configuration management implementation
impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".trainload")
            .join("config.toml")
    }

    /// Load configuration from the default location, falling back to defaults
    /// when no file exists yet
    pub fn load_or_default() -> Result<Self> {
        let config_path = Self::default_config_path();

        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from_file(&config_path)
    }

    /// Save configuration to default location
    pub fn save_default(&mut self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to_file(config_path)
    }

    /// Reject settings the metric windows cannot work with
    pub fn validate(&self) -> std::result::Result<(), TrainLoadError> {
        if self.load.acute_window_days == 0 {
            return Err(TrainLoadError::Configuration(
                "load.acute_window_days must be at least 1".to_string(),
            ));
        }
        if self.load.chronic_window_days < self.load.acute_window_days {
            return Err(TrainLoadError::Configuration(format!(
                "load.chronic_window_days ({}) must not be shorter than the acute window ({})",
                self.load.chronic_window_days, self.load.acute_window_days
            )));
        }
        if self.load.ewma_span_days == 0 {
            return Err(TrainLoadError::Configuration(
                "load.ewma_span_days must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
