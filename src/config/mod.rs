//! Configuration management for clientdesk.
//!
//! This module handles loading, saving, and validating the TOML configuration
//! file holding the customer API endpoints and application settings.

mod api;
mod logging;
mod settings;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

pub use api::ApiConfig;
pub use logging::LoggingConfig;
pub use settings::{Settings, DEFAULT_TICK_RATE_MS};

/// Name of the configuration file inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Errors raised while loading or saving configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform configuration directory could be determined.
    #[error("could not determine configuration directory")]
    NoConfigDir,

    /// The configuration directory could not be created.
    #[error("failed to create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The configuration file could not be read.
    #[error("failed to read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The configuration file could not be written.
    #[error("failed to write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The configuration file is not valid TOML for this schema.
    #[error("failed to parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("failed to serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A value failed validation.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// The full application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Customer API endpoints.
    pub api: ApiConfig,
    /// Application settings.
    pub settings: Settings,
    /// Log file location and level.
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the default configuration file path.
    ///
    /// - Linux: `~/.config/clientdesk/config.toml`
    /// - macOS: `~/Library/Application Support/clientdesk/config.toml`
    /// - Windows: `C:\Users\<User>\AppData\Roaming\clientdesk\config.toml`
    pub fn default_path() -> Result<PathBuf> {
        let dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(dir.join("clientdesk").join(CONFIG_FILE_NAME))
    }

    /// Load and validate configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!(path = %path.display(), "No configuration file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;

        debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Save configuration to a specific path, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(ConfigError::CreateDirError)?;
        }

        fs::write(path, self.to_toml()?).map_err(ConfigError::WriteError)?;
        info!(path = %path.display(), "Saved configuration");
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validate every section.
    pub fn validate(&self) -> Result<()> {
        self.api.validate()?;
        self.logging.validate()?;

        if self.settings.tick_rate_ms == 0 {
            return Err(ConfigError::ValidationError(
                "settings.tick_rate_ms must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
