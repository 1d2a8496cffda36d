//! Log file configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default level for clientdesk's own events.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where log files go and how verbose they are.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    /// Level for clientdesk events: trace, debug, info, warn or error.
    /// Dependencies always log at warn. `RUST_LOG` overrides this.
    pub level: String,

    /// Directory for the rotating log files. Defaults to the platform data dir.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            directory: None,
        }
    }
}

impl LoggingConfig {
    /// Validate the logging section.
    pub fn validate(&self) -> Result<()> {
        if self.level.parse::<tracing::Level>().is_err() {
            return Err(ConfigError::ValidationError(format!(
                "logging.level: '{}' must be one of trace, debug, info, warn, error",
                self.level
            )));
        }
        Ok(())
    }

    /// The `EnvFilter` directive used when `RUST_LOG` is unset.
    pub fn filter_directive(&self) -> String {
        format!("clientdesk={},warn", self.level.to_lowercase())
    }
}
