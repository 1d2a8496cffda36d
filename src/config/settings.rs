//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Default event loop tick in milliseconds.
pub const DEFAULT_TICK_RATE_MS: u64 = 100;

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// The UI theme to use ("dark" or "light").
    pub theme: String,
    /// Whether to use vim-style keybindings in the table.
    pub vim_mode: bool,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            vim_mode: true,
            tick_rate_ms: DEFAULT_TICK_RATE_MS,
        }
    }
}
