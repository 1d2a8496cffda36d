//! Customer API endpoint configuration.

use serde::{Deserialize, Serialize};

use super::{ConfigError, Result};

/// Default endpoint returning the customer list.
pub const DEFAULT_LIST_URL: &str = "http://api-react-db.test/get_data.php";

/// Default endpoint accepting new customers.
pub const DEFAULT_CREATE_URL: &str = "http://api-react-db.test/add_data.php";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Where the customer API lives.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// URL answering `GET` with a JSON array of customer records.
    pub list_url: String,

    /// URL accepting `POST` of a JSON-encoded customer draft.
    pub create_url: String,

    /// Request timeout in seconds. Must be non-zero.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            list_url: DEFAULT_LIST_URL.to_string(),
            create_url: DEFAULT_CREATE_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl ApiConfig {
    /// Validate the endpoint configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ValidationError` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        validate_url("list_url", &self.list_url)?;
        validate_url("create_url", &self.create_url)?;

        if self.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_url(key: &str, url: &str) -> Result<()> {
    let url = url.trim();

    if url.is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "api.{} cannot be empty",
            key
        )));
    }

    if !url.starts_with("https://") && !url.starts_with("http://") {
        return Err(ConfigError::ValidationError(format!(
            "api.{}: '{}' must start with http:// or https://",
            key, url
        )));
    }

    Ok(())
}
