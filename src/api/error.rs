//! API error types for the customer client.

use reqwest::StatusCode;
use thiserror::Error;

/// Generic message used when a rejected creation carries no error text.
pub const GENERIC_SUBMIT_ERROR: &str = "Unknown error while adding the customer.";

/// Errors that can occur when talking to the customer API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error("Network error: {status} {reason}")]
    Http {
        /// The numeric HTTP status.
        status: u16,
        /// The status description (e.g. "Not Found").
        reason: String,
    },

    /// Transport failure: connection refused, DNS, timeout.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body could not be parsed.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// The backend refused to create the customer.
    #[error("{0}")]
    Rejected(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

impl ApiError {
    /// Create an error from a non-success HTTP status.
    pub fn from_status(status: StatusCode) -> Self {
        ApiError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
        }
    }

    /// Create a rejection, falling back to the generic message.
    pub fn rejected(message: Option<&str>) -> Self {
        ApiError::Rejected(message.unwrap_or(GENERIC_SUBMIT_ERROR).to_string())
    }

    /// Check if this error came from a malformed response body.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, ApiError::InvalidResponse(_))
    }
}
