//! Customer API client and types.
//!
//! This module provides the interface for communicating with the customer REST API.

mod client;
pub mod error;
pub mod types;

pub use client::CustomerClient;
pub use error::ApiError;
pub use types::{CustomerDraft, DraftField, Record, Scalar};
