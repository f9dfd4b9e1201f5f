//! Error types for the Airtable client.

use thiserror::Error;

/// Result type for Airtable client operations.
pub type Result<T> = std::result::Result<T, AirtableError>;

/// Airtable client errors.
///
/// `Api` carries the raw response body so the operator can diagnose the
/// store's complaint from the logs; user-facing code must not show it.
#[derive(Debug, Error)]
pub enum AirtableError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from Airtable
    #[error("Airtable API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// Unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),
}
