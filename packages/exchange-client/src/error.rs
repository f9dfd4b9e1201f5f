//! Error types for the exchange-rate client.

use thiserror::Error;

/// Result type for exchange-rate operations.
pub type Result<T> = std::result::Result<T, ExchangeError>;

/// Exchange-rate client errors.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response from the rate service
    #[error("Rate API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The service answered but reported no usable rate
    #[error("Rate unavailable")]
    Unavailable,

    /// Unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),
}
