//! Error types for the OpenAI client.

use thiserror::Error;

/// Result type for OpenAI client operations.
pub type Result<T> = std::result::Result<T, OpenAiError>;

/// OpenAI client errors.
#[derive(Debug, Error)]
pub enum OpenAiError {
    /// Missing API key or invalid settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response (rate limit, invalid request, auth)
    #[error("API error: {0}")]
    Api(String),

    /// Unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),
}
