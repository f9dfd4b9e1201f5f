//! Error types for the Telegram client.

use thiserror::Error;

/// Result type for Telegram client operations.
pub type Result<T> = std::result::Result<T, TelegramError>;

/// Telegram client errors.
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Network error (connection failed, timeout)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Bot API returned ok=false or a non-2xx status
    #[error("Telegram API error ({status}): {description}")]
    Api { status: u16, description: String },

    /// Unexpected response shape
    #[error("Parse error: {0}")]
    Parse(String),
}
