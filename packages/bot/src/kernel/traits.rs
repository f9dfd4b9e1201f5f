// Trait definitions for dependency injection
//
// These are INFRASTRUCTURE traits only - no business logic. Flow logic
// (prompts, gating, templates) lives in the domains modules and uses these.
//
// Naming convention: Base* for trait names (e.g., BaseChat, BaseDirectory)

use airtable_client::{BusinessRecord, NewBusiness};
use anyhow::Result;
use async_trait::async_trait;

/// One inline action button. Kept transport-agnostic so flows and tests
/// never touch Telegram types; the chat adapter does the conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

// =============================================================================
// Chat transport (outbound half; inbound updates arrive via polling)
// =============================================================================

#[async_trait]
pub trait BaseChat: Send + Sync {
    /// Send a plain text message to a chat.
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()>;

    /// Send a text message with inline action buttons (rows of buttons).
    async fn send_with_buttons(
        &self,
        chat_id: i64,
        text: &str,
        rows: Vec<Vec<Button>>,
    ) -> Result<()>;

    /// Replace the text of an already-sent message.
    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()>;

    /// Acknowledge a button press, optionally with a transient notice.
    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()>;
}

// =============================================================================
// Remote directory (record store)
// =============================================================================

#[async_trait]
pub trait BaseDirectory: Send + Sync {
    /// All records the moderator has approved, in store order.
    async fn list_approved(&self) -> Result<Vec<BusinessRecord>>;

    /// All records still awaiting review, in store order.
    async fn list_pending(&self) -> Result<Vec<BusinessRecord>>;

    /// Create a new unreviewed record; returns the store-assigned id.
    async fn create(&self, business: &NewBusiness) -> Result<String>;

    /// Patch the status flags on an existing record. Last write wins.
    async fn set_status(&self, record_id: &str, verified: bool, rejected: bool) -> Result<()>;
}

// =============================================================================
// Language model
// =============================================================================

#[async_trait]
pub trait BaseAssistant: Send + Sync {
    /// Complete a prompt with an LLM (returns raw text response)
    async fn complete(&self, prompt: &str) -> Result<String>;
}

// =============================================================================
// Currency rates
// =============================================================================

#[async_trait]
pub trait BaseRates: Send + Sync {
    /// Convert an amount between two currency codes at the current rate.
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64>;
}
