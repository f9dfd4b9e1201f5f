// Production implementations of the kernel traits over the client crates.

use std::sync::Arc;

use airtable_client::{AirtableClient, BusinessRecord, NewBusiness};
use anyhow::{Context, Result};
use async_trait::async_trait;
use exchange_client::ExchangeClient;
use openai_client::{ChatRequest, Message, OpenAiClient};
use telegram_client::{InlineKeyboardButton, InlineKeyboardMarkup, TelegramClient};

use super::traits::{BaseAssistant, BaseChat, BaseDirectory, BaseRates, Button};

// =============================================================================
// Telegram
// =============================================================================

/// Outbound chat operations over the shared Telegram client.
pub struct TelegramChat {
    client: Arc<TelegramClient>,
}

impl TelegramChat {
    pub fn new(client: Arc<TelegramClient>) -> Self {
        Self { client }
    }

    fn markup(rows: Vec<Vec<Button>>) -> InlineKeyboardMarkup {
        InlineKeyboardMarkup {
            inline_keyboard: rows
                .into_iter()
                .map(|row| {
                    row.into_iter()
                        .map(|b| InlineKeyboardButton::callback(b.label, b.payload))
                        .collect()
                })
                .collect(),
        }
    }
}

#[async_trait]
impl BaseChat for TelegramChat {
    async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        self.client
            .send_message(chat_id, text)
            .await
            .context("Failed to send Telegram message")?;
        Ok(())
    }

    async fn send_with_buttons(
        &self,
        chat_id: i64,
        text: &str,
        rows: Vec<Vec<Button>>,
    ) -> Result<()> {
        self.client
            .send_message_with_markup(chat_id, text, &Self::markup(rows))
            .await
            .context("Failed to send Telegram message with keyboard")?;
        Ok(())
    }

    async fn edit_message(&self, chat_id: i64, message_id: i64, text: &str) -> Result<()> {
        self.client
            .edit_message_text(chat_id, message_id, text)
            .await
            .context("Failed to edit Telegram message")?;
        Ok(())
    }

    async fn answer_callback(
        &self,
        callback_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        self.client
            .answer_callback_query(callback_id, text, show_alert)
            .await
            .context("Failed to answer callback query")?;
        Ok(())
    }
}

// =============================================================================
// Airtable
// =============================================================================

pub struct AirtableDirectory {
    client: AirtableClient,
}

impl AirtableDirectory {
    pub fn new(client: AirtableClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseDirectory for AirtableDirectory {
    async fn list_approved(&self) -> Result<Vec<BusinessRecord>> {
        Ok(self.client.list_approved().await?)
    }

    async fn list_pending(&self) -> Result<Vec<BusinessRecord>> {
        Ok(self.client.list_pending().await?)
    }

    async fn create(&self, business: &NewBusiness) -> Result<String> {
        Ok(self.client.create(business).await?)
    }

    async fn set_status(&self, record_id: &str, verified: bool, rejected: bool) -> Result<()> {
        Ok(self.client.set_status(record_id, verified, rejected).await?)
    }
}

// =============================================================================
// OpenAI
// =============================================================================

/// Model the query flow completes with.
const COMPLETION_MODEL: &str = "gpt-3.5-turbo";
const COMPLETION_TEMPERATURE: f32 = 0.7;

pub struct OpenAiAssistant {
    client: OpenAiClient,
}

impl OpenAiAssistant {
    pub fn new(client: OpenAiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseAssistant for OpenAiAssistant {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest::new(COMPLETION_MODEL)
            .message(Message::user(prompt))
            .temperature(COMPLETION_TEMPERATURE);

        let response = self
            .client
            .chat_completion(request)
            .await
            .context("Failed to call OpenAI API")?;

        Ok(response.content)
    }
}

// =============================================================================
// Exchange rates
// =============================================================================

pub struct ExchangeRates {
    client: ExchangeClient,
}

impl ExchangeRates {
    pub fn new(client: ExchangeClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl BaseRates for ExchangeRates {
    async fn convert(&self, amount: f64, from: &str, to: &str) -> Result<f64> {
        Ok(self.client.convert(amount, from, to).await?)
    }
}
