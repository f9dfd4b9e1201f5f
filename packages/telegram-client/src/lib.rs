//! Minimal Telegram Bot API client.
//!
//! Covers the handful of methods the bots need: long-polling `getUpdates`,
//! `sendMessage` (optionally with an inline keyboard), `editMessageText`,
//! and `answerCallbackQuery`.
//!
//! # Example
//!
//! ```rust,ignore
//! use telegram_client::TelegramClient;
//!
//! let client = TelegramClient::new("123:abc".into());
//!
//! let updates = client.get_updates(None, 30).await?;
//! for update in &updates {
//!     if let Some(msg) = &update.message {
//!         client.send_message(msg.chat.id, "got it").await?;
//!     }
//! }
//! ```

pub mod error;
pub mod types;

pub use error::{Result, TelegramError};
pub use types::{
    CallbackQuery, Chat, InlineKeyboardButton, InlineKeyboardMarkup, Message, Update, User,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use types::{
    AnswerCallbackQueryRequest, ApiResponse, EditMessageTextRequest, GetUpdatesRequest,
    SendMessageRequest,
};

const BASE_URL: &str = "https://api.telegram.org";

/// Poll timeout passed to `getUpdates`, in seconds.
const POLL_TIMEOUT_SECS: u64 = 30;

pub struct TelegramClient {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: String) -> Self {
        // Request timeout must outlast the long-poll window.
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(POLL_TIMEOUT_SECS + 10))
            .build()
            .expect("reqwest client");

        Self {
            client,
            token,
            base_url: BASE_URL.to_string(),
        }
    }

    /// Override the API host (used by tests against a mock server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Long-poll for updates. `offset` is one past the last seen update id.
    pub async fn get_updates(&self, offset: Option<i64>, timeout: u64) -> Result<Vec<Update>> {
        let body = GetUpdatesRequest { offset, timeout };
        self.call("getUpdates", &body).await
    }

    /// Send a plain text message.
    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<Message> {
        let body = SendMessageRequest {
            chat_id,
            text,
            reply_markup: None,
        };
        self.call("sendMessage", &body).await
    }

    /// Send a text message with an inline keyboard attached.
    pub async fn send_message_with_markup(
        &self,
        chat_id: i64,
        text: &str,
        markup: &InlineKeyboardMarkup,
    ) -> Result<Message> {
        let body = SendMessageRequest {
            chat_id,
            text,
            reply_markup: Some(markup),
        };
        self.call("sendMessage", &body).await
    }

    /// Replace the text of a previously sent message.
    pub async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Result<()> {
        let body = EditMessageTextRequest {
            chat_id,
            message_id,
            text,
        };
        // editMessageText returns the edited Message; we only care that it worked.
        let _: serde_json::Value = self.call("editMessageText", &body).await?;
        Ok(())
    }

    /// Acknowledge a callback query, optionally with a notice or alert popup.
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<&str>,
        show_alert: bool,
    ) -> Result<()> {
        let body = AnswerCallbackQueryRequest {
            callback_query_id,
            text,
            show_alert,
        };
        let _: serde_json::Value = self.call("answerCallbackQuery", &body).await?;
        Ok(())
    }

    async fn call<B: Serialize, T: DeserializeOwned>(&self, method: &str, body: &B) -> Result<T> {
        let url = format!("{}/bot{}/{}", self.base_url, self.token, method);
        let resp = self.client.post(&url).json(body).send().await?;

        let status = resp.status();
        let raw = resp.text().await?;

        // Intermediaries can answer with a non-JSON body (e.g. an HTML 502
        // page); keep the status and raw text instead of a parse error.
        let api_resp: ApiResponse<T> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                tracing::warn!(method, status = status.as_u16(), "Telegram API error without envelope");
                return Err(TelegramError::Api {
                    status: status.as_u16(),
                    description: raw,
                });
            }
            Err(e) => return Err(TelegramError::Parse(e.to_string())),
        };

        if !status.is_success() || !api_resp.ok {
            let description = api_resp.description.unwrap_or_default();
            tracing::warn!(method, status = status.as_u16(), %description, "Telegram API error");
            return Err(TelegramError::Api {
                status: status.as_u16(),
                description,
            });
        }

        api_resp
            .result
            .ok_or_else(|| TelegramError::Parse(format!("{method}: ok response without result")))
    }
}
