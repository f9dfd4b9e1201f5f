// Currency conversion conversation for the rates bot.
//
// The user picks a source currency from a keyboard, then sends amounts as
// "100 to EUR". The chosen source currency is the only per-user state.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use telegram_client::Update;
use tokio::sync::Mutex;

use crate::kernel::{BaseChat, BaseRates, Button};

pub const GREETING: &str = "👋 Привет! Я бот-конвертер валют.\nВыбери валюту для конвертации:";
pub const PICK_FIRST: &str = "Пожалуйста, выберите валюту для конвертации с помощью кнопок ниже.";
pub const UNKNOWN_CURRENCY: &str = "Неизвестная валюта.";
pub const FORMAT_ERR: &str = "❗ Неверный формат. Пример: 100 to EUR";
pub const RATE_ERR: &str = "❌ Не удалось получить курс валют.";

/// Source currencies offered on the keyboard, rendered four per row.
pub const CURRENCIES: [&str; 8] = ["USD", "EUR", "GEL", "PLN", "RUB", "UAH", "TRY", "CZK"];

const CURRENCY_PREFIX: &str = "currency_";

/// The rates bot's dependencies plus its per-user currency selection.
pub struct RatesBot {
    pub chat: Arc<dyn BaseChat>,
    pub rates: Arc<dyn BaseRates>,
    selected: Mutex<HashMap<i64, String>>,
}

impl RatesBot {
    pub fn new(chat: Arc<dyn BaseChat>, rates: Arc<dyn BaseRates>) -> Self {
        Self {
            chat,
            rates,
            selected: Mutex::new(HashMap::new()),
        }
    }

    /// Route one update: /start, a currency button press, or an amount.
    pub async fn handle_update(&self, update: Update) -> Result<()> {
        if let Some(callback) = update.callback_query {
            let data = callback.data.as_deref().unwrap_or_default();
            // Private chats: reply where the keyboard message lives.
            let chat_id = callback
                .message
                .as_ref()
                .map(|m| m.chat.id)
                .unwrap_or(callback.from.id);
            self.handle_currency_choice(callback.from.id, chat_id, data)
                .await?;
            return self.chat.answer_callback(&callback.id, None, false).await;
        }

        let Some(message) = update.message else {
            return Ok(());
        };
        let (Some(from), Some(text)) = (message.from, message.text.as_deref()) else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        if text.trim() == "/start" {
            return self
                .chat
                .send_with_buttons(chat_id, GREETING, currency_keyboard())
                .await;
        }
        self.handle_amount(from.id, chat_id, text).await
    }

    async fn handle_currency_choice(&self, user_id: i64, chat_id: i64, data: &str) -> Result<()> {
        match parse_currency_choice(data) {
            Some(currency) => {
                self.selected
                    .lock()
                    .await
                    .insert(user_id, currency.to_string());
                self.chat
                    .send_message(
                        chat_id,
                        &format!(
                            "Выбрана валюта: {currency}\nТеперь отправьте сумму для конвертации, например:\n100 to USD"
                        ),
                    )
                    .await
            }
            None => self.chat.send_message(chat_id, UNKNOWN_CURRENCY).await,
        }
    }

    async fn handle_amount(&self, user_id: i64, chat_id: i64, text: &str) -> Result<()> {
        let Some(from_currency) = self.selected.lock().await.get(&user_id).cloned() else {
            return self
                .chat
                .send_with_buttons(chat_id, PICK_FIRST, currency_keyboard())
                .await;
        };

        let Some((amount, to_currency)) = parse_amount_request(text) else {
            return self.chat.send_message(chat_id, FORMAT_ERR).await;
        };

        match self.rates.convert(amount, &from_currency, &to_currency).await {
            Ok(result) => {
                self.chat
                    .send_message(
                        chat_id,
                        &format!("{amount} {from_currency} = {result:.2} {to_currency}"),
                    )
                    .await
            }
            Err(e) => {
                tracing::warn!(error = %e, from = %from_currency, to = %to_currency, "Rate lookup failed");
                self.chat.send_message(chat_id, RATE_ERR).await
            }
        }
    }
}

/// Two rows of four currency buttons with `currency_XXX` payloads.
pub fn currency_keyboard() -> Vec<Vec<Button>> {
    CURRENCIES
        .chunks(4)
        .map(|row| {
            row.iter()
                .map(|c| Button::new(*c, format!("{CURRENCY_PREFIX}{c}")))
                .collect()
        })
        .collect()
}

/// Map a `currency_XXX` payload back to its currency code.
pub fn parse_currency_choice(data: &str) -> Option<&'static str> {
    let code = data.strip_prefix(CURRENCY_PREFIX)?;
    CURRENCIES.iter().copied().find(|c| *c == code)
}

/// Parse "AMOUNT to CUR" (three whitespace-separated tokens, middle token
/// `to` in any case). Returns the amount and the uppercased target code.
pub fn parse_amount_request(text: &str) -> Option<(f64, String)> {
    let parts: Vec<&str> = text.split_whitespace().collect();
    if parts.len() != 3 || !parts[1].eq_ignore_ascii_case("to") {
        return None;
    }
    let amount: f64 = parts[0].parse().ok()?;
    Some((amount, parts[2].to_uppercase()))
}
