// Main entry point for the currency converter bot

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use bot_core::domains::currency::RatesBot;
use bot_core::kernel::{ExchangeRates, TelegramChat};
use bot_core::Config;
use exchange_client::ExchangeClient;
use telegram_client::TelegramClient;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,bot_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting rates bot");

    let config = Config::from_env().context("Failed to load configuration")?;
    let exchange_api_key = config
        .exchange_api_key
        .clone()
        .context("EXCHANGE_API_KEY must be set for the rates bot")?;

    let transport = Arc::new(TelegramClient::new(config.bot_token.clone()));
    let bot = Arc::new(RatesBot::new(
        Arc::new(TelegramChat::new(transport.clone())),
        Arc::new(ExchangeRates::new(ExchangeClient::new(exchange_api_key))),
    ));

    tracing::info!("Polling for updates");
    let mut offset: Option<i64> = None;
    loop {
        match transport.get_updates(offset, 30).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let bot = bot.clone();
                    tokio::spawn(async move {
                        if let Err(e) = bot.handle_update(update).await {
                            tracing::error!(error = %e, "Update handling failed");
                        }
                    });
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Polling failed, backing off");
                tokio::time::sleep(Duration::from_secs(5)).await;
            }
        }
    }
}
