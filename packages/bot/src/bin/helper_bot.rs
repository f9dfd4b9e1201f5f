// Main entry point for the helper bot (directory + moderation + queries)

use std::sync::Arc;
use std::time::Duration;

use airtable_client::AirtableClient;
use anyhow::{Context, Result};
use bot_core::kernel::{AirtableDirectory, BotKernel, OpenAiAssistant, TelegramChat};
use bot_core::{dispatch, Config};
use openai_client::OpenAiClient;
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

    tracing::info!("Starting helper bot");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(moderators = config.moderator_ids.len(), "Configuration loaded");

    let transport = Arc::new(TelegramClient::new(config.bot_token.clone()));
    let kernel = Arc::new(BotKernel::new(
        Arc::new(TelegramChat::new(transport.clone())),
        Arc::new(AirtableDirectory::new(AirtableClient::new(
            config.airtable_token.clone(),
            config.airtable_base_id.clone(),
            config.airtable_table_name.clone(),
        ))),
        Arc::new(OpenAiAssistant::new(OpenAiClient::new(
            config.openai_api_key.clone(),
        ))),
        config.moderator_ids.clone(),
    ));

    tracing::info!("Polling for updates");
    let mut offset: Option<i64> = None;
    loop {
        match transport.get_updates(offset, 30).await {
            Ok(updates) => {
                for update in updates {
                    offset = Some(update.update_id + 1);
                    let kernel = kernel.clone();
                    // One task per update; per-user state serializes on the
                    // session lock.
                    tokio::spawn(async move {
                        if let Err(e) = dispatch::handle_update(&kernel, update).await {
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
