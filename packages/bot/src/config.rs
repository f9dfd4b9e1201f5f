use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub openai_api_key: String,
    pub airtable_token: String,
    pub airtable_base_id: String,
    pub airtable_table_name: String,
    /// Identities allowed to approve/reject submissions. Fixed at startup.
    pub moderator_ids: Vec<i64>,
    pub exchange_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            bot_token: env::var("BOT_TOKEN").context("BOT_TOKEN must be set")?,
            openai_api_key: env::var("OPENAI_API_KEY")
                .context("OPENAI_API_KEY must be set")?,
            airtable_token: env::var("AIRTABLE_TOKEN")
                .context("AIRTABLE_TOKEN must be set")?,
            airtable_base_id: env::var("AIRTABLE_BASE_ID")
                .context("AIRTABLE_BASE_ID must be set")?,
            airtable_table_name: env::var("AIRTABLE_TABLE_NAME")
                .context("AIRTABLE_TABLE_NAME must be set")?,
            moderator_ids: Self::moderator_ids_from_env()?,
            exchange_api_key: env::var("EXCHANGE_API_KEY").ok(),
        })
    }

    /// `MODERATOR_IDS` is a comma-separated list; a single `MODERATOR_ID`
    /// is accepted for older deployments.
    fn moderator_ids_from_env() -> Result<Vec<i64>> {
        let raw = env::var("MODERATOR_IDS")
            .or_else(|_| env::var("MODERATOR_ID"))
            .context("MODERATOR_IDS must be set")?;

        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<i64>()
                    .with_context(|| format!("MODERATOR_IDS entry '{s}' is not a valid id"))
            })
            .collect()
    }

    /// Pure authorization predicate for moderator-gated actions.
    pub fn is_moderator(&self, user_id: i64) -> bool {
        self.moderator_ids.contains(&user_id)
    }
}
