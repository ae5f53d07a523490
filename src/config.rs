//! # Bot Configuration Module
//!
//! Settings read from the environment (and a `.env` file, loaded by `main`).

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_APP_NAME: &str = "barkeep";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_DATABASE_URL: &str = "sqlite://barkeep.db";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Runtime configuration of the bot process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BotConfig {
    /// Name used in logs
    pub app_name: String,
    /// Fallback log filter when `RUST_LOG` is unset
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    pub bot_token: String,
    pub database_url: String,
    pub max_connections: u32,
}

impl BotConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bot_token = lookup("TELEGRAM_BOT_TOKEN")
            .filter(|token| !token.trim().is_empty())
            .context("TELEGRAM_BOT_TOKEN must be set")?;

        let max_connections = match lookup("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .with_context(|| {
                    format!("DATABASE_MAX_CONNECTIONS must be a positive integer, got {value:?}")
                })?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let log_json = match lookup("APP_LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("text") => false,
            Some("json") => true,
            Some(other) => anyhow::bail!("APP_LOG_FORMAT must be 'text' or 'json', got {other:?}"),
        };

        Ok(Self {
            app_name: lookup("APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            log_level: lookup("APP_LOG_LEVEL").unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_json,
            bot_token,
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections,
        })
    }
}
