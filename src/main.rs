use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tokio::sync::Notify;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use barkeep::bot;
use barkeep::config::BotConfig;
use barkeep::db::RecipeStore;
use barkeep::dialogue::RecipeDialogueState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = BotConfig::from_env().context("Failed to load configuration")?;

    // Initialize logging, RUST_LOG wins over APP_LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;
    if config.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    info!(app = %config.app_name, "Starting cocktail recipe bot");

    let store = RecipeStore::connect(&config.database_url, config.max_connections)
        .await
        .context("Failed to open recipe database")?;
    store
        .ensure_schema()
        .await
        .context("Failed to initialize database schema")?;
    let store = Arc::new(store);

    let bot = Bot::new(config.bot_token);
    let transport_failed = Arc::new(Notify::new());

    info!("Bot initialized, starting dispatcher");

    let handler = Update::filter_message()
        .enter_dialogue::<Message, InMemStorage<RecipeDialogueState>, RecipeDialogueState>()
        .endpoint(bot::message_handler);

    let mut dispatcher = Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<RecipeDialogueState>::new(),
            Arc::clone(&store),
            Arc::clone(&transport_failed)
        ])
        .enable_ctrlc_handler()
        .build();

    // Stop receiving updates once the transport is unusable
    let shutdown_token = dispatcher.shutdown_token();
    tokio::spawn(async move {
        transport_failed.notified().await;
        error!("Telegram transport failed, shutting down dispatcher");
        if let Ok(shutdown) = shutdown_token.shutdown() {
            shutdown.await;
        }
    });

    dispatcher.dispatch().await;

    // In-flight drafts live only in memory and are dropped here
    store.close().await;
    info!("Bot stopped");

    Ok(())
}
