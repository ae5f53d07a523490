//! Message Handler module for routing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tokio::sync::Notify;
use tracing::{debug, error, warn};

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import dialogue types
use crate::dialogue::{clear_draft, start_draft, RecipeDialogue};

// Import database types
use crate::db::RecipeStore;
use crate::errors::BotError;

use super::commands::Command;
use super::dialogue_manager::handle_draft_input;
use super::transport::{InboundEvent, MessageSender};
use super::ui_builder::{format_recipe_messages, MESSAGE_LIMIT};

/// Route one inbound event to a command handler or to the chat's draft
pub async fn handle_event<S: MessageSender + ?Sized>(
    sender: &S,
    store: &RecipeStore,
    dialogue: &RecipeDialogue,
    event: InboundEvent,
) -> Result<(), BotError> {
    let Some(command) = &event.command else {
        return handle_draft_input(sender, store, dialogue, &event).await;
    };

    debug!(user_id = %event.chat_id, command = command.name(), "Received command");
    let language_code = event.language();

    match command {
        Command::Start => {
            clear_draft(dialogue).await?;
            sender
                .send_text(event.chat_id, t_lang("welcome", language_code))
                .await?;
        }
        Command::Help => {
            clear_draft(dialogue).await?;
            sender
                .send_text(event.chat_id, t_lang("help", language_code))
                .await?;
        }
        Command::ListRecipes => {
            clear_draft(dialogue).await?;
            handle_list_recipes(sender, store, event.chat_id, language_code).await?;
        }
        Command::AddRecipe => {
            let draft = start_draft(dialogue).await?;
            sender
                .send_text(event.chat_id, t_lang(draft.step.prompt_key(), language_code))
                .await?;
        }
        Command::Cancel => {
            let had_draft = clear_draft(dialogue).await?;
            debug!(user_id = %event.chat_id, had_draft, "Cancelled current operation");
            sender
                .send_text(event.chat_id, t_lang("recipe-cancelled", language_code))
                .await?;
        }
        Command::Unknown(name) => {
            debug!(user_id = %event.chat_id, command = %name, "Unknown command");
            sender
                .send_text(event.chat_id, t_lang("unknown-command", language_code))
                .await?;
        }
    }

    Ok(())
}

async fn handle_list_recipes<S: MessageSender + ?Sized>(
    sender: &S,
    store: &RecipeStore,
    chat_id: ChatId,
    language_code: Option<&str>,
) -> Result<(), BotError> {
    let replies = match store.list_all().await {
        Ok(recipes) if recipes.is_empty() => vec![t_lang("no-recipes", language_code)],
        Ok(recipes) => format_recipe_messages(&recipes, language_code, MESSAGE_LIMIT),
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to list recipes");
            vec![t_args_lang(
                "error-listing-recipes",
                &[("error", e.to_string().as_str())],
                language_code,
            )]
        }
    };

    debug!(user_id = %chat_id, messages = replies.len(), "Sending recipe listing");
    for reply in replies {
        sender.send_text(chat_id, reply).await?;
    }
    Ok(())
}

/// teloxide endpoint for every incoming message.
///
/// A transport failure wakes `transport_failed` so the dispatcher can be shut
/// down; other errors are left to the dispatcher's error handler.
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: RecipeDialogue,
    store: Arc<RecipeStore>,
    transport_failed: Arc<Notify>,
) -> Result<()> {
    let Some(event) = InboundEvent::from_message(&msg) else {
        debug!(user_id = %msg.chat.id, "Ignoring non-text message");
        return Ok(());
    };
    debug!(user_id = %event.chat_id, message_length = event.text.len(), is_command = event.is_command(), "Received text message from user");

    let chat_id = event.chat_id;
    let outcome = handle_event(&bot, &store, &dialogue, event).await;
    finish_handling(chat_id, outcome, &transport_failed)
}

/// Log a handler outcome and wake `transport_failed` when it is fatal.
pub fn finish_handling(
    chat_id: ChatId,
    outcome: Result<(), BotError>,
    transport_failed: &Notify,
) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(e) if e.is_fatal() => {
            error!(user_id = %chat_id, error = %e, "Transport failure, stopping");
            transport_failed.notify_one();
            Err(e.into())
        }
        Err(e) => {
            warn!(user_id = %chat_id, error = %e, "Failed to handle message");
            Err(e.into())
        }
    }
}
