//! Dialogue Manager module for advancing recipe drafts

use tracing::{debug, error, info};

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import dialogue types
use crate::dialogue::{clear_draft, load_draft, save_draft, Draft, RecipeDialogue, Transition};

// Import database types
use crate::db::RecipeStore;
use crate::errors::BotError;

use super::transport::{InboundEvent, MessageSender};

/// Feed a free-text message to the chat's draft, if one is active
pub async fn handle_draft_input<S: MessageSender + ?Sized>(
    sender: &S,
    store: &RecipeStore,
    dialogue: &RecipeDialogue,
    event: &InboundEvent,
) -> Result<(), BotError> {
    let Some(mut draft) = load_draft(dialogue).await? else {
        debug!(user_id = %event.chat_id, "No active draft, ignoring text message");
        return Ok(());
    };

    let language_code = event.language();
    let transition = draft.apply(&event.text);
    debug!(user_id = %event.chat_id, step = ?draft.step, transition = ?transition, "Applied draft input");

    match transition {
        Transition::Advanced(step) => {
            save_draft(dialogue, draft).await?;
            sender
                .send_text(event.chat_id, t_lang(step.prompt_key(), language_code))
                .await?;
        }
        Transition::Accepted => save_draft(dialogue, draft).await?,
        Transition::Ignored => {}
        Transition::Complete => save_recipe(sender, store, dialogue, &draft, language_code).await?,
    }

    Ok(())
}

/// Persist a completed draft and clear it.
///
/// On a store failure the user is told why and the draft stays parked at the
/// terminal step, so sending `done` again retries the insert.
pub async fn save_recipe<S: MessageSender + ?Sized>(
    sender: &S,
    store: &RecipeStore,
    dialogue: &RecipeDialogue,
    draft: &Draft,
    language_code: Option<&str>,
) -> Result<(), BotError> {
    let chat_id = dialogue.chat_id();

    match store.insert(&draft.recipe).await {
        Ok(recipe_id) => {
            clear_draft(dialogue).await?;
            info!(user_id = %chat_id, recipe_id, "Recipe saved from draft");
            let message = t_args_lang(
                "recipe-saved",
                &[("recipe_id", recipe_id.to_string().as_str())],
                language_code,
            );
            sender.send_text(chat_id, message).await?;
        }
        Err(e) => {
            error!(user_id = %chat_id, error = %e, "Failed to save recipe");
            let message =
                t_args_lang("error-saving-recipe", &[("error", e.to_string().as_str())], language_code);
            sender.send_text(chat_id, message).await?;
        }
    }

    Ok(())
}
