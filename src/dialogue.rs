//! Recipe wizard dialogue: one draft per chat, advanced step by step as text
//! messages arrive.
//!
//! | Step | Input | Effect |
//! |---|---|---|
//! | 1 Name | any non-blank text | store name trimmed, go to 2 |
//! | 2 Description | any text | store description as given, go to 3 |
//! | 3 Alcohol ingredients | `name:quantity` or `done` | append or go to 4 |
//! | 4 Non-alcohol ingredients | `name:quantity` or `done` | append or go to 5 |
//! | 5 Garnishes | label or `done` | append or go to 6 |
//! | 6 Utensils | label or `done` | append or go to 7 |
//! | 7 Steps | instruction or `done` | append or go to 8 |
//! | 8 Confirm | `done` only | persist and clear the draft |
//!
//! Malformed ingredient lines are dropped without feedback. Only the exact
//! text `done` closes a step; `Done` or ` done ` is ordinary input.

use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};
use tracing::debug;

use crate::errors::BotError;
use crate::recipe_model::{Ingredient, Recipe};

/// Sentinel closing a repeating step
pub const DONE: &str = "done";

/// Position of a draft in the recipe wizard
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStep {
    Name,
    Description,
    AlcoholIngredients,
    NonAlcoholIngredients,
    Garnishes,
    Utensils,
    Steps,
    Confirm,
}

impl DraftStep {
    /// 1-based step number shown in logs
    pub fn number(self) -> u8 {
        match self {
            DraftStep::Name => 1,
            DraftStep::Description => 2,
            DraftStep::AlcoholIngredients => 3,
            DraftStep::NonAlcoholIngredients => 4,
            DraftStep::Garnishes => 5,
            DraftStep::Utensils => 6,
            DraftStep::Steps => 7,
            DraftStep::Confirm => 8,
        }
    }

    /// Following step; `None` once the draft is ready to persist
    pub fn next(self) -> Option<DraftStep> {
        match self {
            DraftStep::Name => Some(DraftStep::Description),
            DraftStep::Description => Some(DraftStep::AlcoholIngredients),
            DraftStep::AlcoholIngredients => Some(DraftStep::NonAlcoholIngredients),
            DraftStep::NonAlcoholIngredients => Some(DraftStep::Garnishes),
            DraftStep::Garnishes => Some(DraftStep::Utensils),
            DraftStep::Utensils => Some(DraftStep::Steps),
            DraftStep::Steps => Some(DraftStep::Confirm),
            DraftStep::Confirm => None,
        }
    }

    /// Localization key of the prompt sent on entering this step
    pub fn prompt_key(self) -> &'static str {
        match self {
            DraftStep::Name => "prompt-name",
            DraftStep::Description => "prompt-description",
            DraftStep::AlcoholIngredients => "prompt-alcohol",
            DraftStep::NonAlcoholIngredients => "prompt-non-alcohol",
            DraftStep::Garnishes => "prompt-garnishes",
            DraftStep::Utensils => "prompt-utensils",
            DraftStep::Steps => "prompt-steps",
            DraftStep::Confirm => "prompt-confirm",
        }
    }
}

/// Outcome of feeding one message to a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Moved to a new step, whose prompt should be sent
    Advanced(DraftStep),
    /// Item appended to the current step's collection
    Accepted,
    /// Input discarded, nothing changed
    Ignored,
    /// `done` at the terminal step; the recipe is ready to persist
    Complete,
}

/// An in-progress recipe owned by one chat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub step: DraftStep,
    pub recipe: Recipe,
}

impl Draft {
    pub fn new(owner: i64) -> Self {
        Self {
            step: DraftStep::Name,
            recipe: Recipe::draft(owner),
        }
    }

    /// Apply one text message according to the current step
    pub fn apply(&mut self, text: &str) -> Transition {
        let is_done = is_done(text);

        match self.step {
            DraftStep::Name => {
                let name = text.trim();
                if name.is_empty() {
                    return Transition::Ignored;
                }
                self.recipe.name = name.to_string();
                self.advance()
            }
            DraftStep::Description => {
                self.recipe.description = text.to_string();
                self.advance()
            }
            DraftStep::AlcoholIngredients | DraftStep::NonAlcoholIngredients if is_done => {
                self.advance()
            }
            DraftStep::AlcoholIngredients => {
                push_ingredient(&mut self.recipe.alcohol_ingredients, text)
            }
            DraftStep::NonAlcoholIngredients => {
                push_ingredient(&mut self.recipe.non_alcohol_ingredients, text)
            }
            DraftStep::Garnishes | DraftStep::Utensils | DraftStep::Steps if is_done => {
                self.advance()
            }
            DraftStep::Garnishes => push_label(&mut self.recipe.garnishes, text),
            DraftStep::Utensils => push_label(&mut self.recipe.utensils, text),
            DraftStep::Steps => push_label(&mut self.recipe.steps, text),
            DraftStep::Confirm if is_done => Transition::Complete,
            DraftStep::Confirm => Transition::Ignored,
        }
    }

    fn advance(&mut self) -> Transition {
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Transition::Advanced(next)
            }
            None => Transition::Complete,
        }
    }
}

fn is_done(text: &str) -> bool {
    text == DONE
}

fn push_ingredient(ingredients: &mut Vec<Ingredient>, text: &str) -> Transition {
    match Ingredient::parse(text) {
        Some(ingredient) => {
            ingredients.push(ingredient);
            Transition::Accepted
        }
        None => {
            debug!(input_length = text.len(), "Discarding malformed ingredient line");
            Transition::Ignored
        }
    }
}

fn push_label(labels: &mut Vec<String>, text: &str) -> Transition {
    labels.push(text.to_string());
    Transition::Accepted
}

/// Represents the conversation state for the recipe wizard
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum RecipeDialogueState {
    #[default]
    Idle,
    Drafting(Draft),
}

/// Type alias for our recipe dialogue
pub type RecipeDialogue = Dialogue<RecipeDialogueState, InMemStorage<RecipeDialogueState>>;

fn storage_error(err: impl std::fmt::Display) -> BotError {
    BotError::Dialogue(err.to_string())
}

/// Current draft of the dialogue's chat, if any
pub async fn load_draft(dialogue: &RecipeDialogue) -> Result<Option<Draft>, BotError> {
    match dialogue.get().await.map_err(storage_error)? {
        Some(RecipeDialogueState::Drafting(draft)) => Ok(Some(draft)),
        Some(RecipeDialogueState::Idle) | None => Ok(None),
    }
}

/// Store an updated draft for the dialogue's chat
pub async fn save_draft(dialogue: &RecipeDialogue, draft: Draft) -> Result<(), BotError> {
    dialogue
        .update(RecipeDialogueState::Drafting(draft))
        .await
        .map_err(storage_error)
}

/// Replace any draft of the chat with a fresh one at step 1
pub async fn start_draft(dialogue: &RecipeDialogue) -> Result<Draft, BotError> {
    let draft = Draft::new(dialogue.chat_id().0);
    save_draft(dialogue, draft.clone()).await?;
    debug!(user_id = %dialogue.chat_id(), "Started new recipe draft");
    Ok(draft)
}

/// Discard the chat's draft. Returns whether one existed.
pub async fn clear_draft(dialogue: &RecipeDialogue) -> Result<bool, BotError> {
    // Removing a missing dialogue is an error for the storage
    let Some(state) = dialogue.get().await.map_err(storage_error)? else {
        return Ok(false);
    };
    dialogue.exit().await.map_err(storage_error)?;

    let had_draft = matches!(state, RecipeDialogueState::Drafting(_));
    if had_draft {
        debug!(user_id = %dialogue.chat_id(), "Discarded recipe draft");
    }
    Ok(had_draft)
}
