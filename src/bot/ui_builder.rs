//! UI Builder module for formatting recipe listings

// Import localization
use crate::localization::{t_args_lang, t_lang};

// Import recipe types
use crate::recipe_model::{Ingredient, Recipe};

/// Line printed after every recipe block
pub const RECIPE_SEPARATOR: &str = "------------------------------------------------------";

fn push_ingredients(result: &mut String, header: &str, ingredients: &[Ingredient]) {
    result.push_str(header);
    result.push('\n');
    for ingredient in ingredients {
        result.push_str(&format!(" - {}: {}\n", ingredient.name, ingredient.quantity));
    }
}

fn push_labels(result: &mut String, header: &str, labels: &[String]) {
    result.push_str(header);
    result.push('\n');
    for label in labels {
        result.push_str(&format!(" - {label}\n"));
    }
}

/// Longest text Telegram accepts in one message, in characters
pub const MESSAGE_LIMIT: usize = 4096;

/// Render one recipe block, ending with the separator line.
///
/// Every section header is emitted even when its collection is empty.
pub fn format_recipe(recipe: &Recipe, language_code: Option<&str>) -> String {
    let mut result = String::new();

    result.push_str(&t_args_lang("list-recipe", &[("name", recipe.name.as_str())], language_code));
    result.push('\n');
    result.push_str(&t_args_lang(
        "list-description",
        &[("description", recipe.description.as_str())],
        language_code,
    ));
    result.push('\n');

    push_ingredients(
        &mut result,
        &t_lang("list-alcohol", language_code),
        &recipe.alcohol_ingredients,
    );
    push_ingredients(
        &mut result,
        &t_lang("list-non-alcohol", language_code),
        &recipe.non_alcohol_ingredients,
    );
    push_labels(&mut result, &t_lang("list-garnishes", language_code), &recipe.garnishes);
    push_labels(&mut result, &t_lang("list-utensils", language_code), &recipe.utensils);

    result.push_str(&t_lang("list-steps", language_code));
    result.push('\n');
    for (i, step) in recipe.steps.iter().enumerate() {
        result.push_str(&format!(" {}. {}\n", i + 1, step));
    }

    result.push_str(RECIPE_SEPARATOR);
    result.push('\n');
    result
}

/// Render recipes in the given order as one text block
pub fn format_recipes(recipes: &[Recipe], language_code: Option<&str>) -> String {
    recipes
        .iter()
        .map(|recipe| format_recipe(recipe, language_code))
        .collect()
}

/// Render recipes as messages of at most `limit` characters each.
///
/// Messages break between recipes. A recipe longer than `limit` on its own is
/// broken between lines, and a single overlong line between characters.
/// Concatenating the messages gives [`format_recipes`].
pub fn format_recipe_messages(
    recipes: &[Recipe],
    language_code: Option<&str>,
    limit: usize,
) -> Vec<String> {
    let mut packer = MessagePacker::new(limit);

    for recipe in recipes {
        let block = format_recipe(recipe, language_code);
        if char_len(&block) <= limit {
            packer.push(&block);
            continue;
        }
        for line in block.split_inclusive('\n') {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(limit.max(1)) {
                packer.push(&piece.iter().collect::<String>());
            }
        }
    }

    packer.finish()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Appends pieces to the current message, starting a new one when a piece
/// would overflow it. Pieces never exceed the limit themselves.
struct MessagePacker {
    limit: usize,
    messages: Vec<String>,
    current: String,
    current_len: usize,
}

impl MessagePacker {
    fn new(limit: usize) -> Self {
        Self {
            limit,
            messages: Vec::new(),
            current: String::new(),
            current_len: 0,
        }
    }

    fn push(&mut self, piece: &str) {
        let piece_len = char_len(piece);
        if self.current_len > 0 && self.current_len + piece_len > self.limit {
            self.messages.push(std::mem::take(&mut self.current));
            self.current_len = 0;
        }
        self.current.push_str(piece);
        self.current_len += piece_len;
    }

    fn finish(mut self) -> Vec<String> {
        if !self.current.is_empty() {
            self.messages.push(self.current);
        }
        self.messages
    }
}
