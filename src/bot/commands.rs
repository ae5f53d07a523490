//! Command classification for inbound text

use regex::Regex;
use std::sync::LazyLock;

static COMMAND_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/([A-Za-z0-9_]*)(?:@[A-Za-z0-9_]+)?(?:\s|$)").expect("command pattern is valid")
});

/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    ListRecipes,
    AddRecipe,
    Cancel,
    /// Any other `/token`
    Unknown(String),
}

impl Command {
    /// Classify a message. Returns `None` for free text.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim_start();
        if !text.starts_with('/') {
            return None;
        }

        let Some(captures) = COMMAND_PATTERN.captures(text) else {
            let token = text.split_whitespace().next().unwrap_or(text);
            return Some(Command::Unknown(token.trim_start_matches('/').to_string()));
        };
        let name = captures
            .get(1)
            .map(|m| m.as_str().to_ascii_lowercase())
            .unwrap_or_default();

        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "get_recipes" | "list_recipes" => Command::ListRecipes,
            "add_recipe" | "new_recipe" => Command::AddRecipe,
            "cancel" => Command::Cancel,
            _ => Command::Unknown(name),
        })
    }

    /// Short name used in logs
    pub fn name(&self) -> &str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::ListRecipes => "get_recipes",
            Command::AddRecipe => "add_recipe",
            Command::Cancel => "cancel",
            Command::Unknown(name) => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/help"), Some(Command::Help));
        assert_eq!(Command::parse("/get_recipes"), Some(Command::ListRecipes));
        assert_eq!(Command::parse("/list_recipes"), Some(Command::ListRecipes));
        assert_eq!(Command::parse("/add_recipe"), Some(Command::AddRecipe));
        assert_eq!(Command::parse("/new_recipe"), Some(Command::AddRecipe));
        assert_eq!(Command::parse("/cancel"), Some(Command::Cancel));
    }

    #[test]
    fn test_bot_mention_and_arguments() {
        assert_eq!(Command::parse("/start@barkeep_bot"), Some(Command::Start));
        assert_eq!(Command::parse("/ADD_RECIPE now"), Some(Command::AddRecipe));
    }

    #[test]
    fn test_unknown_commands() {
        assert_eq!(
            Command::parse("/shake"),
            Some(Command::Unknown("shake".to_string()))
        );
        assert_eq!(
            Command::parse("/café"),
            Some(Command::Unknown("café".to_string()))
        );
        assert_eq!(Command::parse("/"), Some(Command::Unknown(String::new())));
    }

    #[test]
    fn test_free_text_is_not_a_command() {
        assert_eq!(Command::parse("Mojito"), None);
        assert_eq!(Command::parse("Rum:50ml"), None);
        assert_eq!(Command::parse("done"), None);
        assert_eq!(Command::parse("1/2 lime"), None);
    }
}
