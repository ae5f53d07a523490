//! # Recipe Data Model
//!
//! Structures shared by conversation drafts and persisted recipes. The same
//! [`Recipe`] type is used for both: drafts carry `id: None`, recipes read
//! back from the store carry the identifier assigned on insert.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A named quantity of one ingredient, e.g. `Rum: 50ml`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub quantity: String,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, quantity: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            quantity: quantity.into(),
        }
    }

    /// Parse a `"<name>:<quantity>"` line.
    ///
    /// Returns `None` unless the line splits into exactly two colon-separated
    /// parts. Both parts are trimmed.
    pub fn parse(line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split(':').collect();
        match parts.as_slice() {
            [name, quantity] => Some(Self::new(name.trim(), quantity.trim())),
            _ => None,
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.quantity)
    }
}

/// A cocktail recipe with its five dependent collections
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Assigned by the store on creation
    pub id: Option<i64>,
    /// Chat identity of the author
    pub owner: i64,
    pub name: String,
    pub description: String,
    pub alcohol_ingredients: Vec<Ingredient>,
    pub non_alcohol_ingredients: Vec<Ingredient>,
    pub garnishes: Vec<String>,
    pub utensils: Vec<String>,
    /// Display order is step order; persisted with 1-based step numbers
    pub steps: Vec<String>,
}

impl Recipe {
    /// Empty draft owned by the given chat
    pub fn draft(owner: i64) -> Self {
        Self {
            owner,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ingredient_line() {
        let ingredient = Ingredient::parse("Rum:50ml").unwrap();
        assert_eq!(ingredient, Ingredient::new("Rum", "50ml"));

        let ingredient = Ingredient::parse("  Lime juice :  25 ml ").unwrap();
        assert_eq!(ingredient.name, "Lime juice");
        assert_eq!(ingredient.quantity, "25 ml");
    }

    #[test]
    fn test_parse_ingredient_rejects_malformed_lines() {
        assert!(Ingredient::parse("Rum-50ml").is_none());
        assert!(Ingredient::parse("Rum:50:ml").is_none());
        assert!(Ingredient::parse("").is_none());
    }

    #[test]
    fn test_parse_ingredient_allows_empty_parts() {
        let ingredient = Ingredient::parse("Bitters:").unwrap();
        assert_eq!(ingredient.name, "Bitters");
        assert_eq!(ingredient.quantity, "");
    }

    #[test]
    fn test_draft_has_no_id() {
        let draft = Recipe::draft(42);
        assert_eq!(draft.id, None);
        assert_eq!(draft.owner, 42);
        assert!(draft.steps.is_empty());
    }
}
