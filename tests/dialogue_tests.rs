use barkeep::dialogue::{Draft, DraftStep, RecipeDialogueState, Transition};
use barkeep::recipe_model::Ingredient;

/// Walk a draft through every step with pure transitions
#[test]
fn test_draft_walkthrough() {
    let mut draft = Draft::new(7);
    let script = [
        ("Old Fashioned", Transition::Advanced(DraftStep::Description)),
        ("Spirit forward", Transition::Advanced(DraftStep::AlcoholIngredients)),
        ("Bourbon: 60ml", Transition::Accepted),
        ("Bourbon 60ml", Transition::Ignored),
        ("done", Transition::Advanced(DraftStep::NonAlcoholIngredients)),
        ("Sugar cube: 1", Transition::Accepted),
        ("Bitters: 2 dashes", Transition::Accepted),
        ("done", Transition::Advanced(DraftStep::Garnishes)),
        ("Orange peel", Transition::Accepted),
        ("done", Transition::Advanced(DraftStep::Utensils)),
        ("Rocks glass", Transition::Accepted),
        ("done", Transition::Advanced(DraftStep::Steps)),
        ("Muddle sugar with bitters", Transition::Accepted),
        ("Add bourbon and ice, stir", Transition::Accepted),
        ("done", Transition::Advanced(DraftStep::Confirm)),
        ("looks good", Transition::Ignored),
        ("done", Transition::Complete),
    ];

    for (input, expected) in script {
        assert_eq!(draft.apply(input), expected, "input {input:?}");
    }

    let recipe = &draft.recipe;
    assert_eq!(recipe.id, None);
    assert_eq!(recipe.owner, 7);
    assert_eq!(recipe.name, "Old Fashioned");
    assert_eq!(recipe.alcohol_ingredients, vec![Ingredient::new("Bourbon", "60ml")]);
    assert_eq!(recipe.non_alcohol_ingredients.len(), 2);
    assert_eq!(recipe.garnishes, vec!["Orange peel"]);
    assert_eq!(recipe.utensils, vec!["Rocks glass"]);
    assert_eq!(
        recipe.steps,
        vec!["Muddle sugar with bitters", "Add bourbon and ice, stir"]
    );
}

/// Completing does not move the draft off the terminal step
#[test]
fn test_complete_is_repeatable() {
    let mut draft = Draft {
        step: DraftStep::Confirm,
        ..Draft::new(1)
    };

    assert_eq!(draft.apply("done"), Transition::Complete);
    assert_eq!(draft.apply("done"), Transition::Complete);
    assert_eq!(draft.step, DraftStep::Confirm);
}

#[test]
fn test_dialogue_default_state() {
    assert!(matches!(
        RecipeDialogueState::default(),
        RecipeDialogueState::Idle
    ));
}
