//! Shared test helpers for unit and integration tests.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]`.

use crate::catalog::{Ingredient, Recipe, RecipeCategory};
use crate::inventory::{Inventory, PlayerState};
use crate::item_type::ItemType;

// ===========================================================================
// Inventories
// ===========================================================================

/// Inventory from raw `(item_type, count)` pairs.
pub fn inventory(entries: &[(&str, u32)]) -> Inventory {
    entries.iter().map(|&(k, v)| (k.to_string(), v)).collect()
}

/// A player holding only the given materials.
pub fn materials(entries: &[(&str, u32)]) -> PlayerState {
    PlayerState {
        inventory: entries
            .iter()
            .map(|&(id, n)| (ItemType::material(id).to_string(), n))
            .collect(),
        ..Default::default()
    }
}

/// A player who owns the given upgrades and nothing else.
pub fn with_upgrades(ids: &[&str]) -> PlayerState {
    PlayerState {
        purchased_upgrades: ids.iter().map(|s| s.to_string()).collect(),
        ..Default::default()
    }
}

/// Exactly what `app_todo` needs.
pub fn todo_app_ready() -> PlayerState {
    PlayerState {
        inventory: inventory(&[
            ("material:wood", 2),
            ("material:iron_powder", 1),
            ("blueprint:TodoApp", 1),
        ]),
        ..Default::default()
    }
}

/// The minimal state satisfying every rule of `recipe`.
pub fn state_satisfying(recipe: &Recipe) -> PlayerState {
    let mut state = PlayerState::default();
    for Ingredient { material, count } in &recipe.ingredients {
        state
            .inventory
            .add(&ItemType::material(material).to_string(), *count);
    }
    if let Some(building_type) = &recipe.blueprint {
        state
            .inventory
            .add(&ItemType::blueprint(building_type).to_string(), 1);
    }
    state.tokens = recipe.token_cost.unwrap_or(0);
    if let Some(prerequisite) = &recipe.prerequisite {
        state.purchased_upgrades.insert(prerequisite.clone());
    }
    state
}

// ===========================================================================
// Recipes
// ===========================================================================

/// A recipe with no requirements.
pub fn free_recipe(id: &str, category: RecipeCategory) -> Recipe {
    Recipe {
        id: id.to_string(),
        category,
        name: id.to_string(),
        description: String::new(),
        result: "FreeThing".to_string(),
        ingredients: Vec::new(),
        blueprint: None,
        token_cost: None,
        prerequisite: None,
        tier: None,
    }
}
