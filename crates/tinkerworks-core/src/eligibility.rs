//! Crafting eligibility rules.
//!
//! A recipe is craftable when all four rules hold, checked in this order:
//!
//! 1. **Prerequisite**: the required upgrade, if any, is purchased.
//! 2. **Token cost**: the balance covers the cost, if any.
//! 3. **Blueprint**: at least one `blueprint:<BuildingType>` is held, if
//!    the recipe needs one.
//! 4. **Ingredients**: every `material:<id>` count meets the recipe.
//!
//! Evaluation stops at the first failing rule. Everything here is pure; the
//! same inputs always give the same answer.

use crate::catalog::Recipe;
use crate::inventory::{Inventory, PlayerState};
use std::collections::BTreeSet;

/// The first rule a recipe failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Ineligible {
    #[error("requires upgrade {upgrade}")]
    MissingPrerequisite { upgrade: String },

    #[error("needs {required} tokens, have {available}")]
    InsufficientTokens { required: u64, available: u64 },

    #[error("requires blueprint {building_type}")]
    MissingBlueprint { building_type: String },

    #[error("needs {required} {material}, have {available}")]
    InsufficientMaterial {
        material: String,
        required: u32,
        available: u32,
    },
}

/// Check every rule and report the first one that fails.
pub fn check_eligibility(
    recipe: &Recipe,
    inventory: &Inventory,
    tokens: u64,
    purchased_upgrades: &BTreeSet<String>,
) -> Result<(), Ineligible> {
    let result = evaluate(recipe, inventory, tokens, purchased_upgrades);
    if let Err(reason) = &result {
        tracing::trace!(recipe = %recipe.id, %reason, "recipe not craftable");
    }
    result
}

fn evaluate(
    recipe: &Recipe,
    inventory: &Inventory,
    tokens: u64,
    purchased_upgrades: &BTreeSet<String>,
) -> Result<(), Ineligible> {
    if let Some(upgrade) = &recipe.prerequisite
        && !purchased_upgrades.contains(upgrade)
    {
        return Err(Ineligible::MissingPrerequisite {
            upgrade: upgrade.clone(),
        });
    }

    if let Some(required) = recipe.token_cost
        && tokens < required
    {
        return Err(Ineligible::InsufficientTokens {
            required,
            available: tokens,
        });
    }

    if let Some(building_type) = &recipe.blueprint
        && inventory.blueprint_count(building_type) < 1
    {
        return Err(Ineligible::MissingBlueprint {
            building_type: building_type.clone(),
        });
    }

    for ingredient in &recipe.ingredients {
        let available = inventory.material_count(&ingredient.material);
        if available < ingredient.count {
            return Err(Ineligible::InsufficientMaterial {
                material: ingredient.material.clone(),
                required: ingredient.count,
                available,
            });
        }
    }

    Ok(())
}

/// Whether `recipe` can be crafted from the given snapshot.
pub fn can_craft(
    recipe: &Recipe,
    inventory: &Inventory,
    tokens: u64,
    purchased_upgrades: &BTreeSet<String>,
) -> bool {
    check_eligibility(recipe, inventory, tokens, purchased_upgrades).is_ok()
}

/// [`check_eligibility`] against a whole [`PlayerState`].
pub fn check_state(recipe: &Recipe, state: &PlayerState) -> Result<(), Ineligible> {
    check_eligibility(
        recipe,
        &state.inventory,
        state.tokens,
        &state.purchased_upgrades,
    )
}
