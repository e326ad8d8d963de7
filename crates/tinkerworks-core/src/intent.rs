//! Turning an approved craft into outbound intents.
//!
//! [`emit_craft`] applies the craft to a local copy of the player state and
//! returns the actions the session layer must dispatch, in order:
//!
//! 1. one `RemoveInventoryItem` per ingredient line,
//! 2. one `CraftItem`,
//! 3. one follow-up determined by the recipe category.
//!
//! Token spend has no intent of its own; the server derives it from
//! `CraftItem`. Blueprints are never touched.

use crate::catalog::{Recipe, RecipeCategory};
use crate::inventory::PlayerState;
use crate::item_type::{ItemType, building_id};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An action for the game server. Serialized in the server's `PlayerAction`
/// shape, e.g. `{"CraftItem":{"recipe_id":"app_todo"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Intent {
    RemoveInventoryItem { item_type: String, count: u32 },
    CraftItem { recipe_id: String },
    EquipWeapon { weapon_id: String },
    EquipArmor { armor_id: String },
    PurchaseUpgrade { upgrade_id: String },
    UnlockBuilding { building_id: String },
}

impl Intent {
    /// Short name of the variant, for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Intent::RemoveInventoryItem { .. } => "remove_inventory_item",
            Intent::CraftItem { .. } => "craft_item",
            Intent::EquipWeapon { .. } => "equip_weapon",
            Intent::EquipArmor { .. } => "equip_armor",
            Intent::PurchaseUpgrade { .. } => "purchase_upgrade",
            Intent::UnlockBuilding { .. } => "unlock_building",
        }
    }
}

/// Apply `recipe` to `state` and `crafted`, returning the intents to send.
///
/// Does not check eligibility. Calling this on a recipe that fails
/// [`crate::eligibility::can_craft`] still emits every intent and floors
/// local counts at zero.
pub fn emit_craft(
    recipe: &Recipe,
    state: &mut PlayerState,
    crafted: &mut BTreeSet<String>,
) -> Vec<Intent> {
    let mut intents = Vec::with_capacity(recipe.ingredients.len() + 2);

    for ingredient in &recipe.ingredients {
        let item_type = ItemType::material(&ingredient.material).to_string();
        state.inventory.remove_floor(&item_type, ingredient.count);
        intents.push(Intent::RemoveInventoryItem {
            item_type,
            count: ingredient.count,
        });
    }

    if let Some(cost) = recipe.token_cost {
        state.tokens = state.tokens.saturating_sub(cost);
    }

    intents.push(Intent::CraftItem {
        recipe_id: recipe.id.clone(),
    });
    crafted.insert(recipe.id.clone());

    let follow = follow_up(recipe, state);
    tracing::debug!(
        recipe = %recipe.id,
        category = %recipe.category,
        follow_up = follow.kind(),
        intents = intents.len() + 1,
        "emitted craft intents"
    );
    intents.push(follow);
    intents
}

fn follow_up(recipe: &Recipe, state: &mut PlayerState) -> Intent {
    match recipe.category {
        RecipeCategory::Weapon => Intent::EquipWeapon {
            weapon_id: recipe.result.clone(),
        },
        RecipeCategory::Armour => Intent::EquipArmor {
            armor_id: recipe.result.clone(),
        },
        RecipeCategory::Upgrade => {
            state.purchased_upgrades.insert(recipe.result.clone());
            Intent::PurchaseUpgrade {
                upgrade_id: recipe.result.clone(),
            }
        }
        RecipeCategory::App => Intent::UnlockBuilding {
            // Empty results never pass catalog validation.
            building_id: building_id(&recipe.result).unwrap_or_default(),
        },
    }
}
