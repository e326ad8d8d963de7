//! End-to-end crafting table flows over the builtin catalog.
//!
//! Drives a [`CraftingSession`] the way the game client does: push a server
//! snapshot, query recipe status, craft, then reconcile with the next
//! snapshot.

use serde_json::json;
use std::sync::Arc;
use tinkerworks_core::catalog::{Catalog, RecipeCategory};
use tinkerworks_core::eligibility::{Ineligible, can_craft};
use tinkerworks_core::intent::{Intent, emit_craft};
use tinkerworks_core::session::{CraftError, CraftingSession, RecipeStatus};
use tinkerworks_core::test_utils::*;
use tinkerworks_core::wire::{InventoryItem, SnapshotUpdate};

fn builtin_session() -> CraftingSession {
    CraftingSession::new(Arc::new(Catalog::builtin()))
}

fn item(item_type: &str, count: u32) -> InventoryItem {
    InventoryItem {
        item_type: item_type.to_string(),
        count,
    }
}

fn remove(item_type: &str, count: u32) -> Intent {
    Intent::RemoveInventoryItem {
        item_type: item_type.to_string(),
        count,
    }
}

// ===========================================================================
// Apps
// ===========================================================================

#[test]
fn todo_app_craft_end_to_end() {
    let mut session = builtin_session();
    let changed = session.apply_snapshot(&SnapshotUpdate {
        inventory: vec![
            item("material:wood", 2),
            item("material:iron_powder", 1),
            item("blueprint:TodoApp", 1),
        ],
        tokens: 0,
        purchased_upgrades: Vec::new(),
    });
    assert!(changed);
    assert_eq!(
        session.recipe_status("app_todo"),
        Some(RecipeStatus::Craftable {
            crafted_before: false
        })
    );

    let intents = session.craft("app_todo").unwrap();
    assert_eq!(
        intents,
        vec![
            remove("material:wood", 2),
            remove("material:iron_powder", 1),
            Intent::CraftItem {
                recipe_id: "app_todo".to_string()
            },
            Intent::UnlockBuilding {
                building_id: "todo_app".to_string()
            },
        ]
    );

    let local = &session.local().inventory;
    assert_eq!(local.len(), 1);
    assert_eq!(local.blueprint_count("TodoApp"), 1);
    assert!(!local.contains("material:wood"));
    assert!(!local.contains("material:iron_powder"));
    assert_eq!(session.pending().len(), 1);

    // The server agrees with the projection: nothing visible changes.
    let changed = session.apply_snapshot(&SnapshotUpdate {
        inventory: vec![item("blueprint:TodoApp", 1)],
        ..Default::default()
    });
    assert!(!changed);
    assert!(session.pending().is_empty());
    assert!(matches!(
        session.recipe_status("app_todo"),
        Some(RecipeStatus::Locked {
            reason: Ineligible::InsufficientMaterial { .. },
            crafted_before: true
        })
    ));
}

#[test]
fn weather_dashboard_unlocks_snake_case_building() {
    let catalog = Catalog::builtin();
    let recipe = catalog.recipe_by_id("app_weather_dashboard").unwrap();
    let mut state = state_satisfying(recipe);
    let intents = emit_craft(recipe, &mut state, &mut Default::default());

    assert_eq!(
        intents.last(),
        Some(&Intent::UnlockBuilding {
            building_id: "weather_dashboard".to_string()
        })
    );
}

#[test]
fn blueprints_survive_every_app_craft() {
    let catalog = Catalog::builtin();
    for recipe in catalog.recipes_by_category(RecipeCategory::App) {
        let mut state = state_satisfying(recipe);
        let building_type = recipe.blueprint.as_deref().unwrap();
        emit_craft(recipe, &mut state, &mut Default::default());
        assert_eq!(
            state.inventory.blueprint_count(building_type),
            1,
            "{}",
            recipe.id
        );
    }
}

#[test]
fn intent_count_matches_ingredient_lines() {
    let catalog = Catalog::builtin();
    for recipe in catalog.recipes() {
        let mut state = state_satisfying(recipe);
        let intents = emit_craft(recipe, &mut state, &mut Default::default());
        assert_eq!(intents.len(), recipe.ingredients.len() + 2, "{}", recipe.id);
        assert!(state.inventory.iter().all(|(k, _)| !k.starts_with("material:")));
    }
}

// ===========================================================================
// Equipment
// ===========================================================================

#[test]
fn weapon_and_armour_follow_ups() {
    let mut session = builtin_session();
    session.replace_state(materials(&[
        ("wood", 10),
        ("iron_powder", 4),
    ]));

    let weapon = session.craft("weapon_process_terminator").unwrap();
    assert_eq!(
        weapon.last(),
        Some(&Intent::EquipWeapon {
            weapon_id: "ProcessTerminator".to_string()
        })
    );

    let armour = session.craft("armour_base_prompt").unwrap();
    assert_eq!(
        armour.last(),
        Some(&Intent::EquipArmor {
            armor_id: "BasePrompt".to_string()
        })
    );

    assert_eq!(session.local().inventory.material_count("wood"), 5);
    assert_eq!(session.local().inventory.material_count("iron_powder"), 2);
    assert_eq!(session.pending().len(), 2);
}

#[test]
fn crafting_beyond_local_stock_is_refused() {
    let mut session = builtin_session();
    session.replace_state(materials(&[("wood", 3)]));

    session.craft("armour_base_prompt").unwrap();
    let err = session.craft("armour_base_prompt").unwrap_err();
    assert!(matches!(
        err,
        CraftError::NotEligible {
            reason: Ineligible::InsufficientMaterial { available: 0, .. },
            ..
        }
    ));
}

// ===========================================================================
// Upgrades
// ===========================================================================

fn git_access_materials() -> SnapshotUpdate {
    SnapshotUpdate {
        inventory: vec![item("material:metal_ring", 5), item("material:ore_coin", 5)],
        tokens: 1_000,
        purchased_upgrades: Vec::new(),
    }
}

#[test]
fn git_access_needs_prerequisite() {
    let mut session = builtin_session();
    session.apply_snapshot(&git_access_materials());

    let recipe = session.catalog().recipe_by_id("upgrade_git_access").unwrap();
    let local = session.local();
    assert!(!can_craft(
        recipe,
        &local.inventory,
        local.tokens,
        &local.purchased_upgrades
    ));

    match session.craft("upgrade_git_access") {
        Err(CraftError::NotEligible { reason, .. }) => assert_eq!(
            reason,
            Ineligible::MissingPrerequisite {
                upgrade: "ExpandedContextWindow".to_string()
            }
        ),
        other => panic!("expected NotEligible, got {other:?}"),
    }
    assert!(session.pending().is_empty());
}

#[test]
fn git_access_purchase_and_stale_snapshot() {
    let mut session = builtin_session();
    let mut update = git_access_materials();
    update.tokens = 250;
    update.purchased_upgrades = vec!["ExpandedContextWindow".to_string()];
    session.apply_snapshot(&update);

    let intents = session.craft("upgrade_git_access").unwrap();
    assert_eq!(
        intents,
        vec![
            remove("material:metal_ring", 1),
            remove("material:ore_coin", 1),
            Intent::CraftItem {
                recipe_id: "upgrade_git_access".to_string()
            },
            Intent::PurchaseUpgrade {
                upgrade_id: "GitAccess".to_string()
            },
        ]
    );
    assert_eq!(session.local().tokens, 50);
    assert!(session.local().has_upgrade("GitAccess"));
    assert_eq!(
        session.recipe_status("upgrade_git_access"),
        Some(RecipeStatus::Owned)
    );
    assert!(matches!(
        session.craft("upgrade_git_access"),
        Err(CraftError::AlreadyPurchased(id)) if id == "GitAccess"
    ));

    // A snapshot taken before the server processed the craft wins anyway.
    assert!(session.apply_snapshot(&update));
    assert!(!session.local().has_upgrade("GitAccess"));
    assert_eq!(session.local().tokens, 250);
    assert_eq!(
        session.recipe_status("upgrade_git_access"),
        Some(RecipeStatus::Craftable {
            crafted_before: false
        })
    );
}

#[test]
fn tier_two_opens_after_tier_one() {
    let mut session = builtin_session();
    session.replace_state(with_upgrades(&[]));
    let catalog = Catalog::builtin();
    let tier_two: Vec<_> = catalog.upgrades_in_tier(2).collect();
    assert!(!tier_two.is_empty());

    for recipe in &tier_two {
        assert!(matches!(
            session.status_of(recipe),
            RecipeStatus::Locked {
                reason: Ineligible::MissingPrerequisite { .. },
                ..
            }
        ));
    }
}

// ===========================================================================
// Wire and persistence
// ===========================================================================

#[test]
fn intents_serialize_as_player_actions() {
    let mut session = builtin_session();
    session.replace_state(todo_app_ready());
    let intents = session.craft("app_todo").unwrap();

    assert_eq!(
        serde_json::to_value(&intents).unwrap(),
        json!([
            {"RemoveInventoryItem": {"item_type": "material:wood", "count": 2}},
            {"RemoveInventoryItem": {"item_type": "material:iron_powder", "count": 1}},
            {"CraftItem": {"recipe_id": "app_todo"}},
            {"UnlockBuilding": {"building_id": "todo_app"}},
        ])
    );
}

#[test]
fn snapshot_from_server_json() {
    let update: SnapshotUpdate = serde_json::from_value(json!({
        "inventory": [
            {"item_type": "material:wood", "count": 2},
            {"item_type": "material:iron_powder", "count": 1},
            {"item_type": "blueprint:TodoApp", "count": 1},
            {"item_type": "token", "count": 9}
        ],
        "tokens": -5,
        "purchased_upgrades": []
    }))
    .unwrap();

    let mut session = builtin_session();
    session.apply_snapshot(&update);
    assert_eq!(session.local().tokens, 0);
    assert!(session.recipe_status("app_todo").unwrap().is_craftable());
}

#[test]
fn crafted_badges_survive_reload() {
    let mut session = builtin_session();
    session.replace_state(todo_app_ready());
    session.craft("app_todo").unwrap();
    let saved = session.save_crafted().unwrap();

    let mut reloaded = builtin_session();
    reloaded.restore_crafted(&saved).unwrap();
    assert!(reloaded.crafted().contains("app_todo"));
    assert!(matches!(
        reloaded.recipe_status("app_todo"),
        Some(RecipeStatus::Locked {
            crafted_before: true,
            ..
        })
    ));
}
