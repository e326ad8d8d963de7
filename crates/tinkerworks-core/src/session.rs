//! Optimistic crafting state for one player.
//!
//! The session keeps two copies of the player state. `confirmed` is the last
//! snapshot pushed by the server; `local` is `confirmed` with every pending
//! craft applied on top, and is what the crafting UI reads. Each call to
//! [`CraftingSession::apply_snapshot`] replaces both wholesale and drops the
//! pending list: the server's view always wins.

use crate::catalog::{Catalog, Recipe, RecipeCategory};
use crate::eligibility::{Ineligible, check_state};
use crate::intent::{Intent, emit_craft};
use crate::inventory::PlayerState;
use crate::serialize::{self, DeserializeError, SerializeError};
use crate::wire::SnapshotUpdate;
use std::collections::BTreeSet;
use std::sync::Arc;

/// A craft applied locally whose intents have been handed out but which no
/// authoritative snapshot has reflected yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCraft {
    pub recipe_id: String,
    pub intents: Vec<Intent>,
}

/// How the crafting table should render a recipe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeStatus {
    /// Upgrade already purchased. Cannot be crafted again.
    Owned,
    /// All rules pass. `crafted_before` drives the "CRAFTED" badge.
    Craftable { crafted_before: bool },
    /// A rule fails.
    Locked {
        reason: Ineligible,
        crafted_before: bool,
    },
}

impl RecipeStatus {
    pub fn is_craftable(&self) -> bool {
        matches!(self, RecipeStatus::Craftable { .. })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CraftError {
    #[error("unknown recipe: {0}")]
    UnknownRecipe(String),

    #[error("recipe {recipe} is not craftable: {reason}")]
    NotEligible { recipe: String, reason: Ineligible },

    #[error("upgrade {0} is already purchased")]
    AlreadyPurchased(String),
}

/// Crafting state for one player session.
#[derive(Debug, Clone)]
pub struct CraftingSession {
    catalog: Arc<Catalog>,
    confirmed: PlayerState,
    local: PlayerState,
    pending: Vec<PendingCraft>,
    crafted: BTreeSet<String>,
}

impl CraftingSession {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self::with_state(catalog, PlayerState::default())
    }

    pub fn with_state(catalog: Arc<Catalog>, state: PlayerState) -> Self {
        Self {
            catalog,
            confirmed: state.clone(),
            local: state,
            pending: Vec::new(),
            crafted: BTreeSet::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Last authoritative state.
    pub fn confirmed(&self) -> &PlayerState {
        &self.confirmed
    }

    /// Authoritative state plus pending crafts.
    pub fn local(&self) -> &PlayerState {
        &self.local
    }

    pub fn pending(&self) -> &[PendingCraft] {
        &self.pending
    }

    pub fn crafted(&self) -> &BTreeSet<String> {
        &self.crafted
    }

    // -- Authoritative updates --

    /// Replace the session state with a server snapshot. Pending crafts are
    /// dropped. Returns `true` if the state the UI reads changed.
    pub fn apply_snapshot(&mut self, update: &SnapshotUpdate) -> bool {
        self.replace_state(PlayerState::from(update))
    }

    /// [`apply_snapshot`](Self::apply_snapshot) for an already converted state.
    pub fn replace_state(&mut self, state: PlayerState) -> bool {
        if !self.pending.is_empty() {
            tracing::debug!(
                dropped = self.pending.len(),
                "authoritative snapshot replaces pending crafts"
            );
            self.pending.clear();
        }

        let changed = self.local != state;
        self.confirmed = state.clone();
        self.local = state;
        changed
    }

    /// Replace the crafted-recipe set wholesale.
    pub fn set_crafted(&mut self, crafted: impl IntoIterator<Item = String>) {
        self.crafted = crafted.into_iter().collect();
    }

    // -- Queries --

    /// Whether a recipe has been crafted. For upgrades this is read from the
    /// purchased set, not the crafted set.
    pub fn is_crafted(&self, recipe: &Recipe) -> bool {
        match recipe.category {
            RecipeCategory::Upgrade => self.local.has_upgrade(&recipe.result),
            _ => self.crafted.contains(&recipe.id),
        }
    }

    /// Render status of a recipe, or `None` if the id is unknown.
    pub fn recipe_status(&self, recipe_id: &str) -> Option<RecipeStatus> {
        let recipe = self.catalog.recipe_by_id(recipe_id)?;
        Some(self.status_of(recipe))
    }

    pub fn status_of(&self, recipe: &Recipe) -> RecipeStatus {
        let crafted_before = self.is_crafted(recipe);
        if recipe.category == RecipeCategory::Upgrade && crafted_before {
            return RecipeStatus::Owned;
        }
        match check_state(recipe, &self.local) {
            Ok(()) => RecipeStatus::Craftable { crafted_before },
            Err(reason) => RecipeStatus::Locked {
                reason,
                crafted_before,
            },
        }
    }

    /// Recipes of a category that can be crafted right now, in declaration
    /// order.
    pub fn craftable(&self, category: RecipeCategory) -> Vec<&Recipe> {
        self.catalog
            .recipes_by_category(category)
            .filter(|r| self.status_of(r).is_craftable())
            .collect()
    }

    // -- Crafting --

    /// Re-check eligibility against the local state, then apply the craft
    /// locally and return the intents to dispatch.
    pub fn craft(&mut self, recipe_id: &str) -> Result<Vec<Intent>, CraftError> {
        let catalog = Arc::clone(&self.catalog);
        let recipe = catalog
            .recipe_by_id(recipe_id)
            .ok_or_else(|| CraftError::UnknownRecipe(recipe_id.to_string()))?;

        if recipe.category == RecipeCategory::Upgrade && self.local.has_upgrade(&recipe.result) {
            return Err(CraftError::AlreadyPurchased(recipe.result.clone()));
        }

        check_state(recipe, &self.local).map_err(|reason| CraftError::NotEligible {
            recipe: recipe.id.clone(),
            reason,
        })?;

        let intents = emit_craft(recipe, &mut self.local, &mut self.crafted);
        self.pending.push(PendingCraft {
            recipe_id: recipe.id.clone(),
            intents: intents.clone(),
        });
        Ok(intents)
    }

    // -- Persistence --

    /// Encode the crafted-recipe set for local storage.
    pub fn save_crafted(&self) -> Result<Vec<u8>, SerializeError> {
        serialize::encode_crafted(&self.crafted)
    }

    /// Restore a crafted-recipe set saved by [`save_crafted`](Self::save_crafted).
    /// Unknown recipe ids are discarded.
    pub fn restore_crafted(&mut self, data: &[u8]) -> Result<(), DeserializeError> {
        let saved = serialize::decode_crafted(data)?;
        let before = saved.len();
        self.crafted = saved
            .into_iter()
            .filter(|id| self.catalog.recipe_by_id(id).is_some())
            .collect();
        if self.crafted.len() < before {
            tracing::info!(
                discarded = before - self.crafted.len(),
                "dropped crafted entries for unknown recipes"
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::*;

    fn session(state: PlayerState) -> CraftingSession {
        CraftingSession::with_state(Arc::new(Catalog::builtin()), state)
    }

    #[test]
    fn craft_updates_local_but_not_confirmed() {
        let mut s = session(todo_app_ready());
        let intents = s.craft("app_todo").unwrap();

        assert_eq!(intents.len(), 4);
        assert_eq!(s.local().inventory.material_count("wood"), 0);
        assert_eq!(s.confirmed().inventory.material_count("wood"), 2);
        assert_eq!(s.pending().len(), 1);
        assert_eq!(s.pending()[0].recipe_id, "app_todo");
        assert!(s.crafted().contains("app_todo"));
    }

    #[test]
    fn craft_rejects_ineligible_recipe() {
        let mut s = session(PlayerState::default());
        let err = s.craft("app_todo").unwrap_err();
        assert!(matches!(
            err,
            CraftError::NotEligible {
                reason: Ineligible::MissingBlueprint { .. },
                ..
            }
        ));
        assert!(s.pending().is_empty());
        assert!(s.crafted().is_empty());
    }

    #[test]
    fn craft_rejects_unknown_recipe() {
        let mut s = session(PlayerState::default());
        assert!(matches!(
            s.craft("app_nope"),
            Err(CraftError::UnknownRecipe(id)) if id == "app_nope"
        ));
    }

    #[test]
    fn second_craft_sees_first_deltas() {
        let mut state = todo_app_ready();
        state.inventory.add("material:wood", 2);
        state.inventory.add("material:iron_powder", 1);
        let mut s = session(state);

        s.craft("app_todo").unwrap();
        s.craft("app_todo").unwrap();
        assert!(s.craft("app_todo").is_err());
        assert_eq!(s.pending().len(), 2);
        assert_eq!(s.local().inventory.blueprint_count("TodoApp"), 1);
    }

    #[test]
    fn upgrade_cannot_be_bought_twice() {
        let mut state = materials(&[("copper_wire", 5)]);
        state.tokens = 500;
        let mut s = session(state);

        s.craft("upgrade_verbose_logging").unwrap();
        assert_eq!(
            s.recipe_status("upgrade_verbose_logging"),
            Some(RecipeStatus::Owned)
        );
        assert!(matches!(
            s.craft("upgrade_verbose_logging"),
            Err(CraftError::AlreadyPurchased(id)) if id == "VerboseLogging"
        ));
    }

    #[test]
    fn snapshot_replaces_everything() {
        let mut s = session(todo_app_ready());
        s.craft("app_todo").unwrap();

        let changed = s.apply_snapshot(&SnapshotUpdate {
            inventory: Vec::new(),
            tokens: 10,
            purchased_upgrades: vec!["TokenCompression".to_string()],
        });

        assert!(changed);
        assert!(s.pending().is_empty());
        assert_eq!(s.local(), s.confirmed());
        assert_eq!(s.local().tokens, 10);
        assert!(s.local().inventory.is_empty());
        // The crafted set is local bookkeeping and survives snapshots.
        assert!(s.crafted().contains("app_todo"));
    }

    #[test]
    fn identical_snapshot_reports_no_change() {
        let update = SnapshotUpdate {
            tokens: 42,
            ..Default::default()
        };
        let mut s = session(PlayerState::default());
        assert!(s.apply_snapshot(&update));
        assert!(!s.apply_snapshot(&update));
    }

    #[test]
    fn snapshot_matching_optimistic_state_is_not_a_change() {
        let mut s = session(todo_app_ready());
        s.craft("app_todo").unwrap();
        let projected = s.local().clone();
        assert!(!s.replace_state(projected));
        assert!(s.pending().is_empty());
    }

    #[test]
    fn status_tracks_crafted_badge() {
        let mut s = session(todo_app_ready());
        assert_eq!(
            s.recipe_status("app_todo"),
            Some(RecipeStatus::Craftable {
                crafted_before: false
            })
        );
        s.craft("app_todo").unwrap();
        assert!(matches!(
            s.recipe_status("app_todo"),
            Some(RecipeStatus::Locked {
                crafted_before: true,
                ..
            })
        ));
        assert_eq!(s.recipe_status("nope"), None);
    }

    #[test]
    fn upgrade_crafted_state_follows_purchases() {
        let mut s = session(PlayerState::default());
        s.set_crafted(["upgrade_git_access".to_string()]);
        let recipe = s.catalog().recipe_by_id("upgrade_git_access").unwrap().clone();
        assert!(!s.is_crafted(&recipe));

        s.replace_state(with_upgrades(&["GitAccess"]));
        assert!(s.is_crafted(&recipe));
    }

    #[test]
    fn craftable_lists_in_declaration_order() {
        let mut state = materials(&[("wood", 10), ("iron_powder", 10), ("crystal_shard", 1)]);
        state.tokens = 0;
        let s = session(state);
        let ids: Vec<&str> = s
            .craftable(RecipeCategory::Weapon)
            .into_iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["weapon_process_terminator", "weapon_flare"]);
    }

    #[test]
    fn crafted_set_round_trips_through_storage() {
        let mut s = session(todo_app_ready());
        s.craft("app_todo").unwrap();
        let bytes = s.save_crafted().unwrap();

        let mut restored = session(PlayerState::default());
        restored.restore_crafted(&bytes).unwrap();
        assert_eq!(restored.crafted(), s.crafted());
    }

    #[test]
    fn restore_drops_unknown_recipes() {
        let mut s = session(PlayerState::default());
        s.set_crafted(["app_todo".to_string(), "app_retired".to_string()]);
        let bytes = s.save_crafted().unwrap();

        let mut restored = session(PlayerState::default());
        restored.restore_crafted(&bytes).unwrap();
        assert_eq!(restored.crafted().len(), 1);
        assert!(restored.crafted().contains("app_todo"));
    }
}
