//! Tinkerworks Core -- crafting and unlock rules for the game client.
//!
//! The crafting table asks two questions of this crate: can the player
//! craft this recipe right now, and what happens when they do.
//!
//! # Flow
//!
//! 1. The session layer pushes a server snapshot into a
//!    [`session::CraftingSession`] (inventory, tokens, purchased upgrades).
//! 2. The UI asks [`session::CraftingSession::recipe_status`] (or calls
//!    [`eligibility::can_craft`] directly) for each recipe on screen.
//! 3. On confirmation, [`session::CraftingSession::craft`] applies the craft
//!    to the local projection and returns the [`intent::Intent`]s to send.
//! 4. The next server snapshot replaces the local projection wholesale.
//!
//! # Key Types
//!
//! - [`catalog::Catalog`] -- Immutable materials, blueprints and recipes
//!   with keyed lookups. [`catalog::Catalog::builtin`] holds the shipped data.
//! - [`inventory::Inventory`] / [`inventory::PlayerState`] -- Snapshot of
//!   what the player holds.
//! - [`eligibility`] -- The four crafting rules.
//! - [`intent::emit_craft`] -- Craft to intents plus local deltas.
//! - [`item_type::ItemType`] -- `material:<id>` / `blueprint:<Type>` keys.

pub mod builtin;
pub mod catalog;
pub mod eligibility;
pub mod intent;
pub mod inventory;
pub mod item_type;
pub mod serialize;
pub mod session;
pub mod wire;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use catalog::{Catalog, Recipe, RecipeCategory};
pub use eligibility::{Ineligible, can_craft};
pub use intent::{Intent, emit_craft};
pub use inventory::{Inventory, PlayerState};
pub use session::{CraftError, CraftingSession, RecipeStatus};
