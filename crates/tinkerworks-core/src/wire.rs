//! Types exchanged with the game server.

use crate::inventory::{Inventory, PlayerState};
use serde::{Deserialize, Serialize};

/// One inventory line as the server sends it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    /// `material:<id>`, `blueprint:<BuildingType>`, `token`, ...
    pub item_type: String,
    pub count: u32,
}

/// The crafting-relevant slice of a server state update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotUpdate {
    #[serde(default)]
    pub inventory: Vec<InventoryItem>,
    /// Signed on the wire; negative balances are treated as zero.
    #[serde(default)]
    pub tokens: i64,
    #[serde(default)]
    pub purchased_upgrades: Vec<String>,
}

impl From<&SnapshotUpdate> for PlayerState {
    fn from(update: &SnapshotUpdate) -> Self {
        PlayerState {
            inventory: Inventory::from_items(&update.inventory),
            tokens: u64::try_from(update.tokens).unwrap_or(0),
            purchased_upgrades: update.purchased_upgrades.iter().cloned().collect(),
        }
    }
}
