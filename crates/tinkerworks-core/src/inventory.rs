use crate::item_type::ItemType;
use crate::wire::InventoryItem;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Item counts keyed by item-type string (`material:wood`, `blueprint:TodoApp`).
///
/// Zero counts are never stored: a key is either present with a positive
/// count or absent. Serialized as a plain map; deserialization goes through
/// [`Inventory::add`], so zero entries in the input are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct Inventory {
    counts: BTreeMap<String, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a wire list. Duplicate item types are summed.
    pub fn from_items<'a>(items: impl IntoIterator<Item = &'a InventoryItem>) -> Self {
        let mut inv = Self::new();
        for item in items {
            inv.add(&item.item_type, item.count);
        }
        inv
    }

    /// Current count of an item type, 0 if absent.
    pub fn count(&self, item_type: &str) -> u32 {
        self.counts.get(item_type).copied().unwrap_or(0)
    }

    pub fn count_of(&self, item_type: &ItemType) -> u32 {
        self.count(&item_type.to_string())
    }

    pub fn material_count(&self, material_id: &str) -> u32 {
        self.count_of(&ItemType::material(material_id))
    }

    pub fn blueprint_count(&self, building_type: &str) -> u32 {
        self.count_of(&ItemType::blueprint(building_type))
    }

    /// Add items, saturating at `u32::MAX`. Adding zero is a no-op.
    pub fn add(&mut self, item_type: &str, count: u32) {
        if count == 0 {
            return;
        }
        let entry = self.counts.entry(item_type.to_string()).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    /// Decrement by `count`, flooring at zero and deleting the key when it
    /// reaches zero. Returns the amount actually removed.
    pub fn remove_floor(&mut self, item_type: &str, count: u32) -> u32 {
        let Some(current) = self.counts.get_mut(item_type) else {
            return 0;
        };
        let removed = count.min(*current);
        *current -= removed;
        if *current == 0 {
            self.counts.remove(item_type);
        }
        removed
    }

    pub fn contains(&self, item_type: &str) -> bool {
        self.counts.contains_key(item_type)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Entries sorted by item type.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Sorted wire list, suitable for sending back to the session layer.
    pub fn to_items(&self) -> Vec<InventoryItem> {
        self.iter()
            .map(|(item_type, count)| InventoryItem {
                item_type: item_type.to_string(),
                count,
            })
            .collect()
    }
}

impl FromIterator<(String, u32)> for Inventory {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        let mut inv = Inventory::new();
        for (item_type, count) in iter {
            inv.add(&item_type, count);
        }
        inv
    }
}

impl From<BTreeMap<String, u32>> for Inventory {
    fn from(counts: BTreeMap<String, u32>) -> Self {
        counts.into_iter().collect()
    }
}

impl From<Inventory> for BTreeMap<String, u32> {
    fn from(inventory: Inventory) -> Self {
        inventory.counts
    }
}

/// Everything the eligibility rules read about the player.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub inventory: Inventory,
    pub tokens: u64,
    pub purchased_upgrades: BTreeSet<String>,
}

impl PlayerState {
    pub fn new(inventory: Inventory, tokens: u64, purchased_upgrades: BTreeSet<String>) -> Self {
        Self {
            inventory,
            tokens,
            purchased_upgrades,
        }
    }

    pub fn has_upgrade(&self, upgrade_id: &str) -> bool {
        self.purchased_upgrades.contains(upgrade_id)
    }
}
