//! Namespaced inventory item-type strings.
//!
//! The session layer keys inventory counts by plain strings of the form
//! `material:<material_id>` or `blueprint:<BuildingType>`. Chest rewards also
//! use the bare `token` key. [`ItemType`] is the typed view of those strings;
//! it parses and formats them losslessly so anything the core does not
//! understand is carried through untouched.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Prefix of material item-type strings.
pub const MATERIAL_PREFIX: &str = "material:";

/// Prefix of blueprint item-type strings.
pub const BLUEPRINT_PREFIX: &str = "blueprint:";

/// Item-type key used for token rewards.
pub const TOKEN_KEY: &str = "token";

/// A parsed inventory item-type key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ItemType {
    /// `material:<id>`
    Material(String),
    /// `blueprint:<BuildingType>`, PascalCase building type.
    Blueprint(String),
    /// `token`
    Token,
    /// Anything else. Kept verbatim.
    Other(String),
}

impl ItemType {
    /// Item type for a material id.
    pub fn material(id: impl Into<String>) -> Self {
        ItemType::Material(id.into())
    }

    /// Item type for the blueprint of a building type.
    pub fn blueprint(building_type: impl Into<String>) -> Self {
        ItemType::Blueprint(building_type.into())
    }

    /// Parse an item-type string. Never fails; unknown shapes become
    /// [`ItemType::Other`].
    pub fn parse(raw: &str) -> Self {
        if let Some(id) = raw.strip_prefix(MATERIAL_PREFIX) {
            ItemType::Material(id.to_string())
        } else if let Some(building) = raw.strip_prefix(BLUEPRINT_PREFIX) {
            ItemType::Blueprint(building.to_string())
        } else if raw == TOKEN_KEY {
            ItemType::Token
        } else {
            ItemType::Other(raw.to_string())
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemType::Material(id) => write!(f, "{MATERIAL_PREFIX}{id}"),
            ItemType::Blueprint(building) => write!(f, "{BLUEPRINT_PREFIX}{building}"),
            ItemType::Token => f.write_str(TOKEN_KEY),
            ItemType::Other(raw) => f.write_str(raw),
        }
    }
}

impl From<String> for ItemType {
    fn from(raw: String) -> Self {
        ItemType::parse(&raw)
    }
}

impl From<ItemType> for String {
    fn from(item: ItemType) -> Self {
        item.to_string()
    }
}

/// Convert a PascalCase building type (`WeatherDashboard`) into the
/// snake_case building id used by the project manager (`weather_dashboard`).
///
/// Returns `None` for an empty building type.
pub fn building_id(building_type: &str) -> Option<String> {
    if building_type.is_empty() {
        return None;
    }

    let mut id = String::with_capacity(building_type.len() + 4);
    for (i, ch) in building_type.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                id.push('_');
            }
            id.extend(ch.to_lowercase());
        } else {
            id.push(ch);
        }
    }
    Some(id)
}
