//! Serde data file structs for crafting content.
//!
//! These structs define the on-disk format for materials, blueprints and
//! recipes. They are deserialized from RON, JSON, or TOML data files and
//! then resolved into catalog types by the loader.

use serde::Deserialize;
use tinkerworks_core::catalog::{Rarity, RecipeCategory};

// ===========================================================================
// Materials
// ===========================================================================

/// A material definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct MaterialData {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default = "default_rarity")]
    pub rarity: Rarity,
    #[serde(default)]
    pub drop_weight: u32,
}

fn default_rarity() -> Rarity {
    Rarity::Common
}

// ===========================================================================
// Blueprints
// ===========================================================================

/// A blueprint definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct BlueprintData {
    pub building_type: String,
    #[serde(default)]
    pub icon: Option<String>,
}

// ===========================================================================
// Recipes
// ===========================================================================

/// An ingredient entry, supporting both the short tuple form and the full
/// form with named fields.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientData {
    /// Short form: `("wood", 2)`.
    Short(String, u32),
    /// Full form: `(material: "wood", count: 2)`.
    Full { material: String, count: u32 },
}

impl IngredientData {
    pub fn into_parts(self) -> (String, u32) {
        match self {
            IngredientData::Short(material, count) => (material, count),
            IngredientData::Full { material, count } => (material, count),
        }
    }
}

/// A recipe definition in a data file.
#[derive(Debug, Clone, Deserialize)]
pub struct RecipeData {
    pub id: String,
    pub category: RecipeCategory,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub result: String,
    #[serde(default)]
    pub ingredients: Vec<IngredientData>,
    #[serde(default)]
    pub blueprint: Option<String>,
    #[serde(default)]
    pub token_cost: Option<u64>,
    #[serde(default)]
    pub prerequisite: Option<String>,
    #[serde(default)]
    pub tier: Option<u8>,
}
