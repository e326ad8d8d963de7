use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Rarity tier of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
}

/// A crafting material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub rarity: Rarity,
    /// Relative weight for drop rolls. Not read by the crafting rules.
    pub drop_weight: u32,
}

/// The blueprint that gates one building type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// PascalCase building type, e.g. `TodoApp`.
    pub building_type: String,
    pub icon: String,
}

/// Which tab of the crafting table a recipe belongs to. Also decides the
/// follow-up intent emitted after a craft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeCategory {
    App,
    Weapon,
    Armour,
    Upgrade,
}

impl RecipeCategory {
    pub const ALL: [RecipeCategory; 4] = [
        RecipeCategory::App,
        RecipeCategory::Weapon,
        RecipeCategory::Armour,
        RecipeCategory::Upgrade,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RecipeCategory::App => "app",
            RecipeCategory::Weapon => "weapon",
            RecipeCategory::Armour => "armour",
            RecipeCategory::Upgrade => "upgrade",
        }
    }
}

impl fmt::Display for RecipeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ingredient line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub material: String,
    pub count: u32,
}

impl Ingredient {
    pub fn new(material: impl Into<String>, count: u32) -> Self {
        Self {
            material: material.into(),
            count,
        }
    }
}

/// A recipe definition. Immutable once the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub category: RecipeCategory,
    pub name: String,
    pub description: String,
    /// Building type, equipment id or upgrade id depending on `category`.
    pub result: String,
    /// Consumed in full on craft. Declaration order is emission order.
    pub ingredients: Vec<Ingredient>,
    /// Building type whose blueprint must be held. Never consumed.
    pub blueprint: Option<String>,
    pub token_cost: Option<u64>,
    /// Upgrade result id that must already be purchased.
    pub prerequisite: Option<String>,
    /// Display tier for upgrades (1 = foundations).
    pub tier: Option<u8>,
}

/// Icon path used when a material does not name one.
pub fn default_material_icon(id: &str) -> String {
    format!("materials/{id}.png")
}

/// Icon path used when a blueprint does not name one.
pub fn default_blueprint_icon(building_type: &str) -> String {
    format!("blueprints/{building_type}.png")
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Errors raised while validating a catalog built from external data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("duplicate material id: {0}")]
    DuplicateMaterial(String),

    #[error("duplicate blueprint for building type: {0}")]
    DuplicateBlueprint(String),

    #[error("duplicate recipe id: {0}")]
    DuplicateRecipe(String),

    #[error("recipe {recipe} uses unknown material {material}")]
    UnknownMaterial { recipe: String, material: String },

    #[error("recipe {recipe} requires blueprint {building_type} which is not in the catalog")]
    UnknownBlueprint {
        recipe: String,
        building_type: String,
    },

    #[error("recipe {recipe} has prerequisite {prerequisite} which no upgrade recipe produces")]
    UnknownPrerequisite {
        recipe: String,
        prerequisite: String,
    },

    #[error("recipe {recipe} lists {material} with a count of zero")]
    ZeroCount { recipe: String, material: String },

    #[error("recipe {0} has an empty result")]
    EmptyResult(String),
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Collects catalog entries, then validates and freezes them into a
/// [`Catalog`].
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    materials: Vec<Material>,
    blueprints: Vec<Blueprint>,
    recipes: Vec<Recipe>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_material(&mut self, material: Material) -> &mut Self {
        self.materials.push(material);
        self
    }

    pub fn register_blueprint(&mut self, blueprint: Blueprint) -> &mut Self {
        self.blueprints.push(blueprint);
        self
    }

    pub fn register_recipe(&mut self, recipe: Recipe) -> &mut Self {
        self.recipes.push(recipe);
        self
    }

    /// Check every cross-reference without consuming the builder.
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut material_ids = HashSet::new();
        for m in &self.materials {
            if !material_ids.insert(m.id.as_str()) {
                return Err(CatalogError::DuplicateMaterial(m.id.clone()));
            }
        }

        let mut building_types = HashSet::new();
        for b in &self.blueprints {
            if !building_types.insert(b.building_type.as_str()) {
                return Err(CatalogError::DuplicateBlueprint(b.building_type.clone()));
            }
        }

        let upgrade_results: HashSet<&str> = self
            .recipes
            .iter()
            .filter(|r| r.category == RecipeCategory::Upgrade)
            .map(|r| r.result.as_str())
            .collect();

        let mut recipe_ids = HashSet::new();
        for r in &self.recipes {
            if !recipe_ids.insert(r.id.as_str()) {
                return Err(CatalogError::DuplicateRecipe(r.id.clone()));
            }
            if r.result.is_empty() {
                return Err(CatalogError::EmptyResult(r.id.clone()));
            }
            for ing in &r.ingredients {
                if !material_ids.contains(ing.material.as_str()) {
                    return Err(CatalogError::UnknownMaterial {
                        recipe: r.id.clone(),
                        material: ing.material.clone(),
                    });
                }
                if ing.count == 0 {
                    return Err(CatalogError::ZeroCount {
                        recipe: r.id.clone(),
                        material: ing.material.clone(),
                    });
                }
            }
            if let Some(building_type) = &r.blueprint
                && !building_types.contains(building_type.as_str())
            {
                return Err(CatalogError::UnknownBlueprint {
                    recipe: r.id.clone(),
                    building_type: building_type.clone(),
                });
            }
            if let Some(prerequisite) = &r.prerequisite
                && !upgrade_results.contains(prerequisite.as_str())
            {
                return Err(CatalogError::UnknownPrerequisite {
                    recipe: r.id.clone(),
                    prerequisite: prerequisite.clone(),
                });
            }
        }

        Ok(())
    }

    /// Validate and build the immutable catalog.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        if let Err(e) = self.validate() {
            tracing::warn!(error = %e, "catalog validation failed");
            return Err(e);
        }
        Ok(self.freeze())
    }

    /// Build the indices without validation. Used for the shipped tables,
    /// which are checked by tests instead.
    pub(crate) fn freeze(self) -> Catalog {
        let material_index = first_index(self.materials.iter().map(|m| m.id.as_str()));
        let blueprint_index =
            first_index(self.blueprints.iter().map(|b| b.building_type.as_str()));
        let recipe_index = first_index(self.recipes.iter().map(|r| r.id.as_str()));

        Catalog {
            materials: self.materials,
            material_index,
            blueprints: self.blueprints,
            blueprint_index,
            recipes: self.recipes,
            recipe_index,
        }
    }
}

/// Map each key to the position of its first occurrence.
fn first_index<'a>(keys: impl Iterator<Item = &'a str>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, key) in keys.enumerate() {
        index.entry(key.to_string()).or_insert(i);
    }
    index
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

/// Immutable tables of materials, blueprints and recipes with keyed lookups.
/// Frozen after construction; safe to share between threads.
#[derive(Debug, Clone)]
pub struct Catalog {
    materials: Vec<Material>,
    material_index: HashMap<String, usize>,
    blueprints: Vec<Blueprint>,
    blueprint_index: HashMap<String, usize>,
    recipes: Vec<Recipe>,
    recipe_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn material_by_id(&self, id: &str) -> Option<&Material> {
        self.material_index.get(id).and_then(|&i| self.materials.get(i))
    }

    pub fn blueprint_for_building(&self, building_type: &str) -> Option<&Blueprint> {
        self.blueprint_index
            .get(building_type)
            .and_then(|&i| self.blueprints.get(i))
    }

    pub fn recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipe_index.get(id).and_then(|&i| self.recipes.get(i))
    }

    /// Recipes of one category, in declaration order.
    pub fn recipes_by_category(
        &self,
        category: RecipeCategory,
    ) -> impl Iterator<Item = &Recipe> + '_ {
        self.recipes.iter().filter(move |r| r.category == category)
    }

    /// The first recipe of `category` producing `result`.
    pub fn recipe_for_result(&self, category: RecipeCategory, result: &str) -> Option<&Recipe> {
        self.recipes_by_category(category).find(|r| r.result == result)
    }

    /// Upgrade recipes of one tier, in declaration order.
    pub fn upgrades_in_tier(&self, tier: u8) -> impl Iterator<Item = &Recipe> + '_ {
        self.recipes_by_category(RecipeCategory::Upgrade)
            .filter(move |r| r.tier == Some(tier))
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn blueprints(&self) -> &[Blueprint] {
        &self.blueprints
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }
}
