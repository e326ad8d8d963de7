//! Resolution pipeline: reads data files, resolves defaults, builds the catalog.
//!
//! Provides format detection (RON/JSON/TOML), file discovery, and list
//! deserialization, plus [`load_catalog`] which ties them together.

use serde::de::DeserializeOwned;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tinkerworks_core::catalog::{
    Blueprint, Catalog, CatalogBuilder, CatalogError, Ingredient, Material, Recipe,
    default_blueprint_icon, default_material_icon,
};

use crate::schema::{BlueprintData, IngredientData, MaterialData, RecipeData};

pub const MATERIALS_FILE: &str = "materials";
pub const BLUEPRINTS_FILE: &str = "blueprints";
pub const RECIPES_FILE: &str = "recipes";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur during data loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// A required data file was not found in the given directory.
    #[error("required file '{file}' not found in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// The loaded tables failed catalog validation (unknown material,
    /// unresolved blueprint or prerequisite, duplicate id, zero count).
    #[error("invalid catalog in {dir}: {source}")]
    Catalog {
        dir: PathBuf,
        #[source]
        source: CatalogError,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported data file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan a directory for a data file with the given base name (without extension).
///
/// Looks for `{base_name}.ron`, `{base_name}.toml`, and `{base_name}.json`.
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// multiple formats exist for the same base name.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{base_name}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(DataLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

/// Like [`find_data_file`], but returns an error if no file is found.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Deserialization
// ===========================================================================

fn parse_error(path: &Path, e: impl std::fmt::Display) -> DataLoadError {
    DataLoadError::Parse {
        file: path.to_path_buf(),
        detail: e.to_string(),
    }
}

/// Deserialize a list from a file. For TOML files, extracts the array at the
/// given `toml_key` from a top-level table. For RON and JSON, deserializes
/// directly as `Vec<T>`.
pub fn deserialize_list<T: DeserializeOwned>(
    path: &Path,
    toml_key: &str,
) -> Result<Vec<T>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(path, e)),
        Format::Toml => {
            let mut table: toml::Table =
                toml::from_str(&content).map_err(|e| parse_error(path, e))?;
            let array = table.remove(toml_key).ok_or_else(|| DataLoadError::Parse {
                file: path.to_path_buf(),
                detail: format!("missing key '{toml_key}' in TOML file"),
            })?;
            array
                .try_into()
                .map_err(|e: toml::de::Error| parse_error(path, e))
        }
    }
}

// ===========================================================================
// Resolution
// ===========================================================================

fn resolve_material(data: MaterialData) -> Material {
    let icon = data
        .icon
        .unwrap_or_else(|| default_material_icon(&data.id));
    Material {
        id: data.id,
        name: data.name,
        icon,
        rarity: data.rarity,
        drop_weight: data.drop_weight,
    }
}

fn resolve_blueprint(data: BlueprintData) -> Blueprint {
    let icon = data
        .icon
        .unwrap_or_else(|| default_blueprint_icon(&data.building_type));
    Blueprint {
        building_type: data.building_type,
        icon,
    }
}

fn resolve_recipe(data: RecipeData) -> Recipe {
    Recipe {
        id: data.id,
        category: data.category,
        name: data.name,
        description: data.description,
        result: data.result,
        ingredients: data
            .ingredients
            .into_iter()
            .map(IngredientData::into_parts)
            .map(|(material, count)| Ingredient { material, count })
            .collect(),
        blueprint: data.blueprint,
        token_cost: data.token_cost,
        prerequisite: data.prerequisite,
        tier: data.tier,
    }
}

/// One blueprint per distinct building type that a recipe gates on, in
/// first-use order. Used when the directory has no blueprints file.
fn implied_blueprints(recipes: &[Recipe]) -> Vec<Blueprint> {
    let mut seen = BTreeSet::new();
    recipes
        .iter()
        .filter_map(|r| r.blueprint.as_deref())
        .filter(|bt| seen.insert(*bt))
        .map(|bt| Blueprint {
            building_type: bt.to_string(),
            icon: default_blueprint_icon(bt),
        })
        .collect()
}

// ===========================================================================
// Pipeline
// ===========================================================================

/// Load a catalog from a directory of data files.
///
/// `materials` and `recipes` are required. `blueprints` is optional; without
/// it one blueprint is implied for each building type a recipe names.
pub fn load_catalog(dir: &Path) -> Result<Catalog, DataLoadError> {
    let materials_path = require_data_file(dir, MATERIALS_FILE)?;
    let recipes_path = require_data_file(dir, RECIPES_FILE)?;
    let blueprints_path = find_data_file(dir, BLUEPRINTS_FILE)?;

    let materials: Vec<MaterialData> = deserialize_list(&materials_path, MATERIALS_FILE)?;
    let recipes: Vec<Recipe> = deserialize_list::<RecipeData>(&recipes_path, RECIPES_FILE)?
        .into_iter()
        .map(resolve_recipe)
        .collect();
    let blueprints = match &blueprints_path {
        Some(path) => deserialize_list::<BlueprintData>(path, BLUEPRINTS_FILE)?
            .into_iter()
            .map(resolve_blueprint)
            .collect(),
        None => implied_blueprints(&recipes),
    };

    let mut builder = CatalogBuilder::new();
    for material in materials.into_iter().map(resolve_material) {
        builder.register_material(material);
    }
    for blueprint in blueprints {
        builder.register_blueprint(blueprint);
    }
    for recipe in recipes {
        builder.register_recipe(recipe);
    }

    let catalog = builder.build().map_err(|source| DataLoadError::Catalog {
        dir: dir.to_path_buf(),
        source,
    })?;

    tracing::info!(
        dir = %dir.display(),
        materials = catalog.materials().len(),
        blueprints = catalog.blueprints().len(),
        recipes = catalog.recipes().len(),
        "catalog loaded"
    );
    Ok(catalog)
}

// ===========================================================================
// Tests
// ===========================================================================
