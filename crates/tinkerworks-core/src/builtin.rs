//! The crafting tables shipped with the game.

use crate::catalog::{
    Blueprint, Catalog, CatalogBuilder, Ingredient, Material, Rarity, Recipe, RecipeCategory,
    default_blueprint_icon, default_material_icon,
};

// (id, name, rarity, drop weight)
const MATERIALS: &[(&str, &str, Rarity, u32)] = &[
    ("wood", "Wood", Rarity::Common, 40),
    ("stone", "Stone", Rarity::Common, 35),
    ("iron_powder", "Iron Powder", Rarity::Common, 30),
    ("copper_wire", "Copper Wire", Rarity::Common, 25),
    ("metal_ring", "Metal Ring", Rarity::Uncommon, 15),
    ("ore_coin", "Ore Coin", Rarity::Uncommon, 12),
    ("silicon_chip", "Silicon Chip", Rarity::Uncommon, 10),
    ("glass_lens", "Glass Lens", Rarity::Uncommon, 8),
    ("crystal_shard", "Crystal Shard", Rarity::Rare, 4),
    ("quantum_core", "Quantum Core", Rarity::Rare, 1),
];

/// Building types that can be unlocked through the crafting table.
const BUILDINGS: &[&str] = &[
    "TodoApp",
    "Calculator",
    "LandingPage",
    "WeatherDashboard",
    "ChatApp",
    "KanbanBoard",
    "EcommerceStore",
    "AiImageGenerator",
    "ApiDashboard",
    "Blockchain",
];

struct RecipeRow {
    id: &'static str,
    category: RecipeCategory,
    name: &'static str,
    description: &'static str,
    result: &'static str,
    ingredients: &'static [(&'static str, u32)],
    blueprint: Option<&'static str>,
    token_cost: Option<u64>,
    prerequisite: Option<&'static str>,
    tier: Option<u8>,
}

const fn app(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    building: &'static str,
    ingredients: &'static [(&'static str, u32)],
) -> RecipeRow {
    RecipeRow {
        id,
        category: RecipeCategory::App,
        name,
        description,
        result: building,
        ingredients,
        blueprint: Some(building),
        token_cost: None,
        prerequisite: None,
        tier: None,
    }
}

const fn gear(
    id: &'static str,
    category: RecipeCategory,
    name: &'static str,
    description: &'static str,
    result: &'static str,
    ingredients: &'static [(&'static str, u32)],
) -> RecipeRow {
    RecipeRow {
        id,
        category,
        name,
        description,
        result,
        ingredients,
        blueprint: None,
        token_cost: None,
        prerequisite: None,
        tier: None,
    }
}

#[allow(clippy::too_many_arguments)]
const fn upgrade(
    id: &'static str,
    name: &'static str,
    description: &'static str,
    result: &'static str,
    tier: u8,
    cost: u64,
    prerequisite: Option<&'static str>,
    ingredients: &'static [(&'static str, u32)],
) -> RecipeRow {
    RecipeRow {
        id,
        category: RecipeCategory::Upgrade,
        name,
        description,
        result,
        ingredients,
        blueprint: None,
        token_cost: Some(cost),
        prerequisite,
        tier: Some(tier),
    }
}

use RecipeCategory::{Armour, Weapon};

#[rustfmt::skip]
const RECIPES: &[RecipeRow] = &[
    // Apps
    app("app_todo", "Todo App", "A humble list of things to do", "TodoApp",
        &[("wood", 2), ("iron_powder", 1)]),
    app("app_calculator", "Calculator", "Adds numbers, mostly correctly", "Calculator",
        &[("wood", 2), ("stone", 2)]),
    app("app_landing_page", "Landing Page", "Hero image and a signup button", "LandingPage",
        &[("wood", 3), ("copper_wire", 1)]),
    app("app_weather_dashboard", "Weather Dashboard", "Forecasts from a public API", "WeatherDashboard",
        &[("iron_powder", 2), ("copper_wire", 2), ("glass_lens", 1)]),
    app("app_chat", "Chat App", "Realtime messages over websockets", "ChatApp",
        &[("copper_wire", 3), ("metal_ring", 1)]),
    app("app_kanban_board", "Kanban Board", "Drag cards between columns", "KanbanBoard",
        &[("wood", 4), ("metal_ring", 1), ("iron_powder", 1)]),
    app("app_ecommerce_store", "E-commerce Store", "Cart, checkout, inventory", "EcommerceStore",
        &[("ore_coin", 3), ("silicon_chip", 2), ("metal_ring", 1)]),
    app("app_ai_image_generator", "AI Image Generator", "Pictures from prompts", "AiImageGenerator",
        &[("silicon_chip", 3), ("glass_lens", 2), ("crystal_shard", 1)]),
    app("app_api_dashboard", "API Dashboard", "Latency graphs and keys", "ApiDashboard",
        &[("silicon_chip", 2), ("copper_wire", 3), ("ore_coin", 1)]),
    app("app_blockchain", "Blockchain", "A very slow shared database", "Blockchain",
        &[("ore_coin", 5), ("crystal_shard", 2), ("quantum_core", 1)]),
    // Weapons
    gear("weapon_process_terminator", Weapon, "Process Terminator", "Quick melee swipe",
        "ProcessTerminator", &[("wood", 2), ("iron_powder", 2)]),
    gear("weapon_hard_reset", Weapon, "Hard Reset", "Slow, wide, heavy", "HardReset",
        &[("iron_powder", 4), ("metal_ring", 2)]),
    gear("weapon_signal_jammer", Weapon, "Signal Jammer", "Medium arc, medium bite",
        "SignalJammer", &[("copper_wire", 3), ("silicon_chip", 1)]),
    gear("weapon_null_pointer", Weapon, "Null Pointer", "Fires a projectile", "NullPointer",
        &[("metal_ring", 2), ("glass_lens", 1), ("silicon_chip", 1)]),
    gear("weapon_flare", Weapon, "Flare", "Burns everything around you", "Flare",
        &[("wood", 3), ("crystal_shard", 1)]),
    // Armour
    gear("armour_base_prompt", Armour, "Base Prompt", "Light protection", "BasePrompt",
        &[("wood", 3)]),
    gear("armour_few_shot_padding", Armour, "Few-Shot Padding", "A few examples of safety",
        "FewShotPadding", &[("wood", 2), ("copper_wire", 2)]),
    gear("armour_chain_of_thought_mail", Armour, "Chain-of-Thought Mail",
        "Sturdy, a little slow", "ChainOfThoughtMail", &[("metal_ring", 4), ("iron_powder", 2)]),
    gear("armour_constitutional_plate", Armour, "Constitutional Plate",
        "Heavy principled plating", "ConstitutionalPlate",
        &[("metal_ring", 4), ("ore_coin", 2), ("crystal_shard", 1)]),
    // Upgrades, tier 1
    upgrade("upgrade_expanded_context_window", "Expanded Context Window",
        "Agents handle larger blueprints", "ExpandedContextWindow", 1, 100, None,
        &[("wood", 2), ("stone", 1)]),
    upgrade("upgrade_verbose_logging", "Verbose Logging", "Agent states visible further",
        "VerboseLogging", 1, 75, None, &[("copper_wire", 1)]),
    upgrade("upgrade_token_compression", "Token Compression", "Reduced upkeep",
        "TokenCompression", 1, 120, None, &[("iron_powder", 2)]),
    // Tier 2
    upgrade("upgrade_git_access", "Git Access", "Extended recovery window", "GitAccess", 2, 200,
        Some("ExpandedContextWindow"), &[("metal_ring", 1), ("ore_coin", 1)]),
    upgrade("upgrade_web_search", "Web Search", "Agents explore better", "WebSearch", 2, 180,
        Some("VerboseLogging"), &[("glass_lens", 1), ("copper_wire", 2)]),
    upgrade("upgrade_file_system_access", "File System Access", "Faster builds",
        "FileSystemAccess", 2, 250, Some("TokenCompression"),
        &[("metal_ring", 2), ("stone", 2)]),
    upgrade("upgrade_crank_assignment", "Crank Assignment", "Assign agent to crank",
        "CrankAssignment", 2, 150, Some("TokenCompression"),
        &[("wood", 3), ("metal_ring", 1)]),
    // Tier 3
    upgrade("upgrade_multi_agent_coordination", "Multi-Agent Coordination",
        "Agents collaborate", "MultiAgentCoordination", 3, 400, Some("GitAccess"),
        &[("silicon_chip", 2), ("ore_coin", 2)]),
    upgrade("upgrade_persistent_memory", "Persistent Memory", "Better XP retention",
        "PersistentMemory", 3, 350, Some("WebSearch"),
        &[("silicon_chip", 2), ("glass_lens", 1)]),
    upgrade("upgrade_autonomous_scouting", "Autonomous Scouting", "Self-assign exploration",
        "AutonomousScouting", 3, 300, Some("FileSystemAccess"),
        &[("glass_lens", 2), ("metal_ring", 1)]),
    // Tier 4
    upgrade("upgrade_agent_spawning", "Agent Spawning", "Agents recruit agents",
        "AgentSpawning", 4, 600, Some("MultiAgentCoordination"),
        &[("crystal_shard", 2), ("quantum_core", 1)]),
    upgrade("upgrade_distributed_compute", "Distributed Compute",
        "Token gen scales with agents", "DistributedCompute", 4, 500, Some("PersistentMemory"),
        &[("silicon_chip", 4), ("crystal_shard", 1)]),
    upgrade("upgrade_alignment_protocols", "Alignment Protocols", "Reduced rogue spawns",
        "AlignmentProtocols", 4, 800, Some("AutonomousScouting"),
        &[("crystal_shard", 2), ("ore_coin", 3)]),
];

impl Catalog {
    /// The shipped crafting tables. Construction does no I/O and cannot fail.
    pub fn builtin() -> Catalog {
        builtin_builder().freeze()
    }
}

pub(crate) fn builtin_builder() -> CatalogBuilder {
    let mut builder = CatalogBuilder::new();

    for &(id, name, rarity, drop_weight) in MATERIALS {
        builder.register_material(Material {
            id: id.to_string(),
            name: name.to_string(),
            icon: default_material_icon(id),
            rarity,
            drop_weight,
        });
    }

    for &building_type in BUILDINGS {
        builder.register_blueprint(Blueprint {
            building_type: building_type.to_string(),
            icon: default_blueprint_icon(building_type),
        });
    }

    for row in RECIPES {
        builder.register_recipe(Recipe {
            id: row.id.to_string(),
            category: row.category,
            name: row.name.to_string(),
            description: row.description.to_string(),
            result: row.result.to_string(),
            ingredients: row
                .ingredients
                .iter()
                .map(|&(material, count)| Ingredient::new(material, count))
                .collect(),
            blueprint: row.blueprint.map(str::to_string),
            token_cost: row.token_cost,
            prerequisite: row.prerequisite.map(str::to_string),
            tier: row.tier,
        });
    }

    builder
}
