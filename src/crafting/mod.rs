//! Crafting - recipe validation, rarity/category classification and
//! custom recipe creation
//!
//! A combination of materials is validated against availability and
//! uniqueness, classified into a rarity tier by a weighted ingredient
//! sum, and synthesized into a new item. Recipe identity is the
//! aggregated input map: two ingredient lists that reduce to the same
//! per-material totals are the same recipe.

use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::{RARITY_EPIC_THRESHOLD, RARITY_RARE_THRESHOLD};
use crate::core::error::{GameError, Result};
use crate::core::stats::StatBonus;
use crate::core::types::{ItemId, PoolId};
use crate::economy::{ResourceLedger, Warehouse};
use crate::item::{Item, ItemCategory, Rarity};

/// What a recipe produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeOutput {
    /// A single item granted to the active hero
    Item(Item),
    /// Material yields deposited into the ledger
    Materials(Vec<(PoolId, u32)>),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    /// Aggregated input map; BTreeMap keeps equality order-independent
    pub inputs: BTreeMap<PoolId, u32>,
    pub output: RecipeOutput,
    #[serde(default)]
    pub custom: bool,
}

/// Result of validating an ingredient combination
#[derive(Debug, Clone)]
pub struct CraftPreview {
    pub rarity: Rarity,
    pub category: ItemCategory,
    pub item: Item,
    pub inputs: BTreeMap<PoolId, u32>,
}

/// Output of a successful craft for the caller to distribute
#[derive(Debug, Clone)]
pub enum CraftYield {
    Item(Item),
    Materials(Vec<(PoolId, u32)>),
}

#[derive(Debug, Clone)]
pub struct Crafting {
    base: Vec<Recipe>,
    custom: Vec<Recipe>,
}

impl Crafting {
    /// Base recipe set: material refinement chains
    pub fn with_defaults() -> Self {
        let base = vec![
            Recipe {
                id: "wood_to_planks".into(),
                name: "Planks from wood".into(),
                inputs: BTreeMap::from([(PoolId::Wood, 2)]),
                output: RecipeOutput::Materials(vec![(PoolId::Planks, 1)]),
                custom: false,
            },
            Recipe {
                id: "metal_to_parts".into(),
                name: "Metal parts".into(),
                inputs: BTreeMap::from([(PoolId::Metal, 3)]),
                output: RecipeOutput::Materials(vec![(PoolId::MetalParts, 1)]),
                custom: false,
            },
        ];
        Self {
            base,
            custom: Vec::new(),
        }
    }

    pub fn recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.base.iter().chain(self.custom.iter())
    }

    pub fn custom_recipes(&self) -> &[Recipe] {
        &self.custom
    }

    pub fn get(&self, id: &str) -> Option<&Recipe> {
        self.recipes().find(|r| r.id == id)
    }

    /// Validate an ingredient combination against availability and
    /// uniqueness, classifying the would-be result
    pub fn validate(
        &self,
        ingredients: &[(PoolId, u32)],
        ledger: &ResourceLedger,
        rng: &mut impl Rng,
    ) -> Result<CraftPreview> {
        let inputs = aggregate(ingredients);

        for (pool, amount) in &inputs {
            if !ledger.has(*pool, *amount) {
                return Err(GameError::InsufficientResource(*pool));
            }
        }

        if self.recipes().any(|recipe| recipe.inputs == inputs) {
            return Err(GameError::DuplicateRecipe);
        }

        let rarity = classify_rarity(&inputs);
        let category = classify_category(&inputs);
        let bonus = accumulate_bonus(&inputs);
        let name = generate_name(rarity, rng);

        let mut item = Item::new(ItemId::generated().as_str(), name, category, rarity);
        if !bonus.is_empty() {
            item = item.with_bonus(bonus);
        }

        Ok(CraftPreview {
            rarity,
            category,
            item,
            inputs,
        })
    }

    /// Create a persistent custom recipe, debiting its ingredients
    ///
    /// Failure leaves the ledger untouched. Returns the new recipe id.
    pub fn create_recipe(
        &mut self,
        name: Option<String>,
        ingredients: &[(PoolId, u32)],
        ledger: &mut ResourceLedger,
        warehouse: &Warehouse,
        rng: &mut impl Rng,
    ) -> Result<String> {
        let preview = self.validate(ingredients, ledger, rng)?;

        for (pool, amount) in &preview.inputs {
            ledger.adjust(*pool, -(*amount as i64), warehouse.capacity_for(*pool));
        }

        let id = format!("recipe_{}", ItemId::generated());
        let recipe = Recipe {
            id: id.clone(),
            name: name.unwrap_or_else(|| preview.item.name.clone()),
            inputs: preview.inputs,
            output: RecipeOutput::Item(preview.item),
            custom: true,
        };
        self.custom.push(recipe);
        Ok(id)
    }

    /// Execute a stored recipe, debiting its inputs
    pub fn craft(
        &self,
        recipe_id: &str,
        ledger: &mut ResourceLedger,
        warehouse: &Warehouse,
    ) -> Result<CraftYield> {
        let recipe = self
            .get(recipe_id)
            .ok_or_else(|| GameError::RecipeNotFound(recipe_id.to_string()))?;

        for (pool, amount) in &recipe.inputs {
            if !ledger.has(*pool, *amount) {
                return Err(GameError::InsufficientResource(*pool));
            }
        }
        for (pool, amount) in &recipe.inputs {
            ledger.adjust(*pool, -(*amount as i64), warehouse.capacity_for(*pool));
        }

        Ok(match &recipe.output {
            RecipeOutput::Item(item) => {
                // Each craft mints a distinct item instance
                let mut minted = item.clone();
                minted.id = ItemId::generated();
                CraftYield::Item(minted)
            }
            RecipeOutput::Materials(yields) => CraftYield::Materials(yields.clone()),
        })
    }

    /// Restore custom recipes from a save
    pub fn restore_custom(&mut self, recipes: Vec<Recipe>) {
        self.custom = recipes;
    }
}

fn aggregate(ingredients: &[(PoolId, u32)]) -> BTreeMap<PoolId, u32> {
    let mut totals = BTreeMap::new();
    for (pool, amount) in ingredients {
        *totals.entry(*pool).or_insert(0) += amount;
    }
    totals
}

/// Craft-value weight of one unit of a material
fn unit_weight(pool: PoolId) -> u32 {
    match pool {
        PoolId::Wood => 1,
        PoolId::Metal => 2,
        PoolId::Planks => 3,
        PoolId::MetalParts => 4,
        _ => 1,
    }
}

fn classify_rarity(inputs: &BTreeMap<PoolId, u32>) -> Rarity {
    let total: u32 = inputs
        .iter()
        .map(|(pool, amount)| unit_weight(*pool) * amount)
        .sum();
    if total >= RARITY_EPIC_THRESHOLD {
        Rarity::Epic
    } else if total >= RARITY_RARE_THRESHOLD {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

/// Category precedence: metal over wood over cloth, consumable fallback
fn classify_category(inputs: &BTreeMap<PoolId, u32>) -> ItemCategory {
    if inputs.keys().any(|p| matches!(p, PoolId::Metal | PoolId::MetalParts)) {
        ItemCategory::WeaponMelee
    } else if inputs.contains_key(&PoolId::Wood) {
        ItemCategory::WeaponRanged
    } else if inputs.contains_key(&PoolId::Cloth) {
        ItemCategory::Armor
    } else {
        ItemCategory::Consumable
    }
}

/// Wood hardens, metal sharpens, cloth padding is worth 5 hp per unit
fn accumulate_bonus(inputs: &BTreeMap<PoolId, u32>) -> StatBonus {
    let mut bonus = StatBonus::default();
    for (pool, amount) in inputs {
        match pool {
            PoolId::Wood => bonus.defense += *amount as i32,
            PoolId::Metal | PoolId::MetalParts => bonus.attack += *amount as i32,
            PoolId::Cloth => bonus.hp += *amount as i32 * 5,
            _ => {}
        }
    }
    bonus
}

fn generate_name(rarity: Rarity, rng: &mut impl Rng) -> String {
    let names: &[&str] = match rarity {
        Rarity::Common => &["Simple piece", "Plain work", "Basic component"],
        Rarity::Rare => &["Rare find", "Quality work", "Curious piece"],
        Rarity::Epic => &["Epic artifact", "Legendary work", "Singular creation"],
    };
    let base = names[rng.gen_range(0..names.len())];
    format!("{} #{}", base, rng.gen_range(0..1000))
}
