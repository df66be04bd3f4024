//! Item catalog - the pool of stocked items the shop draws from
//!
//! Ships with hardcoded defaults and can also be loaded from a TOML file,
//! so content tweaks don't need a recompile.

use serde::Deserialize;
use thiserror::Error;

use crate::core::stats::StatBonus;
use crate::core::types::PoolId;
use crate::item::{ConsumableEffect, Item, ItemCategory, Rarity};

/// Catalog of all purchasable items
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: Vec<Item>,
}

impl ItemCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in starter stock
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();

        catalog.add(
            Item::new("weapon_sword_1", "Wooden sword", ItemCategory::WeaponMelee, Rarity::Common)
                .with_price(10)
                .with_bonus(StatBonus { attack: 5, ..Default::default() }),
        );
        catalog.add(
            Item::new("weapon_sword_2", "Iron sword", ItemCategory::WeaponMelee, Rarity::Rare)
                .with_price(50)
                .with_bonus(StatBonus { attack: 12, ..Default::default() }),
        );
        catalog.add(
            Item::new("weapon_bow_1", "Short bow", ItemCategory::WeaponRanged, Rarity::Common)
                .with_price(15)
                .with_bonus(StatBonus { attack: 7, ..Default::default() }),
        );
        catalog.add(
            Item::new("weapon_bow_2", "Long bow", ItemCategory::WeaponRanged, Rarity::Rare)
                .with_price(60)
                .with_bonus(StatBonus { attack: 15, ..Default::default() }),
        );
        catalog.add(
            Item::new("armor_cloth_1", "Cloth armor", ItemCategory::Armor, Rarity::Common)
                .with_price(8)
                .with_bonus(StatBonus { defense: 3, hp: 5, ..Default::default() }),
        );
        catalog.add(
            Item::new("armor_leather_1", "Leather armor", ItemCategory::Armor, Rarity::Common)
                .with_price(15)
                .with_bonus(StatBonus { defense: 5, hp: 10, ..Default::default() }),
        );
        catalog.add(
            Item::new("armor_iron_1", "Iron cuirass", ItemCategory::Armor, Rarity::Rare)
                .with_price(40)
                .with_bonus(StatBonus { defense: 10, hp: 20, ..Default::default() }),
        );
        catalog.add(
            Item::new("accessory_ring_1", "Ring of strength", ItemCategory::Accessory, Rarity::Rare)
                .with_price(40)
                .with_bonus(StatBonus { attack: 3, defense: 2, ..Default::default() }),
        );
        catalog.add(
            Item::new("consumable_hp_small", "Small healing potion", ItemCategory::Consumable, Rarity::Common)
                .with_price(5)
                .with_effect(ConsumableEffect::Heal { value: 30 }),
        );
        catalog.add(
            Item::new("consumable_hp_medium", "Medium healing potion", ItemCategory::Consumable, Rarity::Rare)
                .with_price(15)
                .with_effect(ConsumableEffect::Heal { value: 60 }),
        );
        catalog.add(
            Item::new("consumable_exp_tome", "Tome of experience", ItemCategory::Consumable, Rarity::Epic)
                .with_price(100)
                .with_effect(ConsumableEffect::Exp { value: 50 }),
        );
        catalog.add(
            Item::new("consumable_supply_cache", "Supply cache", ItemCategory::Consumable, Rarity::Rare)
                .with_price(20)
                .with_effect(ConsumableEffect::Resource { pool: PoolId::Provisions, value: 10 }),
        );
        catalog.add(
            Item::new("material_wood", "Wood", ItemCategory::Material, Rarity::Common).with_price(2),
        );
        catalog.add(
            Item::new("material_metal", "Metal", ItemCategory::Material, Rarity::Common).with_price(5),
        );
        catalog.add(
            Item::new("material_cloth", "Cloth", ItemCategory::Material, Rarity::Common).with_price(3),
        );

        catalog
    }

    pub fn add(&mut self, item: Item) {
        self.items.push(item);
    }

    /// Get an item by id
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.id.as_str() == id)
    }

    pub fn all(&self) -> &[Item] {
        &self.items
    }

    /// Load a catalog from a TOML file
    pub fn load_from_toml(path: &std::path::Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CatalogLoadError::Io(e.to_string()))?;
        Self::parse_toml(&content)
    }

    /// Parse a catalog from a TOML string
    pub fn parse_toml(content: &str) -> Result<Self, CatalogLoadError> {
        let toml_data: TomlCatalog =
            toml::from_str(content).map_err(|e| CatalogLoadError::Parse(e.to_string()))?;

        let mut catalog = Self::new();
        for item in toml_data.items {
            catalog.add(item.into_item()?);
        }
        Ok(catalog)
    }
}

/// Error type for catalog loading
#[derive(Debug, Clone, Error)]
pub enum CatalogLoadError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid category: {0}")]
    InvalidCategory(String),
    #[error("invalid rarity: {0}")]
    InvalidRarity(String),
    #[error("invalid effect kind: {0}")]
    InvalidEffect(String),
    #[error("invalid pool: {0}")]
    InvalidPool(String),
}

/// TOML representation of the catalog file
#[derive(Debug, Deserialize)]
struct TomlCatalog {
    items: Vec<TomlItem>,
}

#[derive(Debug, Deserialize)]
struct TomlItem {
    id: String,
    name: String,
    category: String,
    rarity: String,
    #[serde(default)]
    price: u32,
    #[serde(default)]
    bonus: TomlBonus,
    effect: Option<TomlEffect>,
}

#[derive(Debug, Default, Deserialize)]
struct TomlBonus {
    #[serde(default)]
    hp: i32,
    #[serde(default)]
    attack: i32,
    #[serde(default)]
    defense: i32,
    #[serde(default)]
    speed: i32,
}

#[derive(Debug, Deserialize)]
struct TomlEffect {
    kind: String,
    value: i64,
    pool: Option<String>,
}

impl TomlItem {
    fn into_item(self) -> Result<Item, CatalogLoadError> {
        let category = ItemCategory::from_name(&self.category)
            .ok_or(CatalogLoadError::InvalidCategory(self.category))?;
        let rarity =
            Rarity::from_name(&self.rarity).ok_or(CatalogLoadError::InvalidRarity(self.rarity))?;

        let mut item = Item::new(self.id, self.name, category, rarity).with_price(self.price);

        let bonus = StatBonus {
            hp: self.bonus.hp,
            attack: self.bonus.attack,
            defense: self.bonus.defense,
            speed: self.bonus.speed,
        };
        if !bonus.is_empty() {
            item = item.with_bonus(bonus);
        }

        if let Some(effect) = self.effect {
            let effect = match effect.kind.to_lowercase().as_str() {
                "heal" => ConsumableEffect::Heal {
                    value: effect.value as i32,
                },
                "exp" => ConsumableEffect::Exp {
                    value: effect.value.max(0) as u32,
                },
                "resource" => {
                    let pool_name = effect
                        .pool
                        .ok_or_else(|| CatalogLoadError::InvalidPool("missing".into()))?;
                    let pool = PoolId::from_name(&pool_name)
                        .ok_or(CatalogLoadError::InvalidPool(pool_name))?;
                    ConsumableEffect::Resource {
                        pool,
                        value: effect.value,
                    }
                }
                other => return Err(CatalogLoadError::InvalidEffect(other.into())),
            };
            item = item.with_effect(effect);
        }

        Ok(item)
    }
}
