//! Item model - equipment, consumables and crafting materials
//!
//! Items are immutable value objects: equipping and unequipping move them
//! between containers, nothing ever mutates one after creation. One tagged
//! type covers every category, with an optional use-effect for
//! consumables.

pub mod catalog;

pub use catalog::ItemCatalog;

use serde::{Deserialize, Serialize};

use crate::core::stats::StatBonus;
use crate::core::types::{ItemId, PoolId};

/// What kind of gear or goods an item is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemCategory {
    WeaponMelee,
    WeaponRanged,
    Armor,
    Accessory,
    Consumable,
    Material,
}

impl ItemCategory {
    pub fn name(&self) -> &'static str {
        match self {
            ItemCategory::WeaponMelee => "weapon_melee",
            ItemCategory::WeaponRanged => "weapon_ranged",
            ItemCategory::Armor => "armor",
            ItemCategory::Accessory => "accessory",
            ItemCategory::Consumable => "consumable",
            ItemCategory::Material => "material",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "weapon_melee" | "weapon" => Some(ItemCategory::WeaponMelee),
            "weapon_ranged" => Some(ItemCategory::WeaponRanged),
            "armor" => Some(ItemCategory::Armor),
            "accessory" => Some(ItemCategory::Accessory),
            "consumable" => Some(ItemCategory::Consumable),
            "material" => Some(ItemCategory::Material),
            _ => None,
        }
    }
}

/// Item rarity, totally ordered
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
}

impl Rarity {
    pub fn name(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "common" => Some(Rarity::Common),
            "rare" => Some(Rarity::Rare),
            "epic" => Some(Rarity::Epic),
            _ => None,
        }
    }
}

/// One-shot effect applied when a consumable is used
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConsumableEffect {
    /// Restore current hp, capped at twice base hp
    Heal { value: i32 },
    /// Grant experience to the user
    Exp { value: u32 },
    /// Deposit into a ledger pool
    Resource { pool: PoolId, value: i64 },
}

/// An equipment piece, consumable or material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    pub rarity: Rarity,
    /// Shop price in provisions; zero for items that are never sold
    #[serde(default)]
    pub price: u32,
    #[serde(default, skip_serializing_if = "StatBonus::is_empty")]
    pub bonus: StatBonus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<ConsumableEffect>,
}

impl Item {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: ItemCategory,
        rarity: Rarity,
    ) -> Self {
        Self {
            id: ItemId::new(id),
            name: name.into(),
            category,
            rarity,
            price: 0,
            bonus: StatBonus::default(),
            effect: None,
        }
    }

    pub fn with_price(mut self, price: u32) -> Self {
        self.price = price;
        self
    }

    pub fn with_bonus(mut self, bonus: StatBonus) -> Self {
        self.bonus = bonus;
        self
    }

    pub fn with_effect(mut self, effect: ConsumableEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn is_consumable(&self) -> bool {
        self.category == ItemCategory::Consumable
    }
}
