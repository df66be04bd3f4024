//! Hero - leveling state machine, inventory and equipment
//!
//! A hero owns a fixed nine-slot inventory and three named equipment
//! slots. Items move between the two by value, so a given item can never
//! appear in two containers at once. Current stats are always re-derived
//! from base stats plus equipment, never patched incrementally.

pub mod archetype;
pub mod roster;

pub use archetype::Archetype;
pub use roster::HeroRoster;

use serde::{Deserialize, Serialize};

use crate::core::config::{
    BASE_EXP_TO_LEVEL, EXP_GROWTH, HEAL_CAP_MULTIPLIER, INVENTORY_SLOTS, SKILL_POINT_INTERVAL,
};
use crate::core::error::{GameError, Result};
use crate::core::stats::StatBlock;
use crate::core::types::{HeroId, PoolId};
use crate::item::{ConsumableEffect, Item};

/// The three named equipment slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipSlot {
    Weapon,
    Armor,
    Accessory,
}

impl EquipSlot {
    pub const ALL: [EquipSlot; 3] = [EquipSlot::Weapon, EquipSlot::Armor, EquipSlot::Accessory];

    pub fn name(&self) -> &'static str {
        match self {
            EquipSlot::Weapon => "weapon",
            EquipSlot::Armor => "armor",
            EquipSlot::Accessory => "accessory",
        }
    }

    /// Resolve a slot by name; callers surface `InvalidSlot` on `None`
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "weapon" => Some(EquipSlot::Weapon),
            "armor" => Some(EquipSlot::Armor),
            "accessory" => Some(EquipSlot::Accessory),
            _ => None,
        }
    }
}

/// Equipment held in the three named slots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<Item>,
    pub armor: Option<Item>,
    pub accessory: Option<Item>,
}

impl Equipment {
    pub fn slot(&self, slot: EquipSlot) -> &Option<Item> {
        match slot {
            EquipSlot::Weapon => &self.weapon,
            EquipSlot::Armor => &self.armor,
            EquipSlot::Accessory => &self.accessory,
        }
    }

    fn slot_mut(&mut self, slot: EquipSlot) -> &mut Option<Item> {
        match slot {
            EquipSlot::Weapon => &mut self.weapon,
            EquipSlot::Armor => &mut self.armor,
            EquipSlot::Accessory => &mut self.accessory,
        }
    }

    /// Items currently equipped
    pub fn equipped(&self) -> impl Iterator<Item = &Item> {
        EquipSlot::ALL
            .into_iter()
            .filter_map(|slot| self.slot(slot).as_ref())
    }
}

/// Returned when an equip cannot complete; hands the item back so the
/// caller keeps ownership.
#[derive(Debug)]
pub struct EquipRejected {
    pub item: Item,
    pub error: GameError,
}

/// Effect of a used consumable that the hero cannot apply itself and the
/// context routes onward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConsumableOutcome {
    /// Heal or experience, fully applied internally
    Applied,
    /// Ledger deposit the caller must perform
    GrantResource { pool: PoolId, amount: i64 },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hero {
    pub id: HeroId,
    pub name: String,
    pub archetype: Archetype,
    pub level: u32,
    pub exp: u32,
    pub exp_to_next: u32,
    pub base_stats: StatBlock,
    pub current_stats: StatBlock,
    inventory: [Option<Item>; INVENTORY_SLOTS],
    equipment: Equipment,
    pub skill_points: u32,
    pub unlocked: bool,
}

impl Hero {
    pub fn new(
        id: HeroId,
        name: impl Into<String>,
        archetype: Archetype,
        base_stats: StatBlock,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            archetype,
            level: 1,
            exp: 0,
            exp_to_next: BASE_EXP_TO_LEVEL,
            base_stats,
            current_stats: base_stats,
            inventory: Default::default(),
            equipment: Equipment::default(),
            skill_points: 0,
            unlocked: true,
        }
    }

    pub fn inventory(&self) -> &[Option<Item>] {
        &self.inventory
    }

    pub fn equipment(&self) -> &Equipment {
        &self.equipment
    }

    /// Accumulate experience and resolve any level-ups
    ///
    /// Returns the number of levels gained. `exp` is always below
    /// `exp_to_next` afterwards and the level never decreases.
    pub fn add_experience(&mut self, amount: u32) -> u32 {
        if amount == 0 {
            return 0;
        }
        self.exp += amount;

        let mut gained = 0;
        while self.exp >= self.exp_to_next {
            self.exp -= self.exp_to_next;
            self.exp_to_next = (self.exp_to_next as f32 * EXP_GROWTH).floor() as u32;
            self.level += 1;
            gained += 1;

            self.base_stats.apply(&self.archetype.growth());
            if self.level % SKILL_POINT_INTERVAL == 0 {
                self.skill_points += 1;
            }
        }

        self.recompute_stats();
        gained
    }

    /// Re-derive current stats from base stats plus equipment
    ///
    /// Idempotent; must be re-run after any equipment or base-stat
    /// change instead of patching the previous values.
    pub fn recompute_stats(&mut self) {
        let mut stats = self.base_stats;
        for item in self.equipment.equipped() {
            stats.apply(&item.bonus);
        }
        self.current_stats = stats;
    }

    /// Index of the first empty inventory slot
    pub fn first_empty_slot(&self) -> Option<usize> {
        self.inventory.iter().position(|slot| slot.is_none())
    }

    /// Place an item into the first empty inventory slot
    ///
    /// On a full inventory the item is handed back unchanged.
    pub fn add_to_inventory(&mut self, item: Item) -> std::result::Result<usize, Item> {
        match self.first_empty_slot() {
            Some(index) => {
                self.inventory[index] = Some(item);
                Ok(index)
            }
            None => Err(item),
        }
    }

    /// Equip an item sourced from outside the inventory
    ///
    /// A displaced occupant moves to the first empty inventory slot; if
    /// the inventory is full the whole operation fails and nothing
    /// changes.
    pub fn equip(&mut self, item: Item, slot: EquipSlot) -> std::result::Result<(), EquipRejected> {
        if self.equipment.slot(slot).is_some() && self.first_empty_slot().is_none() {
            return Err(EquipRejected {
                item,
                error: GameError::InventoryFull,
            });
        }
        if let Some(displaced) = self.equipment.slot_mut(slot).replace(item) {
            // Checked above, cannot fail
            let _ = self.add_to_inventory(displaced);
        }
        self.recompute_stats();
        Ok(())
    }

    /// Equip the item at `index`, swapping any displaced occupant into
    /// the vacated slot
    pub fn equip_from_inventory(&mut self, index: usize, slot: EquipSlot) -> Result<()> {
        let item = self
            .inventory
            .get_mut(index)
            .ok_or_else(|| GameError::InvalidSlot(format!("inventory index {index}")))?
            .take()
            .ok_or_else(|| GameError::InvalidSlot(format!("inventory slot {index} is empty")))?;

        let displaced = self.equipment.slot_mut(slot).replace(item);
        self.inventory[index] = displaced;
        self.recompute_stats();
        Ok(())
    }

    /// Move the slot's item back into the inventory
    ///
    /// Fails with `InventoryFull` leaving state unchanged when no
    /// inventory slot is free.
    pub fn unequip(&mut self, slot: EquipSlot) -> Result<()> {
        if self.equipment.slot(slot).is_none() {
            return Ok(());
        }
        let Some(index) = self.first_empty_slot() else {
            return Err(GameError::InventoryFull);
        };
        self.inventory[index] = self.equipment.slot_mut(slot).take();
        self.recompute_stats();
        Ok(())
    }

    /// Use the consumable at `index`
    ///
    /// Heal raises current hp capped at twice base hp; exp routes through
    /// [`Hero::add_experience`]; resource effects are returned for the
    /// caller to deposit into the ledger. The slot is cleared either way.
    pub fn use_consumable(&mut self, index: usize) -> Result<ConsumableOutcome> {
        let slot = self
            .inventory
            .get_mut(index)
            .ok_or_else(|| GameError::InvalidSlot(format!("inventory index {index}")))?;
        let item = match slot.take() {
            Some(item) if item.is_consumable() => item,
            other => {
                *slot = other;
                return Err(GameError::InvalidSlot(format!(
                    "inventory slot {index} holds no consumable"
                )));
            }
        };

        match item.effect {
            Some(ConsumableEffect::Heal { value }) => {
                self.recompute_stats();
                let cap = self.base_stats.hp * HEAL_CAP_MULTIPLIER;
                self.current_stats.hp = (self.current_stats.hp + value).min(cap);
                Ok(ConsumableOutcome::Applied)
            }
            Some(ConsumableEffect::Exp { value }) => {
                self.add_experience(value);
                Ok(ConsumableOutcome::Applied)
            }
            Some(ConsumableEffect::Resource { pool, value }) => {
                self.recompute_stats();
                Ok(ConsumableOutcome::GrantResource {
                    pool,
                    amount: value,
                })
            }
            None => {
                self.recompute_stats();
                Ok(ConsumableOutcome::Applied)
            }
        }
    }
}
