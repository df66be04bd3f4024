//! Engine tuning constants with documented rationale
//!
//! All magic numbers are collected here with explanations of their purpose
//! and how they interact with each other. Changing them will affect
//! progression pacing and economy feel.

use crate::core::types::PoolId;

/// Experience required to reach level 2
///
/// Every level-up multiplies the requirement by [`EXP_GROWTH`], so the
/// curve is 100, 150, 225, 337, ...
pub const BASE_EXP_TO_LEVEL: u32 = 100;

/// Per-level growth factor for the experience requirement
///
/// The product is floored after each multiplication, which keeps
/// thresholds integral and reproducible.
pub const EXP_GROWTH: f32 = 1.5;

/// Experience awarded for one match
pub const MATCH_EXP_REWARD: u32 = 100;

/// Units of the location's cost pool consumed by one match
pub const MATCH_COST: u32 = 1;

/// Fixed hero inventory size
pub const INVENTORY_SLOTS: usize = 9;

/// A skill point is awarded on every level divisible by this
pub const SKILL_POINT_INTERVAL: u32 = 3;

/// Healing consumables cap current hp at `base hp * this`
pub const HEAL_CAP_MULTIPLIER: i32 = 2;

/// Warehouse upgrade levels run 1..=5; capacity scales linearly with level
pub const MAX_WAREHOUSE_LEVEL: u8 = 5;

/// Level-1 capacity for resource pools (provisions, fuel, tools)
pub const RESOURCE_BASE_CAPACITY: u32 = 100;

/// Level-1 capacity for material pools (wood, metal, cloth, ...)
pub const MATERIAL_BASE_CAPACITY: u32 = 200;

/// Pools every fresh game starts with
pub const STARTING_RESOURCES: [(PoolId, u32); 3] = [
    (PoolId::Provisions, 10),
    (PoolId::Fuel, 5),
    (PoolId::Tools, 3),
];

/// Quests drawn per calendar day
pub const DAILY_QUEST_COUNT: usize = 3;

/// Items offered in the shop at a time
pub const SHOP_STOCK_SIZE: usize = 6;

/// Seconds between shop stock rotations
pub const SHOP_REFRESH_SECS: u64 = 30;

/// Game seconds per calendar day, drives the daily quest rollover
pub const SECONDS_PER_DAY: u64 = 86_400;

/// Crafting rarity thresholds over the weighted ingredient sum
///
/// A combination below RARE is common, below EPIC is rare, at or above
/// EPIC is epic. Weights live in the crafting module.
pub const RARITY_RARE_THRESHOLD: u32 = 10;
pub const RARITY_EPIC_THRESHOLD: u32 = 20;
