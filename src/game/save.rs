//! Save document and recovery-oriented restore
//!
//! Snapshots are plain serde documents. Restore never fails: every field
//! falls back to its default when missing or malformed, hero records are
//! parsed individually so one corrupt record drops with a warning
//! instead of poisoning the rest, and a document that does not parse at
//! all yields a fresh game.

use serde::{Deserialize, Serialize};

use crate::core::types::{HeroId, ItemId, Location, PoolId};
use crate::crafting::Recipe;
use crate::hero::Hero;
use crate::progress::{Quest, Statistics};

use super::GameContext;

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(default)]
    pub clock_seconds: u64,
    #[serde(default)]
    pub resources: Vec<(PoolId, u32)>,
    #[serde(default)]
    pub warehouse_levels: Vec<(PoolId, u8)>,
    /// Raw hero records; parsed one by one on restore
    #[serde(default)]
    pub heroes: Vec<serde_json::Value>,
    #[serde(default)]
    pub active_hero: Option<HeroId>,
    #[serde(default)]
    pub unlocked_locations: Vec<Location>,
    #[serde(default)]
    pub achievements_completed: Vec<String>,
    #[serde(default)]
    pub statistics: Statistics,
    #[serde(default)]
    pub quests_active: Vec<Quest>,
    #[serde(default)]
    pub quests_completed: Vec<String>,
    #[serde(default)]
    pub quest_reset_day: Option<u64>,
    #[serde(default)]
    pub custom_recipes: Vec<Recipe>,
    #[serde(default)]
    pub shop_stock: Vec<ItemId>,
    #[serde(default)]
    pub shop_last_refresh: Option<u64>,
}

impl GameContext {
    /// Capture the whole persistent state as a save document
    pub fn snapshot(&self) -> SaveGame {
        SaveGame {
            clock_seconds: self.clock.total_seconds(),
            resources: self.ledger.iter().collect(),
            warehouse_levels: self.warehouse.iter().collect(),
            heroes: self
                .roster
                .iter()
                .filter_map(|hero| serde_json::to_value(hero).ok())
                .collect(),
            active_hero: self.roster.active_id(),
            unlocked_locations: self.unlocked_locations.iter().copied().collect(),
            achievements_completed: self
                .achievements
                .completed_ids()
                .map(str::to_string)
                .collect(),
            statistics: self.achievements.stats.clone(),
            quests_active: self.quests.active().to_vec(),
            quests_completed: self.quests.completed_ids().map(str::to_string).collect(),
            quest_reset_day: self.quests.last_reset_day(),
            custom_recipes: self.crafting.custom_recipes().to_vec(),
            shop_stock: self.shop.stock_ids().to_vec(),
            shop_last_refresh: self.shop.last_refresh(),
        }
    }

    pub fn to_json(&self) -> crate::core::Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    /// Build a context from a save document
    ///
    /// Components the save does not mention keep their fresh-game state.
    pub fn from_save(save: SaveGame) -> Self {
        let mut ctx = Self::new();

        ctx.clock.advance(save.clock_seconds);
        for (pool, amount) in save.resources {
            ctx.ledger.set(pool, amount);
        }
        for (pool, level) in save.warehouse_levels {
            ctx.warehouse.set_level(pool, level);
        }

        if !save.heroes.is_empty() {
            let mut roster = crate::hero::HeroRoster::new();
            for record in save.heroes {
                match serde_json::from_value::<Hero>(record) {
                    Ok(mut hero) => {
                        hero.recompute_stats();
                        roster.add(hero);
                    }
                    Err(error) => {
                        tracing::warn!(%error, "dropping unreadable hero record");
                    }
                }
            }
            if let Some(id) = save.active_hero {
                // Falls back to the first restored hero when the saved
                // selection no longer exists
                let _ = roster.select(id);
            }
            if !roster.is_empty() {
                ctx.roster = roster;
            } else {
                tracing::warn!("no hero record survived, keeping starting party");
            }
        }

        if !save.unlocked_locations.is_empty() {
            ctx.unlocked_locations = save.unlocked_locations.into_iter().collect();
        }
        ctx.unlocked_locations.insert(Location::Forest);

        ctx.achievements
            .restore(save.achievements_completed, save.statistics);
        ctx.quests.restore(
            save.quests_active,
            save.quests_completed,
            save.quest_reset_day,
        );
        ctx.crafting.restore_custom(save.custom_recipes);
        ctx.shop.restore(save.shop_stock, save.shop_last_refresh);

        ctx
    }

    /// Parse a JSON save; a malformed document degrades to a fresh game
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<SaveGame>(json) {
            Ok(save) => Self::from_save(save),
            Err(error) => {
                tracing::warn!(%error, "unreadable save, starting fresh");
                Self::new()
            }
        }
    }
}
