//! Cumulative gameplay statistics
//!
//! Mutated only through tracker calls, never read destructively.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::core::types::Location;
use crate::progress::TrackedEvent;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(default)]
    pub matches_played: u32,
    #[serde(default)]
    pub total_resources_collected: u64,
    #[serde(default)]
    pub items_collected: u32,
    #[serde(default)]
    pub items_crafted: u32,
    #[serde(default)]
    pub fuel_spent: u32,
    #[serde(default)]
    pub visited_locations: AHashSet<Location>,
}

impl Statistics {
    pub fn record(&mut self, event: &TrackedEvent) {
        match event {
            TrackedEvent::MatchPlayed { location } => {
                self.matches_played += 1;
                self.visited_locations.insert(*location);
            }
            TrackedEvent::ResourceCollected { amount } => {
                self.total_resources_collected += amount;
            }
            TrackedEvent::ItemCollected => self.items_collected += 1,
            TrackedEvent::ItemCrafted => self.items_crafted += 1,
            TrackedEvent::FuelSpent { amount } => self.fuel_spent += amount,
        }
    }
}
