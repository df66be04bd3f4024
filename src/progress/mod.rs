//! Progress tracking - statistics, achievements and daily quests

pub mod achievements;
pub mod quests;
pub mod stats;

pub use achievements::Achievements;
pub use quests::{Quest, QuestLog};
pub use stats::Statistics;

use crate::core::types::Location;

/// A milestone-relevant event fed to both trackers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedEvent {
    MatchPlayed { location: Location },
    ResourceCollected { amount: u64 },
    ItemCollected,
    ItemCrafted,
    FuelSpent { amount: u32 },
}
