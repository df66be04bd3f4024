//! Game clock with day granularity
//!
//! Time is advanced by explicit elapsed seconds fed in from the outside,
//! never read from the wall clock. The day index drives daily quest
//! rollover and the shop restock interval.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameClock {
    seconds: u64,
    seconds_per_day: u64,
}

impl GameClock {
    pub fn new(seconds_per_day: u64) -> Self {
        Self {
            seconds: 0,
            seconds_per_day,
        }
    }

    pub fn advance(&mut self, elapsed_secs: u64) {
        self.seconds += elapsed_secs;
    }

    pub fn total_seconds(&self) -> u64 {
        self.seconds
    }

    pub fn current_day(&self) -> u64 {
        self.seconds / self.seconds_per_day
    }

    pub fn seconds_per_day(&self) -> u64 {
        self.seconds_per_day
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new(crate::core::config::SECONDS_PER_DAY)
    }
}
