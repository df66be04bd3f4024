//! Combat stat blocks and equipment bonuses
//!
//! Stats form a closed set (hp, attack, defense, speed). Speed is optional
//! on a stat block: most heroes never have it, and it only materializes
//! when growth or an equipped item grants some.

use serde::{Deserialize, Serialize};

/// A hero's stat values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBlock {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i32>,
}

impl StatBlock {
    pub fn new(hp: i32, attack: i32, defense: i32) -> Self {
        Self {
            hp,
            attack,
            defense,
            speed: None,
        }
    }

    pub fn with_speed(mut self, speed: i32) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Add a bonus entrywise
    ///
    /// A nonzero speed bonus on a block without speed initializes the
    /// entry from the bonus value.
    pub fn apply(&mut self, bonus: &StatBonus) {
        self.hp += bonus.hp;
        self.attack += bonus.attack;
        self.defense += bonus.defense;
        if bonus.speed != 0 {
            self.speed = Some(self.speed.unwrap_or(0) + bonus.speed);
        }
    }
}

/// Signed per-stat deltas carried by items and level-up growth
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatBonus {
    #[serde(default)]
    pub hp: i32,
    #[serde(default)]
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
    #[serde(default)]
    pub speed: i32,
}

impl StatBonus {
    pub fn is_empty(&self) -> bool {
        *self == StatBonus::default()
    }
}
