//! Hero archetype definitions
//!
//! Each archetype carries a fixed per-level growth vector and a passive
//! per-second resource generation vector.

use serde::{Deserialize, Serialize};

use crate::core::stats::StatBonus;
use crate::core::types::PoolId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Frontline bruiser, grows tanky, forages provisions
    Warrior,
    /// Ranged skirmisher with speed growth, scavenges fuel
    Archer,
    /// Glass-cannon caster, tinkers up tools
    Mage,
    /// Fast all-rounder, generates a trickle of everything
    Rogue,
}

impl Archetype {
    pub const ALL: [Archetype; 4] = [
        Archetype::Warrior,
        Archetype::Archer,
        Archetype::Mage,
        Archetype::Rogue,
    ];

    /// Base-stat increase applied on every level-up
    pub fn growth(&self) -> StatBonus {
        match self {
            Archetype::Warrior => StatBonus {
                hp: 15,
                attack: 3,
                defense: 2,
                speed: 0,
            },
            Archetype::Archer => StatBonus {
                hp: 8,
                attack: 5,
                defense: 1,
                speed: 2,
            },
            Archetype::Mage => StatBonus {
                hp: 5,
                attack: 7,
                defense: 1,
                speed: 0,
            },
            Archetype::Rogue => StatBonus {
                hp: 7,
                attack: 6,
                defense: 1,
                speed: 3,
            },
        }
    }

    /// Passive generation vector, units per second
    pub fn generation(&self) -> &'static [(PoolId, f64)] {
        match self {
            Archetype::Warrior => &[(PoolId::Provisions, 0.2)],
            Archetype::Archer => &[(PoolId::Fuel, 0.2)],
            Archetype::Mage => &[(PoolId::Tools, 0.2)],
            Archetype::Rogue => &[
                (PoolId::Tools, 1.0),
                (PoolId::Provisions, 1.0),
                (PoolId::Fuel, 1.0),
            ],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Warrior => "warrior",
            Archetype::Archer => "archer",
            Archetype::Mage => "mage",
            Archetype::Rogue => "rogue",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "warrior" => Some(Archetype::Warrior),
            "archer" => Some(Archetype::Archer),
            "mage" => Some(Archetype::Mage),
            "rogue" => Some(Archetype::Rogue),
            _ => None,
        }
    }
}
