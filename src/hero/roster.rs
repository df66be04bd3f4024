//! Hero roster - the collection of heroes plus active-hero selection

use serde::{Deserialize, Serialize};

use crate::core::error::{GameError, Result};
use crate::core::stats::StatBlock;
use crate::core::types::HeroId;
use crate::hero::{Archetype, Hero};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeroRoster {
    heroes: Vec<Hero>,
    active: Option<HeroId>,
}

impl HeroRoster {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four-hero starting party
    pub fn starting_party() -> Self {
        let mut roster = Self::new();
        roster.add(Hero::new(
            HeroId(1),
            "Torgar",
            Archetype::Warrior,
            StatBlock::new(120, 18, 12),
        ));
        roster.add(Hero::new(
            HeroId(2),
            "Elvira",
            Archetype::Archer,
            StatBlock::new(80, 22, 6).with_speed(15),
        ));
        roster.add(Hero::new(
            HeroId(3),
            "Merlin",
            Archetype::Mage,
            StatBlock::new(70, 25, 4),
        ));
        roster.add(Hero::new(
            HeroId(4),
            "Shadow",
            Archetype::Rogue,
            StatBlock::new(85, 20, 5).with_speed(18),
        ));
        roster.active = Some(HeroId(1));
        roster
    }

    pub fn add(&mut self, hero: Hero) {
        if self.active.is_none() {
            self.active = Some(hero.id);
        }
        self.heroes.push(hero);
    }

    pub fn get(&self, id: HeroId) -> Option<&Hero> {
        self.heroes.iter().find(|h| h.id == id)
    }

    pub fn get_mut(&mut self, id: HeroId) -> Option<&mut Hero> {
        self.heroes.iter_mut().find(|h| h.id == id)
    }

    /// Select the active hero
    pub fn select(&mut self, id: HeroId) -> Result<()> {
        if self.get(id).is_none() {
            return Err(GameError::HeroNotFound(id));
        }
        self.active = Some(id);
        Ok(())
    }

    pub fn active_id(&self) -> Option<HeroId> {
        self.active
    }

    pub fn active(&self) -> Option<&Hero> {
        self.active.and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self) -> Option<&mut Hero> {
        let id = self.active?;
        self.get_mut(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Hero> {
        self.heroes.iter()
    }

    pub fn len(&self) -> usize {
        self.heroes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heroes.is_empty()
    }
}
