//! Achievements - one-shot milestone rules over cumulative statistics
//!
//! Rules are pure predicates over the statistics snapshot. On every
//! tracked event each incomplete rule is re-evaluated; a rule that holds
//! moves into the completed set, pays out once and is never evaluated
//! again.

use ahash::AHashSet;

use crate::core::types::PoolId;
use crate::progress::{Statistics, TrackedEvent};
use crate::reward::RewardBundle;

pub struct AchievementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub condition: fn(&Statistics) -> bool,
    pub reward: RewardBundle,
}

pub struct Achievements {
    defs: Vec<AchievementDef>,
    completed: AHashSet<String>,
    pub stats: Statistics,
}

impl Achievements {
    /// The built-in achievement list
    pub fn with_defaults() -> Self {
        let defs = vec![
            AchievementDef {
                id: "first_match",
                name: "First step",
                description: "Play your first match",
                condition: |stats| stats.matches_played >= 1,
                reward: RewardBundle::new().with_pool(PoolId::Provisions, 5),
            },
            AchievementDef {
                id: "resource_hoarder",
                name: "Hoarder",
                description: "Collect 100 units of resources in total",
                condition: |stats| stats.total_resources_collected >= 100,
                reward: RewardBundle::new()
                    .with_pool(PoolId::Wood, 10)
                    .with_pool(PoolId::Metal, 5),
            },
            AchievementDef {
                id: "veteran",
                name: "Veteran",
                description: "Play 10 matches",
                condition: |stats| stats.matches_played >= 10,
                reward: RewardBundle::new()
                    .with_pool(PoolId::Fuel, 10)
                    .with_pool(PoolId::Tools, 10),
            },
            AchievementDef {
                id: "collector",
                name: "Collector",
                description: "Acquire 5 items",
                condition: |stats| stats.items_collected >= 5,
                reward: RewardBundle::new()
                    .with_pool(PoolId::Metal, 15)
                    .with_pool(PoolId::Cloth, 10),
            },
            AchievementDef {
                id: "crafter",
                name: "Master crafter",
                description: "Craft your first item",
                condition: |stats| stats.items_crafted >= 1,
                reward: RewardBundle::new().with_pool(PoolId::Tools, 5),
            },
            AchievementDef {
                id: "explorer",
                name: "Explorer",
                description: "Visit every location",
                condition: |stats| stats.visited_locations.len() >= 3,
                reward: RewardBundle::new()
                    .with_pool(PoolId::Provisions, 10)
                    .with_pool(PoolId::Fuel, 10),
            },
        ];

        Self {
            defs,
            completed: AHashSet::new(),
            stats: Statistics::default(),
        }
    }

    /// Fold an event into the statistics and re-evaluate incomplete rules
    ///
    /// Returns the indices of rules that completed on this event.
    pub fn record(&mut self, event: &TrackedEvent) -> Vec<usize> {
        self.stats.record(event);

        let mut newly_completed = Vec::new();
        for (index, def) in self.defs.iter().enumerate() {
            if self.completed.contains(def.id) {
                continue;
            }
            if (def.condition)(&self.stats) {
                self.completed.insert(def.id.to_string());
                newly_completed.push(index);
            }
        }
        newly_completed
    }

    pub fn def(&self, index: usize) -> &AchievementDef {
        &self.defs[index]
    }

    pub fn defs(&self) -> &[AchievementDef] {
        &self.defs
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    /// (completed, total) counts for progress display
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.defs.len())
    }

    /// Restore completion state and statistics from a save
    pub fn restore(&mut self, completed: Vec<String>, stats: Statistics) {
        self.completed = completed.into_iter().collect();
        self.stats = stats;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Location;

    #[test]
    fn test_achievement_completes_exactly_once() {
        let mut achievements = Achievements::with_defaults();
        assert!(!achievements.is_completed("first_match"));

        let completed = achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Forest,
        });
        assert_eq!(completed.len(), 1);
        assert_eq!(achievements.def(completed[0]).id, "first_match");
        assert!(achievements.is_completed("first_match"));

        // A second match does not re-complete it
        let completed = achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Forest,
        });
        assert!(completed.is_empty());
    }

    #[test]
    fn test_hoarder_threshold() {
        let mut achievements = Achievements::with_defaults();
        assert!(achievements
            .record(&TrackedEvent::ResourceCollected { amount: 99 })
            .is_empty());
        let completed = achievements.record(&TrackedEvent::ResourceCollected { amount: 1 });
        assert_eq!(completed.len(), 1);
        assert_eq!(achievements.def(completed[0]).id, "resource_hoarder");
    }

    #[test]
    fn test_explorer_needs_all_locations() {
        let mut achievements = Achievements::with_defaults();
        achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Forest,
        });
        achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Mountains,
        });
        assert!(!achievements.is_completed("explorer"));

        achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Ruins,
        });
        assert!(achievements.is_completed("explorer"));
    }

    #[test]
    fn test_restore_skips_completed_rules() {
        let mut achievements = Achievements::with_defaults();
        achievements.restore(vec!["first_match".into()], Statistics::default());

        let completed = achievements.record(&TrackedEvent::MatchPlayed {
            location: Location::Forest,
        });
        assert!(completed.is_empty());
    }
}
