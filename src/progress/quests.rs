//! Daily quests - a rotating subset of goal templates
//!
//! At every day rollover the whole active set, progress included, is
//! discarded and a fresh draw of templates replaces it. Each quest pays
//! out exactly once when its progress counter reaches the target.

use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::DAILY_QUEST_COUNT;
use crate::core::types::{Location, PoolId};
use crate::progress::TrackedEvent;
use crate::reward::RewardBundle;

/// Which events advance a quest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestKind {
    /// Matches played in the forest
    ForestMatches,
    /// Matches played anywhere
    Matches,
    /// Fuel units spent
    FuelSpent,
    /// Items crafted
    Crafting,
    /// Resource units collected
    Collecting,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: String,
    pub kind: QuestKind,
    pub name: String,
    pub description: String,
    pub progress: u32,
    pub target: u32,
    pub reward: RewardBundle,
}

struct QuestTemplate {
    kind: QuestKind,
    name: &'static str,
    description: &'static str,
    target: u32,
    reward: RewardBundle,
}

fn templates() -> Vec<QuestTemplate> {
    vec![
        QuestTemplate {
            kind: QuestKind::ForestMatches,
            name: "Forest hunter",
            description: "Play 3 matches in the forest",
            target: 3,
            reward: RewardBundle::new().with_pool(PoolId::Provisions, 10),
        },
        QuestTemplate {
            kind: QuestKind::FuelSpent,
            name: "Fuel crisis",
            description: "Spend 5 fuel",
            target: 5,
            reward: RewardBundle::new().with_pool(PoolId::Metal, 15),
        },
        QuestTemplate {
            kind: QuestKind::Matches,
            name: "Fighting spirit",
            description: "Play 5 matches",
            target: 5,
            reward: RewardBundle::new().with_pool(PoolId::Tools, 8),
        },
        QuestTemplate {
            kind: QuestKind::Crafting,
            name: "Artisan",
            description: "Craft 2 items",
            target: 2,
            reward: RewardBundle::new()
                .with_pool(PoolId::Wood, 20)
                .with_pool(PoolId::Cloth, 10),
        },
        QuestTemplate {
            kind: QuestKind::Collecting,
            name: "Resource collector",
            description: "Collect 50 resources",
            target: 50,
            reward: RewardBundle::new()
                .with_pool(PoolId::Fuel, 5)
                .with_pool(PoolId::Provisions, 5),
        },
    ]
}

#[derive(Debug, Clone, Default)]
pub struct QuestLog {
    active: Vec<Quest>,
    completed: AHashSet<String>,
    last_reset_day: Option<u64>,
}

impl QuestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &[Quest] {
        &self.active
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    pub fn completed_ids(&self) -> impl Iterator<Item = &str> {
        self.completed.iter().map(String::as_str)
    }

    pub fn last_reset_day(&self) -> Option<u64> {
        self.last_reset_day
    }

    /// Redraw the daily set if `day` differs from the last reset day
    ///
    /// Discards all prior progress and completions. Returns whether a
    /// redraw happened.
    pub fn roll_daily(&mut self, day: u64, rng: &mut impl Rng) -> bool {
        if self.last_reset_day == Some(day) {
            return false;
        }

        let mut pool = templates();
        pool.shuffle(rng);
        self.active = pool
            .into_iter()
            .take(DAILY_QUEST_COUNT)
            .map(|template| Quest {
                id: format!("daily_{}_{:?}", day, template.kind).to_lowercase(),
                kind: template.kind,
                name: template.name.to_string(),
                description: template.description.to_string(),
                progress: 0,
                target: template.target,
                reward: template.reward,
            })
            .collect();
        self.completed.clear();
        self.last_reset_day = Some(day);
        true
    }

    /// Advance matching quests; returns indices of quests that completed
    /// on this event
    pub fn record(&mut self, event: &TrackedEvent) -> Vec<usize> {
        let mut newly_completed = Vec::new();
        for (index, quest) in self.active.iter_mut().enumerate() {
            if self.completed.contains(&quest.id) {
                continue;
            }

            let step = match (quest.kind, event) {
                (QuestKind::ForestMatches, TrackedEvent::MatchPlayed { location })
                    if *location == Location::Forest =>
                {
                    1
                }
                (QuestKind::Matches, TrackedEvent::MatchPlayed { .. }) => 1,
                (QuestKind::FuelSpent, TrackedEvent::FuelSpent { amount }) => *amount,
                (QuestKind::Crafting, TrackedEvent::ItemCrafted) => 1,
                (QuestKind::Collecting, TrackedEvent::ResourceCollected { amount }) => {
                    *amount as u32
                }
                _ => 0,
            };
            if step == 0 {
                continue;
            }

            quest.progress += step;
            if quest.progress >= quest.target {
                self.completed.insert(quest.id.clone());
                newly_completed.push(index);
            }
        }
        newly_completed
    }

    pub fn quest(&self, index: usize) -> &Quest {
        &self.active[index]
    }

    /// Restore the active set and completion state from a save
    pub fn restore(&mut self, active: Vec<Quest>, completed: Vec<String>, last_reset_day: Option<u64>) {
        self.active = active;
        self.completed = completed.into_iter().collect();
        self.last_reset_day = last_reset_day;
    }
}
