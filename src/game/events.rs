//! Observer events raised by core mutations
//!
//! Components never notify mid-mutation: events queue up on the bus and
//! the context flushes them once the whole operation has landed, so a
//! multi-entry reward is never partially visible. Observers receive
//! events by reference and hold no handle back into the context, which
//! rules out reentrant mutation from inside a callback.

use crate::core::types::{HeroId, PoolId};

/// A state change visible to the presentation/persistence layer
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// A ledger pool changed; carries the new amount
    LedgerChanged { pool: PoolId, amount: u32 },
    /// A warehouse pool reached a new upgrade level
    WarehouseUpgraded { pool: PoolId, level: u8 },
    /// Any hero mutation: experience, equipment, consumables
    HeroChanged { hero: HeroId },
    HeroLeveledUp { hero: HeroId, level: u32 },
    AchievementCompleted { id: String },
    QuestCompleted { id: String },
    /// The daily quest set was redrawn
    QuestsRolled { day: u64 },
    RecipeCreated { id: String },
    ItemCrafted { recipe: String },
    /// An item grant found no empty inventory slot and was dropped
    ItemDiscarded { item: String },
    ShopRestocked,
}

pub trait Observer {
    fn on_event(&mut self, event: &GameEvent);
}

#[derive(Default)]
pub struct EventBus {
    observers: Vec<Box<dyn Observer>>,
    pending: Vec<GameEvent>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Queue an event for the next flush
    pub fn publish(&mut self, event: GameEvent) {
        self.pending.push(event);
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Deliver every queued event, in order, to every observer
    pub fn flush(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.pending);
        for event in &batch {
            for observer in &mut self.observers {
                observer.on_event(event);
            }
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("observers", &self.observers.len())
            .field("pending", &self.pending)
            .finish()
    }
}
