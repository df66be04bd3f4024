//! Reward bundles - the payout contract shared by achievements, quests,
//! crafting and the shop
//!
//! A bundle is a batch of ledger deltas plus optional item grants.
//! Applying one is atomic from the observer's perspective: the events it
//! raises sit on the bus until the caller flushes after the whole bundle
//! has landed.

use serde::{Deserialize, Serialize};

use crate::core::types::PoolId;
use crate::economy::{ResourceLedger, Warehouse};
use crate::game::events::{EventBus, GameEvent};
use crate::hero::Hero;
use crate::item::Item;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewardBundle {
    #[serde(default)]
    pub deltas: Vec<(PoolId, i64)>,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl RewardBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pool(mut self, pool: PoolId, amount: i64) -> Self {
        self.deltas.push((pool, amount));
        self
    }

    pub fn with_item(mut self, item: Item) -> Self {
        self.items.push(item);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.deltas.is_empty() && self.items.is_empty()
    }
}

/// Apply a bundle against the ledger and the receiving hero
///
/// Ledger deltas clamp like any other adjustment. Item grants go to the
/// hero's first empty inventory slot; a grant that finds none is dropped,
/// observable only through an `ItemDiscarded` event. The caller flushes
/// the bus once the bundle is done.
pub fn apply(
    bundle: &RewardBundle,
    ledger: &mut ResourceLedger,
    warehouse: &Warehouse,
    mut hero: Option<&mut Hero>,
    bus: &mut EventBus,
) {
    for (pool, delta) in &bundle.deltas {
        let applied = ledger.adjust(*pool, *delta, warehouse.capacity_for(*pool));
        if applied != 0 {
            bus.publish(GameEvent::LedgerChanged {
                pool: *pool,
                amount: ledger.get(*pool),
            });
        }
    }

    for item in &bundle.items {
        match hero.as_deref_mut() {
            Some(hero) => match hero.add_to_inventory(item.clone()) {
                Ok(_) => bus.publish(GameEvent::HeroChanged { hero: hero.id }),
                Err(dropped) => bus.publish(GameEvent::ItemDiscarded {
                    item: dropped.name,
                }),
            },
            None => bus.publish(GameEvent::ItemDiscarded {
                item: item.name.clone(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::StatBlock;
    use crate::core::types::HeroId;
    use crate::hero::Archetype;
    use crate::item::{ItemCategory, Rarity};

    fn hero() -> Hero {
        Hero::new(HeroId(1), "Torgar", Archetype::Warrior, StatBlock::new(120, 18, 12))
    }

    #[test]
    fn test_apply_adjusts_pools_and_grants_items() {
        let mut ledger = ResourceLedger::new();
        let warehouse = Warehouse::new();
        let mut bus = EventBus::new();
        let mut recipient = hero();

        let bundle = RewardBundle::new()
            .with_pool(PoolId::Wood, 10)
            .with_pool(PoolId::Metal, 5)
            .with_item(Item::new("trophy", "Trophy", ItemCategory::Accessory, Rarity::Rare));

        apply(&bundle, &mut ledger, &warehouse, Some(&mut recipient), &mut bus);

        assert_eq!(ledger.get(PoolId::Wood), 10);
        assert_eq!(ledger.get(PoolId::Metal), 5);
        assert!(recipient.inventory()[0].is_some());
        assert!(bus.has_pending());
    }

    #[test]
    fn test_grant_to_full_inventory_is_dropped_with_event() {
        let mut ledger = ResourceLedger::new();
        let warehouse = Warehouse::new();
        let mut bus = EventBus::new();
        let mut recipient = hero();
        for i in 0..9 {
            recipient
                .add_to_inventory(Item::new(
                    format!("junk{i}"),
                    "Scrap",
                    ItemCategory::Material,
                    Rarity::Common,
                ))
                .unwrap();
        }

        struct Count(std::rc::Rc<std::cell::RefCell<u32>>);
        impl crate::game::events::Observer for Count {
            fn on_event(&mut self, event: &GameEvent) {
                if matches!(event, GameEvent::ItemDiscarded { .. }) {
                    *self.0.borrow_mut() += 1;
                }
            }
        }
        let discarded = std::rc::Rc::new(std::cell::RefCell::new(0));
        bus.subscribe(Box::new(Count(discarded.clone())));

        let bundle = RewardBundle::new()
            .with_item(Item::new("lost", "Lost ring", ItemCategory::Accessory, Rarity::Epic));
        apply(&bundle, &mut ledger, &warehouse, Some(&mut recipient), &mut bus);
        bus.flush();

        assert_eq!(*discarded.borrow(), 1);
    }
}
