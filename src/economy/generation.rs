//! Passive resource generation
//!
//! Each unlocked hero contributes a per-second generation vector set by
//! their archetype. Rates are fractional, so every tick accumulates
//! progress per pool and commits only the whole-unit part to the ledger,
//! carrying the remainder forward. Truncating the remainder each tick
//! would silently lose most of the generation at sub-unit rates.

use ahash::AHashMap;

use crate::core::types::PoolId;
use crate::economy::ledger::ResourceLedger;
use crate::economy::warehouse::Warehouse;
use crate::hero::Hero;

#[derive(Debug, Clone, Default)]
pub struct PassiveGeneration {
    carry: AHashMap<PoolId, f64>,
}

impl PassiveGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate `elapsed_secs` of generation and commit whole units
    ///
    /// Returns the amounts actually deposited per pool (after capacity
    /// clamping), which the caller folds into notifications and the
    /// collected-resources statistic.
    pub fn tick<'a>(
        &mut self,
        elapsed_secs: u64,
        heroes: impl Iterator<Item = &'a Hero>,
        ledger: &mut ResourceLedger,
        warehouse: &Warehouse,
    ) -> Vec<(PoolId, u32)> {
        if elapsed_secs == 0 {
            return Vec::new();
        }

        for hero in heroes.filter(|h| h.unlocked) {
            for (pool, rate) in hero.archetype.generation() {
                *self.carry.entry(*pool).or_insert(0.0) += rate * elapsed_secs as f64;
            }
        }

        let mut committed = Vec::new();
        for pool in PoolId::ALL {
            let Some(accumulated) = self.carry.get_mut(&pool) else {
                continue;
            };
            let whole = accumulated.floor();
            if whole < 1.0 {
                continue;
            }
            // Progress above capacity is forfeit, not banked
            *accumulated -= whole;
            let applied = ledger.adjust(pool, whole as i64, warehouse.capacity_for(pool));
            if applied > 0 {
                committed.push((pool, applied as u32));
            }
        }
        committed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::stats::StatBlock;
    use crate::core::types::HeroId;
    use crate::hero::Archetype;

    fn warrior() -> Hero {
        Hero::new(HeroId(1), "Torgar", Archetype::Warrior, StatBlock::new(120, 18, 12))
    }

    #[test]
    fn test_fractional_carry_is_retained() {
        let mut generation = PassiveGeneration::new();
        let mut ledger = ResourceLedger::new();
        let warehouse = Warehouse::new();
        let heroes = vec![warrior()];

        // Warrior generates 0.2 provisions/sec: 4 seconds is not yet a unit
        let committed = generation.tick(4, heroes.iter(), &mut ledger, &warehouse);
        assert!(committed.is_empty());
        assert_eq!(ledger.get(PoolId::Provisions), 0);

        // One more second tips the accumulator over 1.0
        let committed = generation.tick(1, heroes.iter(), &mut ledger, &warehouse);
        assert_eq!(committed, vec![(PoolId::Provisions, 1)]);
        assert_eq!(ledger.get(PoolId::Provisions), 1);
    }

    #[test]
    fn test_many_small_ticks_equal_one_large_tick() {
        let heroes = vec![warrior()];
        let warehouse = Warehouse::new();

        let mut split_gen = PassiveGeneration::new();
        let mut split_ledger = ResourceLedger::new();
        for _ in 0..60 {
            split_gen.tick(1, heroes.iter(), &mut split_ledger, &warehouse);
        }

        let mut bulk_gen = PassiveGeneration::new();
        let mut bulk_ledger = ResourceLedger::new();
        bulk_gen.tick(60, heroes.iter(), &mut bulk_ledger, &warehouse);

        assert_eq!(
            split_ledger.get(PoolId::Provisions),
            bulk_ledger.get(PoolId::Provisions)
        );
        assert_eq!(bulk_ledger.get(PoolId::Provisions), 12);
    }

    #[test]
    fn test_locked_heroes_generate_nothing() {
        let mut hero = warrior();
        hero.unlocked = false;
        let heroes = vec![hero];

        let mut generation = PassiveGeneration::new();
        let mut ledger = ResourceLedger::new();
        let warehouse = Warehouse::new();

        let committed = generation.tick(100, heroes.iter(), &mut ledger, &warehouse);
        assert!(committed.is_empty());
    }

    #[test]
    fn test_rogue_generates_all_three_resources() {
        let rogue = Hero::new(
            HeroId(4),
            "Shadow",
            Archetype::Rogue,
            StatBlock::new(85, 20, 5).with_speed(18),
        );
        let heroes = vec![rogue];

        let mut generation = PassiveGeneration::new();
        let mut ledger = ResourceLedger::new();
        let warehouse = Warehouse::new();

        generation.tick(3, heroes.iter(), &mut ledger, &warehouse);
        assert_eq!(ledger.get(PoolId::Provisions), 3);
        assert_eq!(ledger.get(PoolId::Fuel), 3);
        assert_eq!(ledger.get(PoolId::Tools), 3);
    }
}
