//! Resource ledger - named numeric pools with clamped mutation
//!
//! Every mutation clamps the result into `[0, capacity]`; going over or
//! under is never an error, the excess is simply dropped. Gated operations
//! (crafting, shop) pre-check with [`ResourceLedger::has`] before debiting.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::PoolId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceLedger {
    amounts: AHashMap<PoolId, u32>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh-game ledger seeded with the starting resources
    pub fn with_starting_amounts() -> Self {
        let mut ledger = Self::new();
        for (pool, amount) in crate::core::config::STARTING_RESOURCES {
            ledger.amounts.insert(pool, amount);
        }
        ledger
    }

    /// Current amount, 0 for pools never touched
    pub fn get(&self, pool: PoolId) -> u32 {
        self.amounts.get(&pool).copied().unwrap_or(0)
    }

    /// Whether at least `amount` of `pool` is available
    pub fn has(&self, pool: PoolId, amount: u32) -> bool {
        self.get(pool) >= amount
    }

    /// Apply a signed delta, clamped into `[0, capacity]`
    ///
    /// Returns the delta actually applied, which callers use to decide
    /// whether a change notification is due.
    pub fn adjust(&mut self, pool: PoolId, delta: i64, capacity: u32) -> i64 {
        let current = self.get(pool) as i64;
        let next = (current + delta).clamp(0, capacity as i64);
        if next == current {
            return 0;
        }
        self.amounts.insert(pool, next as u32);
        next - current
    }

    /// Overwrite a pool directly, used by save restoration
    pub fn set(&mut self, pool: PoolId, amount: u32) {
        self.amounts.insert(pool, amount);
    }

    /// All pools with a nonzero history, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (PoolId, u32)> + '_ {
        PoolId::ALL
            .into_iter()
            .filter_map(|pool| self.amounts.get(&pool).map(|amount| (pool, *amount)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust_clamps_at_capacity() {
        let mut ledger = ResourceLedger::new();
        // Warehouse level 1 wood capacity is 200
        let applied = ledger.adjust(PoolId::Wood, 250, 200);
        assert_eq!(applied, 200);
        assert_eq!(ledger.get(PoolId::Wood), 200);
    }

    #[test]
    fn test_adjust_clamps_at_zero() {
        let mut ledger = ResourceLedger::new();
        ledger.adjust(PoolId::Metal, 30, 200);
        let applied = ledger.adjust(PoolId::Metal, -100, 200);
        assert_eq!(applied, -30);
        assert_eq!(ledger.get(PoolId::Metal), 0);
    }

    #[test]
    fn test_adjust_reports_zero_when_saturated() {
        let mut ledger = ResourceLedger::new();
        ledger.adjust(PoolId::Wood, 200, 200);
        assert_eq!(ledger.adjust(PoolId::Wood, 50, 200), 0);
        assert_eq!(ledger.adjust(PoolId::Cloth, -10, 200), 0);
    }

    #[test]
    fn test_starting_amounts() {
        let ledger = ResourceLedger::with_starting_amounts();
        assert_eq!(ledger.get(PoolId::Provisions), 10);
        assert_eq!(ledger.get(PoolId::Fuel), 5);
        assert_eq!(ledger.get(PoolId::Tools), 3);
        assert_eq!(ledger.get(PoolId::Wood), 0);
    }

    #[test]
    fn test_has() {
        let mut ledger = ResourceLedger::new();
        ledger.adjust(PoolId::Cloth, 10, 200);
        assert!(ledger.has(PoolId::Cloth, 10));
        assert!(!ledger.has(PoolId::Cloth, 11));
        assert!(ledger.has(PoolId::Planks, 0));
    }
}
