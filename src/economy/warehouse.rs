//! Warehouse - derives effective pool capacity from upgrade levels
//!
//! Each pool has an upgrade level in 1..=5 and an effective capacity of
//! `base capacity * level`. Upgrading always succeeds; cost gating is a
//! caller concern.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::config::MAX_WAREHOUSE_LEVEL;
use crate::core::types::PoolId;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Warehouse {
    upgrades: AHashMap<PoolId, u8>,
}

impl Warehouse {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upgrade level for a pool, 1 if never upgraded
    pub fn level(&self, pool: PoolId) -> u8 {
        self.upgrades.get(&pool).copied().unwrap_or(1)
    }

    /// Effective storage capacity for a pool
    pub fn capacity_for(&self, pool: PoolId) -> u32 {
        pool.base_capacity() * self.level(pool) as u32
    }

    /// Raise a pool's level by one, saturating at the maximum
    ///
    /// Returns the new level.
    pub fn upgrade(&mut self, pool: PoolId) -> u8 {
        let next = (self.level(pool) + 1).min(MAX_WAREHOUSE_LEVEL);
        self.upgrades.insert(pool, next);
        next
    }

    /// Restore a level from a save, clamped into the valid range
    pub fn set_level(&mut self, pool: PoolId, level: u8) {
        self.upgrades.insert(pool, level.clamp(1, MAX_WAREHOUSE_LEVEL));
    }

    /// How full a pool is, in percent capped at 100
    pub fn percent_full(&self, pool: PoolId, current: u32) -> u32 {
        let capacity = self.capacity_for(pool) as u64;
        ((current as u64 * 100) / capacity).min(100) as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = (PoolId, u8)> + '_ {
        PoolId::ALL.into_iter().map(|pool| (pool, self.level(pool)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capacity_scales_with_level() {
        let mut warehouse = Warehouse::new();
        assert_eq!(warehouse.capacity_for(PoolId::Provisions), 100);
        assert_eq!(warehouse.capacity_for(PoolId::Wood), 200);

        warehouse.upgrade(PoolId::Wood);
        assert_eq!(warehouse.level(PoolId::Wood), 2);
        assert_eq!(warehouse.capacity_for(PoolId::Wood), 400);
    }

    #[test]
    fn test_upgrade_saturates() {
        let mut warehouse = Warehouse::new();
        for _ in 0..10 {
            warehouse.upgrade(PoolId::Fuel);
        }
        assert_eq!(warehouse.level(PoolId::Fuel), MAX_WAREHOUSE_LEVEL);
        assert_eq!(warehouse.capacity_for(PoolId::Fuel), 500);
    }

    #[test]
    fn test_percent_full_caps_at_hundred() {
        let warehouse = Warehouse::new();
        assert_eq!(warehouse.percent_full(PoolId::Provisions, 0), 0);
        assert_eq!(warehouse.percent_full(PoolId::Provisions, 50), 50);
        assert_eq!(warehouse.percent_full(PoolId::Provisions, 100), 100);
        assert_eq!(warehouse.percent_full(PoolId::Provisions, 250), 100);
    }

    #[test]
    fn test_set_level_clamps() {
        let mut warehouse = Warehouse::new();
        warehouse.set_level(PoolId::Cloth, 0);
        assert_eq!(warehouse.level(PoolId::Cloth), 1);
        warehouse.set_level(PoolId::Cloth, 9);
        assert_eq!(warehouse.level(PoolId::Cloth), MAX_WAREHOUSE_LEVEL);
    }
}
