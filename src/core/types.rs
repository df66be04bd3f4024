//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for heroes in the roster
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HeroId(pub u32);

impl fmt::Display for HeroId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hero{}", self.0)
    }
}

/// Identifier for items
///
/// Catalog items carry stable handwritten ids ("weapon_sword_1"), crafted
/// items get a generated one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for a crafted item
    pub fn generated() -> Self {
        Self(format!("custom_{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a pool is a spendable resource or a crafting material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PoolKind {
    Resource,
    Material,
}

/// Named, capacity-bounded ledger pools
///
/// This is a closed set: string-addressed callers resolve through
/// [`PoolId::from_name`] and mutations on unknown names stay no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PoolId {
    Provisions,
    Fuel,
    Tools,
    Wood,
    Metal,
    Cloth,
    Planks,
    MetalParts,
}

impl PoolId {
    /// Every pool, resources first
    pub const ALL: [PoolId; 8] = [
        PoolId::Provisions,
        PoolId::Fuel,
        PoolId::Tools,
        PoolId::Wood,
        PoolId::Metal,
        PoolId::Cloth,
        PoolId::Planks,
        PoolId::MetalParts,
    ];

    pub fn kind(&self) -> PoolKind {
        match self {
            PoolId::Provisions | PoolId::Fuel | PoolId::Tools => PoolKind::Resource,
            _ => PoolKind::Material,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PoolId::Provisions => "provisions",
            PoolId::Fuel => "fuel",
            PoolId::Tools => "tools",
            PoolId::Wood => "wood",
            PoolId::Metal => "metal",
            PoolId::Cloth => "cloth",
            PoolId::Planks => "planks",
            PoolId::MetalParts => "metal_parts",
        }
    }

    /// Resolve a pool by name, case-insensitive; `None` for unknown names
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "provisions" => Some(PoolId::Provisions),
            "fuel" => Some(PoolId::Fuel),
            "tools" => Some(PoolId::Tools),
            "wood" => Some(PoolId::Wood),
            "metal" => Some(PoolId::Metal),
            "cloth" => Some(PoolId::Cloth),
            "planks" => Some(PoolId::Planks),
            "metal_parts" | "metalparts" => Some(PoolId::MetalParts),
            _ => None,
        }
    }

    /// Storage capacity at warehouse level 1
    pub fn base_capacity(&self) -> u32 {
        match self.kind() {
            PoolKind::Resource => crate::core::config::RESOURCE_BASE_CAPACITY,
            PoolKind::Material => crate::core::config::MATERIAL_BASE_CAPACITY,
        }
    }
}

impl fmt::Display for PoolId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Match locations on the overland map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    Forest,
    Mountains,
    Ruins,
}

impl Location {
    pub const ALL: [Location; 3] = [Location::Forest, Location::Mountains, Location::Ruins];

    /// Pool a match at this location is paid from
    pub fn cost_pool(&self) -> PoolId {
        match self {
            Location::Forest => PoolId::Provisions,
            Location::Mountains => PoolId::Fuel,
            Location::Ruins => PoolId::Tools,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Location::Forest => "forest",
            Location::Mountains => "mountains",
            Location::Ruins => "ruins",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "forest" => Some(Location::Forest),
            "mountains" => Some(Location::Mountains),
            "ruins" => Some(Location::Ruins),
            _ => None,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_name_round_trip() {
        for pool in PoolId::ALL {
            assert_eq!(PoolId::from_name(pool.name()), Some(pool));
        }
        assert_eq!(PoolId::from_name("mana"), None);
        assert_eq!(PoolId::from_name("MetalParts"), Some(PoolId::MetalParts));
    }

    #[test]
    fn test_pool_kinds() {
        assert_eq!(PoolId::Provisions.kind(), PoolKind::Resource);
        assert_eq!(PoolId::Wood.kind(), PoolKind::Material);
        assert_eq!(PoolId::MetalParts.kind(), PoolKind::Material);
    }

    #[test]
    fn test_location_cost_pools() {
        assert_eq!(Location::Forest.cost_pool(), PoolId::Provisions);
        assert_eq!(Location::Mountains.cost_pool(), PoolId::Fuel);
        assert_eq!(Location::Ruins.cost_pool(), PoolId::Tools);
    }
}
