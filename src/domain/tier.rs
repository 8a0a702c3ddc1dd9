//! Item tier classification by graph position and by price.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::arena::RelationNode;

/// Price at or above which an item is in the legendary price band.
pub const LEGENDARY_PRICE: u32 = 3000;
/// Price at or above which an item is in the intermediate price band.
pub const INTERMEDIATE_PRICE: u32 = 800;

/// Tier derived from the crafting relations of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    /// No materials, used by other items
    Basic,
    /// Has materials and is used by other items
    Intermediate,
    /// Has materials, used by nothing
    Legendary,
    /// Neither made from nor used in anything
    Standalone,
}

impl ItemTier {
    pub fn of(node: &RelationNode) -> Self {
        match (node.children.is_empty(), node.parents.is_empty()) {
            (true, false) => ItemTier::Basic,
            (false, false) => ItemTier::Intermediate,
            (false, true) => ItemTier::Legendary,
            (true, true) => ItemTier::Standalone,
        }
    }
}

impl fmt::Display for ItemTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItemTier::Basic => "basic",
            ItemTier::Intermediate => "intermediate",
            ItemTier::Legendary => "legendary",
            ItemTier::Standalone => "standalone",
        };
        f.write_str(label)
    }
}

/// Price band of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PriceTier {
    Material,
    Intermediate,
    Legendary,
}

impl PriceTier {
    pub fn of(price: u32) -> Self {
        if price >= LEGENDARY_PRICE {
            PriceTier::Legendary
        } else if price >= INTERMEDIATE_PRICE {
            PriceTier::Intermediate
        } else {
            PriceTier::Material
        }
    }
}

impl fmt::Display for PriceTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PriceTier::Material => "material",
            PriceTier::Intermediate => "intermediate",
            PriceTier::Legendary => "legendary",
        };
        f.write_str(label)
    }
}
