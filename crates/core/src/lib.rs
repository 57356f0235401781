#![warn(missing_docs)]
//! Core primitives shared across the workspace.

pub mod enchantment;
pub mod item;
pub mod registry;

use serde::{Deserialize, Serialize};
use std::fmt;

// Re-export commonly used types
pub use enchantment::{EnchantmentInfo, EnchantmentType, Rarity};
pub use item::{
    ArmorMaterial, ArmorPiece, ItemError, ItemMeta, ItemStack, ItemType, ToolMaterial, ToolType,
};
pub use registry::{RegistryKey, RegistryKeyError, DEFAULT_NAMESPACE};

/// Fixed tick type (20 TPS => 50 ms per tick).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SimTick(pub u64);

impl SimTick {
    /// First tick in any deterministic timeline.
    pub const ZERO: Self = Self(0);

    /// Advance by `delta` ticks.
    pub fn advance(self, delta: u64) -> Self {
        Self(self.0 + delta)
    }
}

/// Integer block position in world space.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct BlockPos {
    /// X coordinate.
    pub x: i32,
    /// Y coordinate.
    pub y: i32,
    /// Z coordinate.
    pub z: i32,
}

impl BlockPos {
    /// Create a new block position.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

impl fmt::Display for BlockPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}
