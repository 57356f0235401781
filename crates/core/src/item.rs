//! Item system - Tools, armor, books and the per-stack metadata the anvil reads

use crate::enchantment::EnchantmentType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Well-known item and block ids used by the default tables.
pub mod ids {
    /// Stick item.
    pub const STICK: u16 = 1;
    /// Iron ingot item.
    pub const IRON_INGOT: u16 = 10;
    /// Diamond item.
    pub const DIAMOND: u16 = 11;
    /// Gold ingot item.
    pub const GOLD_INGOT: u16 = 12;
    /// Leather item.
    pub const LEATHER: u16 = 13;
    /// Coal item.
    pub const COAL: u16 = 14;
    /// Raw porkchop item.
    pub const RAW_PORK: u16 = 20;
    /// Cooked porkchop item.
    pub const COOKED_PORK: u16 = 21;
    /// Raw beef item.
    pub const RAW_BEEF: u16 = 22;
    /// Cooked beef (steak) item.
    pub const COOKED_BEEF: u16 = 23;
    /// Clay ball item.
    pub const CLAY_BALL: u16 = 24;
    /// Brick item.
    pub const BRICK: u16 = 25;

    /// Stone block.
    pub const STONE: u16 = 1;
    /// Planks block.
    pub const PLANKS: u16 = 2;
    /// Cobblestone block.
    pub const COBBLESTONE: u16 = 3;
    /// Sand block.
    pub const SAND: u16 = 4;
    /// Glass block.
    pub const GLASS: u16 = 5;
    /// Oak log block.
    pub const OAK_LOG: u16 = 6;
    /// Iron ore block.
    pub const IRON_ORE: u16 = 15;
    /// Gold ore block.
    pub const GOLD_ORE: u16 = 16;
    /// Furnace block.
    pub const FURNACE: u16 = 61;
}

/// Item type identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// A tool (pickaxe, axe, etc.)
    Tool(ToolType, ToolMaterial),
    /// A piece of armor
    Armor(ArmorPiece, ArmorMaterial),
    /// A bow
    Bow,
    /// A placeable block
    Block(u16), // BlockId
    /// Generic item
    Item(u16),
    /// An unenchanted book
    Book,
    /// A book carrying stored enchantments
    EnchantedBook,
}

/// Tool types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolType {
    /// Pickaxe - mines stone, ores
    Pickaxe,
    /// Axe - chops wood
    Axe,
    /// Shovel - digs dirt, sand, gravel
    Shovel,
    /// Sword - combat weapon
    Sword,
    /// Hoe - tills farmland
    Hoe,
}

/// Tool material tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolMaterial {
    /// Wooden tools (tier 0)
    Wood = 0,
    /// Stone tools (tier 1)
    Stone = 1,
    /// Iron tools (tier 2)
    Iron = 2,
    /// Diamond tools (tier 3)
    Diamond = 3,
    /// Gold tools (very fast but weak mining tier - same tier as wood)
    Gold = 4,
}

/// Armor slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorPiece {
    /// Head slot
    Helmet,
    /// Chest slot
    Chestplate,
    /// Legs slot
    Leggings,
    /// Feet slot
    Boots,
}

/// Armor materials
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorMaterial {
    /// Leather armor
    Leather,
    /// Chainmail armor
    Chainmail,
    /// Iron armor
    Iron,
    /// Gold armor
    Gold,
    /// Diamond armor
    Diamond,
}

impl ToolMaterial {
    /// Get the maximum durability for tools of this material
    pub fn durability(self, tool_type: ToolType) -> u32 {
        let base = match self {
            ToolMaterial::Wood => 59,
            ToolMaterial::Stone => 131,
            ToolMaterial::Iron => 250,
            ToolMaterial::Diamond => 1561,
            ToolMaterial::Gold => 32,
        };

        // Swords have different durability
        if tool_type == ToolType::Sword {
            base + 1
        } else {
            base
        }
    }

    /// Item consumed when repairing tools of this material at an anvil.
    pub fn repair_item(self) -> ItemType {
        match self {
            ToolMaterial::Wood => ItemType::Block(ids::PLANKS),
            ToolMaterial::Stone => ItemType::Block(ids::COBBLESTONE),
            ToolMaterial::Iron => ItemType::Item(ids::IRON_INGOT),
            ToolMaterial::Diamond => ItemType::Item(ids::DIAMOND),
            ToolMaterial::Gold => ItemType::Item(ids::GOLD_INGOT),
        }
    }
}

impl ArmorPiece {
    fn durability_factor(self) -> u32 {
        match self {
            ArmorPiece::Helmet => 11,
            ArmorPiece::Chestplate => 16,
            ArmorPiece::Leggings => 15,
            ArmorPiece::Boots => 13,
        }
    }
}

impl ArmorMaterial {
    /// Get the maximum durability for armor of this material
    pub fn durability(self, piece: ArmorPiece) -> u32 {
        let factor = match self {
            ArmorMaterial::Leather => 5,
            ArmorMaterial::Chainmail | ArmorMaterial::Iron => 15,
            ArmorMaterial::Gold => 7,
            ArmorMaterial::Diamond => 33,
        };
        piece.durability_factor() * factor
    }

    /// Item consumed when repairing armor of this material at an anvil.
    pub fn repair_item(self) -> ItemType {
        match self {
            ArmorMaterial::Leather => ItemType::Item(ids::LEATHER),
            ArmorMaterial::Chainmail | ArmorMaterial::Iron => ItemType::Item(ids::IRON_INGOT),
            ArmorMaterial::Gold => ItemType::Item(ids::GOLD_INGOT),
            ArmorMaterial::Diamond => ItemType::Item(ids::DIAMOND),
        }
    }
}

/// Bow durability.
pub const BOW_DURABILITY: u32 = 384;

impl ItemType {
    /// Maximum durability of this kind (0 means not damageable).
    pub fn max_durability(self) -> u32 {
        match self {
            ItemType::Tool(tool_type, material) => material.durability(tool_type),
            ItemType::Armor(piece, material) => material.durability(piece),
            ItemType::Bow => BOW_DURABILITY,
            _ => 0,
        }
    }

    /// Item accepted as anvil repair material for this kind, if any.
    pub fn repair_item(self) -> Option<ItemType> {
        match self {
            ItemType::Tool(_, material) => Some(material.repair_item()),
            ItemType::Armor(_, material) => Some(material.repair_item()),
            _ => None,
        }
    }

    /// Maximum stack size for this item type
    pub fn max_stack_size(self) -> u32 {
        match self {
            ItemType::Tool(_, _) | ItemType::Armor(_, _) | ItemType::Bow => 1,
            ItemType::EnchantedBook => 1,
            ItemType::Book | ItemType::Block(_) | ItemType::Item(_) => 64,
        }
    }
}

/// Structural problems with an item stack.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ItemError {
    /// The stack carries no metadata at all.
    #[error("{0:?} does not expose repair cost or damage")]
    MissingMeta(ItemType),
    /// Damage exceeds the kind's maximum durability.
    #[error("{item_type:?} has damage {damage} above max durability {max}")]
    DamageOutOfRange {
        /// Kind of the offending stack.
        item_type: ItemType,
        /// Stored damage.
        damage: u32,
        /// Maximum durability of the kind.
        max: u32,
    },
    /// An enchantment is stored with level 0.
    #[error("{item_type:?} stores {enchantment:?} at level 0")]
    ZeroLevel {
        /// Kind of the offending stack.
        item_type: ItemType,
        /// Enchantment with the zero level.
        enchantment: EnchantmentType,
    },
    /// The stack is empty.
    #[error("{0:?} stack has count 0")]
    EmptyStack(ItemType),
}

/// Per-stack metadata: damage, repair cost and enchantments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ItemMeta {
    /// Damage taken (0 = undamaged).
    pub damage: u32,
    /// Whether the item ignores damage.
    pub unbreakable: bool,
    /// Accumulated anvil repair cost, if one has been stored.
    pub repair_cost: Option<u32>,
    /// Enchantments and their levels. Stored enchantments for books,
    /// applied enchantments for everything else.
    pub enchantments: BTreeMap<EnchantmentType, u8>,
}

/// An item stack in inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Type of item
    pub item_type: ItemType,
    /// Quantity in stack
    pub count: u32,
    /// Host metadata (None for stacks that expose none)
    #[serde(default)]
    pub meta: Option<ItemMeta>,
}

impl ItemStack {
    /// Create a new item stack with empty metadata
    pub fn new(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            meta: Some(ItemMeta::default()),
        }
    }

    /// Create a stack that exposes no metadata.
    pub fn without_meta(item_type: ItemType, count: u32) -> Self {
        Self {
            item_type,
            count,
            meta: None,
        }
    }

    /// Builder: set damage.
    pub fn with_damage(mut self, damage: u32) -> Self {
        self.meta_mut().damage = damage;
        self
    }

    /// Builder: set the stored repair cost.
    pub fn with_repair_cost(mut self, repair_cost: u32) -> Self {
        self.meta_mut().repair_cost = Some(repair_cost);
        self
    }

    /// Builder: mark as unbreakable.
    pub fn unbreakable(mut self) -> Self {
        self.meta_mut().unbreakable = true;
        self
    }

    /// Builder: add an enchantment (no compatibility checks).
    pub fn with_enchantment(mut self, enchantment: EnchantmentType, level: u8) -> Self {
        self.meta_mut().enchantments.insert(enchantment, level);
        self
    }

    /// Mutable metadata, created on demand.
    pub fn meta_mut(&mut self) -> &mut ItemMeta {
        self.meta.get_or_insert_with(ItemMeta::default)
    }

    /// Get maximum durability for this item (0 if not damageable)
    pub fn max_durability(&self) -> u32 {
        self.item_type.max_durability()
    }

    /// Current damage (0 without metadata).
    pub fn damage(&self) -> u32 {
        self.meta.as_ref().map(|m| m.damage).unwrap_or(0)
    }

    /// Whether the stack has taken any damage.
    pub fn has_damage(&self) -> bool {
        self.damage() > 0
    }

    /// Whether the stack ignores damage.
    pub fn is_unbreakable(&self) -> bool {
        self.meta.as_ref().map(|m| m.unbreakable).unwrap_or(false)
    }

    /// Whether the stack can lose durability at all.
    pub fn is_damageable(&self) -> bool {
        self.max_durability() > 0 && !self.is_unbreakable()
    }

    /// Stored repair cost (0 when none stored).
    pub fn repair_cost(&self) -> u32 {
        self.meta
            .as_ref()
            .and_then(|m| m.repair_cost)
            .unwrap_or(0)
    }

    /// Whether this stack only carries stored enchantments (an enchanted book).
    pub fn is_enchantment_carrier(&self) -> bool {
        self.item_type == ItemType::EnchantedBook
    }

    /// Get all enchantments on this item, in key order.
    pub fn enchantments(&self) -> impl Iterator<Item = (EnchantmentType, u8)> + '_ {
        self.meta
            .iter()
            .flat_map(|m| m.enchantments.iter().map(|(e, level)| (*e, *level)))
    }

    /// Check if this item has a specific enchantment type
    pub fn has_enchantment(&self, enchant_type: EnchantmentType) -> bool {
        self.enchantment_level(enchant_type) > 0
    }

    /// Get the level of a specific enchantment, or 0 if not present
    pub fn enchantment_level(&self, enchant_type: EnchantmentType) -> u8 {
        self.meta
            .as_ref()
            .and_then(|m| m.enchantments.get(&enchant_type).copied())
            .unwrap_or(0)
    }

    /// Check the stack against the item invariants.
    pub fn validate(&self) -> Result<(), ItemError> {
        let meta = self
            .meta
            .as_ref()
            .ok_or(ItemError::MissingMeta(self.item_type))?;
        if self.count == 0 {
            return Err(ItemError::EmptyStack(self.item_type));
        }
        let max = self.max_durability();
        if max > 0 && meta.damage > max {
            return Err(ItemError::DamageOutOfRange {
                item_type: self.item_type,
                damage: meta.damage,
                max,
            });
        }
        if let Some((enchantment, _)) = meta.enchantments.iter().find(|(_, level)| **level == 0) {
            return Err(ItemError::ZeroLevel {
                item_type: self.item_type,
                enchantment: *enchantment,
            });
        }
        Ok(())
    }
}
