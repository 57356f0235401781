//! Enchantment identifiers and their static rarity table.

use crate::item::{ArmorPiece, ItemType, ToolType};
use crate::registry::{RegistryKey, DEFAULT_NAMESPACE};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Rarity class of an enchantment.
///
/// The anvil value is used as a cost multiplier when enchantments are merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    /// Frequently offered enchantments.
    Common,
    /// Moderately common enchantments.
    Uncommon,
    /// Rarely offered enchantments.
    Rare,
    /// Treasure-grade enchantments.
    VeryRare,
}

impl Rarity {
    /// Cost multiplier applied per level at the anvil.
    pub fn anvil_value(self) -> u32 {
        match self {
            Rarity::Common => 1,
            Rarity::Uncommon => 2,
            Rarity::Rare => 4,
            Rarity::VeryRare => 8,
        }
    }
}

/// Static table entry for an enchantment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnchantmentInfo {
    /// Rarity class.
    pub rarity: Rarity,
    /// Natural maximum level.
    pub max_level: u8,
}

/// Types of enchantments that can be applied to items
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum EnchantmentType {
    // Tool enchantments
    /// Increases mining speed
    Efficiency,
    /// Allows silk touch harvesting of blocks
    SilkTouch,
    /// Increases block drop amounts
    Fortune,

    // Weapon enchantments
    /// Increases attack damage
    Sharpness,
    /// Increases damage against undead
    Smite,
    /// Increases damage against arthropods
    BaneOfArthropods,
    /// Increases knockback
    Knockback,
    /// Sets targets on fire
    FireAspect,
    /// Increases mob drops
    Looting,
    /// Increases bow/arrow damage
    Power,
    /// Increases bow/arrow knockback
    Punch,
    /// Bow/arrow sets targets on fire
    Flame,
    /// Allows firing without consuming arrows
    Infinity,

    // Armor enchantments
    /// Reduces damage from all sources
    Protection,
    /// Reduces fire damage
    FireProtection,
    /// Reduces explosion damage
    BlastProtection,
    /// Reduces projectile damage
    ProjectileProtection,
    /// Damages attackers
    Thorns,
    /// Reduces fall damage (boots)
    FeatherFalling,
    /// Extends underwater breathing (helmet)
    Respiration,
    /// Removes underwater mining speed penalty (helmet).
    AquaAffinity,
    /// Increases underwater movement speed (boots).
    DepthStrider,

    // Universal enchantments
    /// Reduces durability loss
    Unbreaking,
    /// Repairs item using XP
    Mending,
}

impl EnchantmentType {
    /// Every enchantment, in key order.
    pub const ALL: [EnchantmentType; 24] = [
        EnchantmentType::Efficiency,
        EnchantmentType::SilkTouch,
        EnchantmentType::Fortune,
        EnchantmentType::Sharpness,
        EnchantmentType::Smite,
        EnchantmentType::BaneOfArthropods,
        EnchantmentType::Knockback,
        EnchantmentType::FireAspect,
        EnchantmentType::Looting,
        EnchantmentType::Power,
        EnchantmentType::Punch,
        EnchantmentType::Flame,
        EnchantmentType::Infinity,
        EnchantmentType::Protection,
        EnchantmentType::FireProtection,
        EnchantmentType::BlastProtection,
        EnchantmentType::ProjectileProtection,
        EnchantmentType::Thorns,
        EnchantmentType::FeatherFalling,
        EnchantmentType::Respiration,
        EnchantmentType::AquaAffinity,
        EnchantmentType::DepthStrider,
        EnchantmentType::Unbreaking,
        EnchantmentType::Mending,
    ];

    /// Get the maximum level for this enchantment
    pub fn max_level(&self) -> u8 {
        match self {
            EnchantmentType::Efficiency => 5,
            EnchantmentType::SilkTouch => 1,
            EnchantmentType::Fortune => 3,
            EnchantmentType::Sharpness => 5,
            EnchantmentType::Smite => 5,
            EnchantmentType::BaneOfArthropods => 5,
            EnchantmentType::Knockback => 2,
            EnchantmentType::FireAspect => 2,
            EnchantmentType::Looting => 3,
            EnchantmentType::Power => 5,
            EnchantmentType::Punch => 2,
            EnchantmentType::Flame => 1,
            EnchantmentType::Infinity => 1,
            EnchantmentType::Protection => 4,
            EnchantmentType::FireProtection => 4,
            EnchantmentType::BlastProtection => 4,
            EnchantmentType::ProjectileProtection => 4,
            EnchantmentType::Thorns => 3,
            EnchantmentType::FeatherFalling => 4,
            EnchantmentType::Respiration => 3,
            EnchantmentType::AquaAffinity => 1,
            EnchantmentType::DepthStrider => 3,
            EnchantmentType::Unbreaking => 3,
            EnchantmentType::Mending => 1,
        }
    }

    /// Get the rarity class for this enchantment
    pub fn rarity(&self) -> Rarity {
        match self {
            EnchantmentType::Efficiency
            | EnchantmentType::Sharpness
            | EnchantmentType::Power
            | EnchantmentType::Protection => Rarity::Common,
            EnchantmentType::Smite
            | EnchantmentType::BaneOfArthropods
            | EnchantmentType::Knockback
            | EnchantmentType::FireProtection
            | EnchantmentType::ProjectileProtection
            | EnchantmentType::FeatherFalling
            | EnchantmentType::Unbreaking => Rarity::Uncommon,
            EnchantmentType::Fortune
            | EnchantmentType::FireAspect
            | EnchantmentType::Looting
            | EnchantmentType::Punch
            | EnchantmentType::Flame
            | EnchantmentType::BlastProtection
            | EnchantmentType::Respiration
            | EnchantmentType::AquaAffinity
            | EnchantmentType::DepthStrider
            | EnchantmentType::Mending => Rarity::Rare,
            EnchantmentType::SilkTouch | EnchantmentType::Infinity | EnchantmentType::Thorns => {
                Rarity::VeryRare
            }
        }
    }

    /// Rarity and natural maximum level in one lookup.
    pub fn info(&self) -> EnchantmentInfo {
        EnchantmentInfo {
            rarity: self.rarity(),
            max_level: self.max_level(),
        }
    }

    /// Snake-case name used in registry keys and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            EnchantmentType::Efficiency => "efficiency",
            EnchantmentType::SilkTouch => "silk_touch",
            EnchantmentType::Fortune => "fortune",
            EnchantmentType::Sharpness => "sharpness",
            EnchantmentType::Smite => "smite",
            EnchantmentType::BaneOfArthropods => "bane_of_arthropods",
            EnchantmentType::Knockback => "knockback",
            EnchantmentType::FireAspect => "fire_aspect",
            EnchantmentType::Looting => "looting",
            EnchantmentType::Power => "power",
            EnchantmentType::Punch => "punch",
            EnchantmentType::Flame => "flame",
            EnchantmentType::Infinity => "infinity",
            EnchantmentType::Protection => "protection",
            EnchantmentType::FireProtection => "fire_protection",
            EnchantmentType::BlastProtection => "blast_protection",
            EnchantmentType::ProjectileProtection => "projectile_protection",
            EnchantmentType::Thorns => "thorns",
            EnchantmentType::FeatherFalling => "feather_falling",
            EnchantmentType::Respiration => "respiration",
            EnchantmentType::AquaAffinity => "aqua_affinity",
            EnchantmentType::DepthStrider => "depth_strider",
            EnchantmentType::Unbreaking => "unbreaking",
            EnchantmentType::Mending => "mending",
        }
    }

    /// Registry key in the default namespace.
    pub fn key(&self) -> RegistryKey {
        RegistryKey::vanilla(self.name())
    }

    /// Look up an enchantment by registry key.
    pub fn from_key(key: &RegistryKey) -> Option<Self> {
        if key.namespace() != DEFAULT_NAMESPACE {
            return None;
        }
        Self::ALL.into_iter().find(|e| e.name() == key.path())
    }

    /// Check if this enchantment is compatible with another
    /// (some enchantments are mutually exclusive)
    pub fn is_compatible_with(&self, other: &EnchantmentType) -> bool {
        if self == other {
            return true;
        }

        // Silk Touch and Fortune are incompatible
        if matches!(
            (self, other),
            (EnchantmentType::SilkTouch, EnchantmentType::Fortune)
                | (EnchantmentType::Fortune, EnchantmentType::SilkTouch)
        ) {
            return false;
        }

        // Infinity and Mending are incompatible (vanilla).
        if matches!(
            (self, other),
            (EnchantmentType::Infinity, EnchantmentType::Mending)
                | (EnchantmentType::Mending, EnchantmentType::Infinity)
        ) {
            return false;
        }

        // Protection and damage enchantments exclude the rest of their family
        const PROTECTION: [EnchantmentType; 4] = [
            EnchantmentType::Protection,
            EnchantmentType::FireProtection,
            EnchantmentType::BlastProtection,
            EnchantmentType::ProjectileProtection,
        ];
        const DAMAGE: [EnchantmentType; 3] = [
            EnchantmentType::Sharpness,
            EnchantmentType::Smite,
            EnchantmentType::BaneOfArthropods,
        ];
        for family in [&PROTECTION[..], &DAMAGE[..]] {
            if family.contains(self) && family.contains(other) {
                return false;
            }
        }

        true
    }

    /// Whether this enchantment can naturally exist on an item of `item_type`.
    ///
    /// Books accept every enchantment.
    pub fn can_enchant(&self, item_type: ItemType) -> bool {
        use EnchantmentType::*;

        let digger = matches!(
            item_type,
            ItemType::Tool(
                ToolType::Pickaxe | ToolType::Axe | ToolType::Shovel | ToolType::Hoe,
                _
            )
        );
        let melee = matches!(item_type, ItemType::Tool(ToolType::Sword | ToolType::Axe, _));
        let sword = matches!(item_type, ItemType::Tool(ToolType::Sword, _));

        match item_type {
            ItemType::Book | ItemType::EnchantedBook => return true,
            ItemType::Block(_) | ItemType::Item(_) => return false,
            _ => {}
        }

        match self {
            Efficiency | SilkTouch | Fortune => digger,
            Sharpness | Smite | BaneOfArthropods => melee,
            Knockback | FireAspect | Looting => sword,
            Power | Punch | Flame | Infinity => item_type == ItemType::Bow,
            Protection | FireProtection | BlastProtection | ProjectileProtection | Thorns => {
                matches!(item_type, ItemType::Armor(_, _))
            }
            FeatherFalling | DepthStrider => {
                matches!(item_type, ItemType::Armor(ArmorPiece::Boots, _))
            }
            Respiration | AquaAffinity => {
                matches!(item_type, ItemType::Armor(ArmorPiece::Helmet, _))
            }
            Unbreaking | Mending => item_type.max_durability() > 0,
        }
    }
}

impl FromStr for EnchantmentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = RegistryKey::parse(s).map_err(|err| format!("{s:?}: {err}"))?;
        Self::from_key(&key).ok_or_else(|| format!("unknown enchantment {key}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{ArmorMaterial, ToolMaterial};

    #[test]
    fn test_max_level() {
        assert_eq!(EnchantmentType::Efficiency.max_level(), 5);
        assert_eq!(EnchantmentType::SilkTouch.max_level(), 1);
        assert_eq!(EnchantmentType::Unbreaking.max_level(), 3);
        assert_eq!(EnchantmentType::AquaAffinity.max_level(), 1);
        assert_eq!(EnchantmentType::DepthStrider.max_level(), 3);
    }

    #[test]
    fn test_rarity_anvil_values() {
        assert_eq!(EnchantmentType::Sharpness.rarity().anvil_value(), 1);
        assert_eq!(EnchantmentType::Unbreaking.rarity().anvil_value(), 2);
        assert_eq!(EnchantmentType::Fortune.rarity().anvil_value(), 4);
        assert_eq!(EnchantmentType::SilkTouch.rarity().anvil_value(), 8);
        assert_eq!(
            EnchantmentType::Mending.info(),
            EnchantmentInfo {
                rarity: Rarity::Rare,
                max_level: 1
            }
        );
    }

    #[test]
    fn test_incompatible_enchantments() {
        assert!(!EnchantmentType::SilkTouch.is_compatible_with(&EnchantmentType::Fortune));
        assert!(!EnchantmentType::Fortune.is_compatible_with(&EnchantmentType::SilkTouch));
        assert!(!EnchantmentType::Protection.is_compatible_with(&EnchantmentType::FireProtection));
        assert!(!EnchantmentType::Infinity.is_compatible_with(&EnchantmentType::Mending));
        assert!(!EnchantmentType::Smite.is_compatible_with(&EnchantmentType::Sharpness));
    }

    #[test]
    fn test_compatible_enchantments() {
        assert!(EnchantmentType::Efficiency.is_compatible_with(&EnchantmentType::Unbreaking));
        assert!(EnchantmentType::Sharpness.is_compatible_with(&EnchantmentType::Knockback));
        assert!(EnchantmentType::Protection.is_compatible_with(&EnchantmentType::Unbreaking));
        assert!(EnchantmentType::Protection.is_compatible_with(&EnchantmentType::Protection));
    }

    #[test]
    fn test_names_round_trip_through_keys() {
        for enchantment in EnchantmentType::ALL {
            assert_eq!(EnchantmentType::from_key(&enchantment.key()), Some(enchantment));
        }
        assert_eq!(
            "minecraft:silk_touch".parse::<EnchantmentType>(),
            Ok(EnchantmentType::SilkTouch)
        );
        assert_eq!("fortune".parse::<EnchantmentType>(), Ok(EnchantmentType::Fortune));
        assert!("custom:fortune".parse::<EnchantmentType>().is_err());
        assert!("not_an_enchant".parse::<EnchantmentType>().is_err());
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&EnchantmentType::BaneOfArthropods).unwrap();
        assert_eq!(json, "\"bane_of_arthropods\"");
    }

    #[test]
    fn test_can_enchant_targets() {
        let pick = ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Diamond);
        let sword = ItemType::Tool(ToolType::Sword, ToolMaterial::Iron);
        let boots = ItemType::Armor(ArmorPiece::Boots, ArmorMaterial::Iron);

        assert!(EnchantmentType::Efficiency.can_enchant(pick));
        assert!(!EnchantmentType::Efficiency.can_enchant(sword));
        assert!(EnchantmentType::Sharpness.can_enchant(sword));
        assert!(EnchantmentType::FeatherFalling.can_enchant(boots));
        assert!(!EnchantmentType::Respiration.can_enchant(boots));
        assert!(EnchantmentType::Unbreaking.can_enchant(boots));
        assert!(EnchantmentType::Power.can_enchant(ItemType::Bow));
        assert!(EnchantmentType::Thorns.can_enchant(ItemType::EnchantedBook));
        assert!(!EnchantmentType::Unbreaking.can_enchant(ItemType::Item(10)));
    }
}
