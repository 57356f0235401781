//! Anvil operation policies.
//!
//! The combiner asks a policy every rule-dependent question: which materials
//! repair which items, which enchantments may be applied, which conflict, and
//! how high levels may go. Policies are pure queries and may close over
//! per-world configuration.

use crate::config::AnvilSettings;
use enchantable_core::{EnchantmentType, ItemStack, ItemType};
use std::collections::BTreeSet;

/// Rule set consulted by [`crate::AnvilCombiner`].
pub trait AnvilPolicy {
    /// Whether two items of the same kind may be merged to repair the base.
    fn merge_repairs_enabled(&self) -> bool;

    /// Whether enchantments may be combined at all.
    fn combine_enchants_enabled(&self) -> bool {
        true
    }

    /// Whether `candidate` is an accepted repair material for `base`.
    fn material_repairs(&self, base: &ItemStack, candidate: &ItemStack) -> bool;

    /// Whether enchantment transfer should be attempted for this pair.
    fn materials_combine(&self, base: &ItemStack, addition: &ItemStack) -> bool;

    /// Whether `enchantment` is permitted on `target` at all.
    fn enchant_applies(&self, enchantment: EnchantmentType, target: &ItemStack) -> bool;

    /// Whether `a` conflicts with `b`. Not assumed symmetric.
    fn enchants_conflict(&self, a: EnchantmentType, b: EnchantmentType) -> bool;

    /// Policy cap on combined levels.
    fn enchant_max_level(&self, enchantment: EnchantmentType) -> u8;
}

impl<P: AnvilPolicy + ?Sized> AnvilPolicy for &P {
    fn merge_repairs_enabled(&self) -> bool {
        (**self).merge_repairs_enabled()
    }

    fn combine_enchants_enabled(&self) -> bool {
        (**self).combine_enchants_enabled()
    }

    fn material_repairs(&self, base: &ItemStack, candidate: &ItemStack) -> bool {
        (**self).material_repairs(base, candidate)
    }

    fn materials_combine(&self, base: &ItemStack, addition: &ItemStack) -> bool {
        (**self).materials_combine(base, addition)
    }

    fn enchant_applies(&self, enchantment: EnchantmentType, target: &ItemStack) -> bool {
        (**self).enchant_applies(enchantment, target)
    }

    fn enchants_conflict(&self, a: EnchantmentType, b: EnchantmentType) -> bool {
        (**self).enchants_conflict(a, b)
    }

    fn enchant_max_level(&self, enchantment: EnchantmentType) -> u8 {
        (**self).enchant_max_level(enchantment)
    }
}

/// Whether `candidate` is the repair material of `base`'s kind.
pub fn is_repair_material(base: &ItemStack, candidate: &ItemStack) -> bool {
    base.item_type.repair_item() == Some(candidate.item_type)
}

/// Rules matching the base game's anvil.
#[derive(Debug, Clone, Copy, Default)]
pub struct VanillaAnvilPolicy;

impl AnvilPolicy for VanillaAnvilPolicy {
    fn merge_repairs_enabled(&self) -> bool {
        true
    }

    fn material_repairs(&self, base: &ItemStack, candidate: &ItemStack) -> bool {
        is_repair_material(base, candidate)
    }

    fn materials_combine(&self, base: &ItemStack, addition: &ItemStack) -> bool {
        base.item_type == addition.item_type || addition.item_type == ItemType::EnchantedBook
    }

    fn enchant_applies(&self, enchantment: EnchantmentType, target: &ItemStack) -> bool {
        enchantment.can_enchant(target.item_type)
    }

    fn enchants_conflict(&self, a: EnchantmentType, b: EnchantmentType) -> bool {
        !a.is_compatible_with(&b)
    }

    fn enchant_max_level(&self, enchantment: EnchantmentType) -> u8 {
        enchantment.max_level()
    }
}

/// Rules for enchanting a block item (e.g. a furnace) in one world.
///
/// Built from the world's resolved [`AnvilSettings`] and the enchantments
/// registered for the block kind.
#[derive(Debug, Clone)]
pub struct ConfiguredAnvilPolicy {
    registered: BTreeSet<EnchantmentType>,
    settings: AnvilSettings,
}

impl ConfiguredAnvilPolicy {
    /// Create a policy for a block kind accepting `registered` enchantments.
    pub fn new(
        registered: impl IntoIterator<Item = EnchantmentType>,
        settings: AnvilSettings,
    ) -> Self {
        Self {
            registered: registered.into_iter().collect(),
            settings,
        }
    }

    /// The resolved settings this policy reads.
    pub fn settings(&self) -> &AnvilSettings {
        &self.settings
    }
}

impl AnvilPolicy for ConfiguredAnvilPolicy {
    fn merge_repairs_enabled(&self) -> bool {
        self.settings.merge_repairs
    }

    fn combine_enchants_enabled(&self) -> bool {
        self.settings.combine_enchants
    }

    fn material_repairs(&self, base: &ItemStack, candidate: &ItemStack) -> bool {
        is_repair_material(base, candidate)
    }

    fn materials_combine(&self, _base: &ItemStack, _addition: &ItemStack) -> bool {
        true
    }

    fn enchant_applies(&self, enchantment: EnchantmentType, _target: &ItemStack) -> bool {
        self.registered.contains(&enchantment)
            && !self.settings.disabled_enchants.contains(&enchantment)
    }

    fn enchants_conflict(&self, a: EnchantmentType, b: EnchantmentType) -> bool {
        self.settings.conflicts(a, b)
    }

    fn enchant_max_level(&self, enchantment: EnchantmentType) -> u8 {
        self.settings.max_level(enchantment)
    }
}
