//! Anvil combination engine.
//!
//! Merges a base item with a consumed addition into one repaired and/or
//! enchanted result. The engine is pure: inputs are never mutated and every
//! result is a fresh clone. "Cannot combine" is [`CombinationResult::Empty`],
//! never an error.

use crate::anvil_policy::AnvilPolicy;
use enchantable_core::{EnchantmentType, ItemError, ItemStack};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Flat cost charged for a same-kind merge repair.
pub const MERGE_REPAIR_COST: u32 = 2;

/// Bonus durability restored by a merge repair, in percent of the addition's max.
pub const MERGE_REPAIR_BONUS_PERCENT: u32 = 12;

/// A successful combination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Combination {
    /// The item that replaces the base.
    pub item: ItemStack,
    /// Experience levels charged.
    pub cost: u32,
    /// Units of repair material consumed from the addition (0 when the
    /// addition is consumed whole).
    pub repair_units: u32,
}

impl Combination {
    /// Apply the outcome to an anvil's two input slots.
    ///
    /// The base slot receives the result. The addition slot loses
    /// `repair_units` items, or is emptied when no material units were used.
    /// Returns the cost to deduct from the player.
    pub fn apply(
        self,
        base_slot: &mut Option<ItemStack>,
        addition_slot: &mut Option<ItemStack>,
    ) -> u32 {
        *base_slot = Some(self.item);
        if self.repair_units == 0 {
            *addition_slot = None;
        } else if let Some(addition) = addition_slot {
            addition.count = addition.count.saturating_sub(self.repair_units);
            if addition.count == 0 {
                *addition_slot = None;
            }
        }
        self.cost
    }
}

/// Outcome of [`AnvilCombiner::combine`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum CombinationResult {
    /// Nothing applies: leave the inventory unchanged and charge nothing.
    Empty,
    /// The inputs combine.
    Combined(Combination),
}

impl CombinationResult {
    /// Whether nothing applied.
    pub fn is_empty(&self) -> bool {
        matches!(self, CombinationResult::Empty)
    }

    /// The combination, if any.
    pub fn combination(&self) -> Option<&Combination> {
        match self {
            CombinationResult::Empty => None,
            CombinationResult::Combined(combination) => Some(combination),
        }
    }

    /// Result item, if any.
    pub fn item(&self) -> Option<&ItemStack> {
        self.combination().map(|c| &c.item)
    }

    /// Charged cost (0 when empty).
    pub fn cost(&self) -> u32 {
        self.combination().map_or(0, |c| c.cost)
    }

    /// Repair units consumed (0 when empty).
    pub fn repair_units(&self) -> u32 {
        self.combination().map_or(0, |c| c.repair_units)
    }
}

impl From<Option<Combination>> for CombinationResult {
    fn from(value: Option<Combination>) -> Self {
        value.map_or(CombinationResult::Empty, CombinationResult::Combined)
    }
}

/// Structural problems with anvil inputs.
///
/// Returned only by [`AnvilCombiner::try_combine`]; these indicate a caller
/// passed malformed stacks, not an ordinary "cannot combine".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnvilError {
    /// The base stack is malformed.
    #[error("invalid base item")]
    InvalidBase(#[source] ItemError),
    /// The addition stack is malformed.
    #[error("invalid addition item")]
    InvalidAddition(#[source] ItemError),
}

/// Stateless anvil engine parameterized by a policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnvilCombiner<P> {
    policy: P,
}

impl<P: AnvilPolicy> AnvilCombiner<P> {
    /// Create a combiner that consults `policy`.
    pub fn new(policy: P) -> Self {
        Self { policy }
    }

    /// The policy in force.
    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Combine `base` with `addition`.
    pub fn combine(&self, base: &ItemStack, addition: &ItemStack) -> CombinationResult {
        if base.meta.is_none() || addition.meta.is_none() {
            debug!(
                base = ?base.item_type,
                addition = ?addition.item_type,
                "anvil inputs expose no repair metadata"
            );
            return CombinationResult::Empty;
        }

        let repaired = self
            .merge_repair(base, addition)
            .or_else(|| self.material_repair(base, addition));

        if !self.policy.combine_enchants_enabled() || !self.policy.materials_combine(base, addition)
        {
            debug!(repaired = repaired.is_some(), "anvil enchantment stage skipped");
            return repaired.into();
        }

        self.combine_enchantments(repaired, base, addition)
    }

    /// Validate both stacks, then [`combine`](Self::combine).
    pub fn try_combine(
        &self,
        base: &ItemStack,
        addition: &ItemStack,
    ) -> Result<CombinationResult, AnvilError> {
        base.validate().map_err(AnvilError::InvalidBase)?;
        addition.validate().map_err(AnvilError::InvalidAddition)?;
        Ok(self.combine(base, addition))
    }

    fn merge_repair(&self, base: &ItemStack, addition: &ItemStack) -> Option<Combination> {
        if !self.policy.merge_repairs_enabled()
            || base.item_type != addition.item_type
            || !base.is_damageable()
            || !base.has_damage()
        {
            return None;
        }

        let addition_max = addition.max_durability();
        let restored = addition_max.saturating_sub(addition.damage())
            + addition_max * MERGE_REPAIR_BONUS_PERCENT / 100;

        let mut item = base.clone();
        item.meta_mut().damage = base.damage().saturating_sub(restored);
        debug!(
            from = base.damage(),
            to = item.damage(),
            "anvil merge repair"
        );

        Some(Combination {
            item,
            cost: MERGE_REPAIR_COST,
            repair_units: 0,
        })
    }

    fn material_repair(&self, base: &ItemStack, addition: &ItemStack) -> Option<Combination> {
        if !base.is_damageable() || !base.has_damage() || !self.policy.material_repairs(base, addition)
        {
            return None;
        }

        let per_unit = base.max_durability() / 4;
        let mut damage = base.damage();
        let mut units = 0;
        while damage > 0 && units < addition.count {
            let healed = damage.min(per_unit);
            if healed == 0 {
                break;
            }
            damage -= healed;
            units += 1;
        }
        if units == 0 {
            return None;
        }

        let cost = base
            .repair_cost()
            .saturating_add(addition.repair_cost())
            .saturating_add(units);
        let mut item = base.clone();
        let meta = item.meta_mut();
        meta.damage = damage;
        meta.repair_cost = Some(cost);
        debug!(
            from = base.damage(),
            to = damage,
            units,
            cost,
            "anvil material repair"
        );

        Some(Combination {
            item,
            cost,
            repair_units: units,
        })
    }

    fn combine_enchantments(
        &self,
        repaired: Option<Combination>,
        base: &ItemStack,
        addition: &ItemStack,
    ) -> CombinationResult {
        let (mut item, prior_cost, repair_units) = match repaired {
            Some(c) => (c.item, c.cost, c.repair_units),
            None => (base.clone(), 0, 0),
        };
        let halve = addition.is_enchantment_carrier();
        let mut cost = item
            .repair_cost()
            .saturating_add(addition.repair_cost())
            .saturating_add(prior_cost);
        let mut applied = false;

        for (enchantment, new_level) in addition.enchantments() {
            let old_level = item.enchantment_level(enchantment);
            let combined = if old_level == new_level {
                old_level.saturating_add(1)
            } else {
                old_level.max(new_level)
            };
            let cap = self
                .policy
                .enchant_max_level(enchantment)
                .min(enchantment.max_level());
            let level = combined.min(cap);

            if level == 0
                || !self.policy.enchant_applies(enchantment, &item)
                || self.conflicts_with(enchantment, &item)
            {
                debug!(?enchantment, old_level, new_level, "anvil skipped enchantment");
                continue;
            }

            item.meta_mut().enchantments.insert(enchantment, level);
            cost = cost.saturating_add(u32::from(level) * multiplier(enchantment, halve));
            applied = true;
            debug!(?enchantment, old_level, level, cost, "anvil applied enchantment");
        }

        if !applied {
            if prior_cost == 0 {
                return CombinationResult::Empty;
            }
            return CombinationResult::Combined(Combination {
                item,
                cost: prior_cost,
                repair_units,
            });
        }

        item.meta_mut().repair_cost = Some(cost);
        CombinationResult::Combined(Combination {
            item,
            cost,
            repair_units,
        })
    }

    /// Whether `enchantment` conflicts, in either order, with another
    /// enchantment already on `item`.
    fn conflicts_with(&self, enchantment: EnchantmentType, item: &ItemStack) -> bool {
        item.enchantments()
            .map(|(other, _)| other)
            .filter(|other| *other != enchantment)
            .any(|other| {
                self.policy.enchants_conflict(other, enchantment)
                    || self.policy.enchants_conflict(enchantment, other)
            })
    }
}

/// Per-level cost multiplier: the rarity's anvil value, halved when the
/// addition is an enchanted book, never below 1.
fn multiplier(enchantment: EnchantmentType, halve: bool) -> u32 {
    let value = enchantment.rarity().anvil_value();
    let value = if halve { value / 2 } else { value };
    value.max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anvil_policy::{ConfiguredAnvilPolicy, VanillaAnvilPolicy};
    use crate::config::AnvilSettings;
    use enchantable_core::item::ids;
    use enchantable_core::{ItemType, ToolMaterial, ToolType};

    fn iron_pickaxe() -> ItemStack {
        ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Iron), 1)
    }

    fn diamond_sword() -> ItemStack {
        ItemStack::new(ItemType::Tool(ToolType::Sword, ToolMaterial::Diamond), 1)
    }

    fn book() -> ItemStack {
        ItemStack::new(ItemType::EnchantedBook, 1)
    }

    fn vanilla() -> AnvilCombiner<VanillaAnvilPolicy> {
        AnvilCombiner::new(VanillaAnvilPolicy)
    }

    /// Vanilla rules with a configurable merge switch and level caps.
    struct TestPolicy {
        merge: bool,
        combine: bool,
        cap: u8,
    }

    impl AnvilPolicy for TestPolicy {
        fn merge_repairs_enabled(&self) -> bool {
            self.merge
        }

        fn combine_enchants_enabled(&self) -> bool {
            self.combine
        }

        fn material_repairs(&self, base: &ItemStack, candidate: &ItemStack) -> bool {
            VanillaAnvilPolicy.material_repairs(base, candidate)
        }

        fn materials_combine(&self, base: &ItemStack, addition: &ItemStack) -> bool {
            VanillaAnvilPolicy.materials_combine(base, addition)
        }

        fn enchant_applies(&self, enchantment: EnchantmentType, target: &ItemStack) -> bool {
            VanillaAnvilPolicy.enchant_applies(enchantment, target)
        }

        fn enchants_conflict(&self, a: EnchantmentType, b: EnchantmentType) -> bool {
            VanillaAnvilPolicy.enchants_conflict(a, b)
        }

        fn enchant_max_level(&self, _enchantment: EnchantmentType) -> u8 {
            self.cap
        }
    }

    #[test]
    fn material_repair_heals_a_quarter_per_unit() {
        let base = iron_pickaxe().with_damage(100);
        let ingot = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 1);

        let result = vanilla().combine(&base, &ingot);
        let combination = result.combination().unwrap();
        // 250 / 4 = 62 per ingot.
        assert_eq!(combination.item.damage(), 38);
        assert_eq!(combination.cost, 1);
        assert_eq!(combination.repair_units, 1);
        assert_eq!(combination.item.repair_cost(), 1);
    }

    #[test]
    fn single_ingot_repairs_a_plain_pickaxe() {
        // No kind has 200 durability, so the quarter heal is derived from the
        // pickaxe itself: min(100, 250 / 4) = 62 here.
        let base = iron_pickaxe().with_damage(100);
        assert_eq!(base.repair_cost(), 0);
        assert!(base.enchantments().next().is_none());
        let quarter = base.max_durability() / 4;
        let mut base_slot = Some(base.clone());
        let mut addition_slot = Some(ItemStack::new(ItemType::Item(ids::IRON_INGOT), 1));

        let combination = vanilla()
            .combine(&base, addition_slot.as_ref().unwrap())
            .combination()
            .cloned()
            .unwrap();
        assert_eq!(combination.item.damage(), 100 - 100u32.min(quarter));
        assert_eq!(combination.repair_units, 1);

        assert_eq!(combination.apply(&mut base_slot, &mut addition_slot), 1);
        assert_eq!(base_slot.unwrap().damage(), 100 - quarter);
        assert!(addition_slot.is_none());
    }

    #[test]
    fn material_repair_stops_when_fully_healed() {
        let base = iron_pickaxe().with_damage(100).with_repair_cost(3);
        let ingots = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 10);

        let result = vanilla().combine(&base, &ingots);
        let combination = result.combination().unwrap();
        assert_eq!(combination.item.damage(), 0);
        assert_eq!(combination.repair_units, 2);
        assert_eq!(combination.cost, 3 + 2);
        assert_eq!(combination.item.repair_cost(), 5);
    }

    #[test]
    fn material_repair_of_undamaged_item_is_empty() {
        let base = iron_pickaxe();
        let ingots = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 4);
        assert!(vanilla().combine(&base, &ingots).is_empty());
    }

    #[test]
    fn wrong_material_does_not_repair() {
        let base = iron_pickaxe().with_damage(100);
        let diamonds = ItemStack::new(ItemType::Item(ids::DIAMOND), 4);
        assert!(vanilla().combine(&base, &diamonds).is_empty());
    }

    #[test]
    fn merge_repair_restores_durability_plus_bonus() {
        let base = iron_pickaxe().with_damage(200);
        let addition = iron_pickaxe().with_damage(150);

        let result = vanilla().combine(&base, &addition);
        let combination = result.combination().unwrap();
        // 200 - (250 - 150) - 250 * 12 / 100 = 200 - 100 - 30 = 70
        assert_eq!(combination.item.damage(), 70);
        assert_eq!(combination.cost, MERGE_REPAIR_COST);
        assert_eq!(combination.repair_units, 0);
        assert_eq!(combination.item.repair_cost(), 0);
    }

    #[test]
    fn merge_repair_never_goes_below_zero() {
        let base = iron_pickaxe().with_damage(10);
        let addition = iron_pickaxe();
        let result = vanilla().combine(&base, &addition);
        assert_eq!(result.item().unwrap().damage(), 0);
    }

    #[test]
    fn merge_repair_can_be_disabled() {
        let policy = TestPolicy {
            merge: false,
            combine: true,
            cap: 5,
        };
        let base = iron_pickaxe().with_damage(200);
        let addition = iron_pickaxe();
        assert!(AnvilCombiner::new(policy).combine(&base, &addition).is_empty());
    }

    #[test]
    fn unbreakable_items_are_not_repaired() {
        let base = iron_pickaxe().with_damage(100).unbreakable();
        let ingot = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 1);
        assert!(vanilla().combine(&base, &ingot).is_empty());
        assert!(vanilla().combine(&base, &iron_pickaxe()).is_empty());
    }

    #[test]
    fn equal_levels_bump_by_one() {
        let base = diamond_sword().with_enchantment(EnchantmentType::Sharpness, 3);
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 3);

        let result = vanilla().combine(&base, &addition);
        let combination = result.combination().unwrap();
        assert_eq!(
            combination.item.enchantment_level(EnchantmentType::Sharpness),
            4
        );
        // Common rarity is 1; halved for books and floored at 1.
        assert_eq!(combination.cost, 4);
        assert_eq!(combination.item.repair_cost(), 4);
        assert_eq!(combination.repair_units, 0);
    }

    #[test]
    fn unequal_levels_take_the_higher() {
        let base = diamond_sword().with_enchantment(EnchantmentType::Sharpness, 1);
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 4);
        let result = vanilla().combine(&base, &addition);
        assert_eq!(
            result.item().unwrap().enchantment_level(EnchantmentType::Sharpness),
            4
        );
    }

    #[test]
    fn levels_clamp_to_policy_and_natural_max() {
        let base = diamond_sword().with_enchantment(EnchantmentType::Sharpness, 5);
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 5);
        let result = vanilla().combine(&base, &addition);
        assert_eq!(
            result.item().unwrap().enchantment_level(EnchantmentType::Sharpness),
            5
        );

        let policy = TestPolicy {
            merge: true,
            combine: true,
            cap: 2,
        };
        let base = diamond_sword();
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 4);
        let result = AnvilCombiner::new(policy).combine(&base, &addition);
        assert_eq!(
            result.item().unwrap().enchantment_level(EnchantmentType::Sharpness),
            2
        );
    }

    #[test]
    fn zero_cap_skips_the_enchantment() {
        let policy = TestPolicy {
            merge: true,
            combine: true,
            cap: 0,
        };
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 2);
        assert!(AnvilCombiner::new(policy)
            .combine(&diamond_sword(), &addition)
            .is_empty());
    }

    #[test]
    fn book_additions_halve_the_multiplier() {
        // Fortune is rare (4): 3 * 2 from a book, 3 * 4 from a tool.
        let base = ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Diamond), 1);
        let from_book = book().with_enchantment(EnchantmentType::Fortune, 3);
        let from_tool = base.clone().with_enchantment(EnchantmentType::Fortune, 3);

        assert_eq!(vanilla().combine(&base, &from_book).cost(), 6);
        assert_eq!(vanilla().combine(&base, &from_tool).cost(), 12);
    }

    #[test]
    fn conflicting_enchantment_is_skipped() {
        let base = ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Diamond), 1)
            .with_enchantment(EnchantmentType::SilkTouch, 1);
        let addition = book().with_enchantment(EnchantmentType::Fortune, 3);

        let result = vanilla().combine(&base, &addition);
        assert!(result.is_empty());
        assert_eq!(base.enchantment_level(EnchantmentType::SilkTouch), 1);
    }

    #[test]
    fn conflict_skip_keeps_other_enchantments() {
        let base = ItemStack::new(ItemType::Tool(ToolType::Pickaxe, ToolMaterial::Diamond), 1)
            .with_enchantment(EnchantmentType::SilkTouch, 1);
        let addition = book()
            .with_enchantment(EnchantmentType::Fortune, 3)
            .with_enchantment(EnchantmentType::Efficiency, 2);

        let result = vanilla().combine(&base, &addition);
        let item = result.item().unwrap();
        assert!(!item.has_enchantment(EnchantmentType::Fortune));
        assert_eq!(item.enchantment_level(EnchantmentType::SilkTouch), 1);
        assert_eq!(item.enchantment_level(EnchantmentType::Efficiency), 2);
    }

    #[test]
    fn inapplicable_enchantment_is_skipped() {
        let addition = book().with_enchantment(EnchantmentType::Power, 2);
        assert!(vanilla().combine(&diamond_sword(), &addition).is_empty());
    }

    #[test]
    fn mismatched_kinds_skip_enchantments_but_keep_repair() {
        let base = iron_pickaxe().with_damage(100);
        let addition = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 1);
        let result = vanilla().combine(&base, &addition);
        assert_eq!(result.repair_units(), 1);
        assert!(result.item().unwrap().enchantments().next().is_none());
    }

    #[test]
    fn disabled_enchant_stage_returns_repair_only() {
        let policy = TestPolicy {
            merge: true,
            combine: false,
            cap: 5,
        };
        let base = iron_pickaxe().with_damage(200);
        let addition = iron_pickaxe().with_enchantment(EnchantmentType::Efficiency, 3);
        let result = AnvilCombiner::new(policy).combine(&base, &addition);
        let combination = result.combination().unwrap();
        assert_eq!(combination.cost, MERGE_REPAIR_COST);
        assert!(!combination.item.has_enchantment(EnchantmentType::Efficiency));
    }

    #[test]
    fn repair_and_enchant_accumulate() {
        let base = iron_pickaxe().with_damage(200);
        let addition = iron_pickaxe()
            .with_damage(150)
            .with_enchantment(EnchantmentType::Unbreaking, 2)
            .with_repair_cost(1);

        let result = vanilla().combine(&base, &addition);
        let combination = result.combination().unwrap();
        assert_eq!(combination.item.damage(), 70);
        assert_eq!(
            combination.item.enchantment_level(EnchantmentType::Unbreaking),
            2
        );
        // 0 (base) + 1 (addition) + 2 (merge) + 2 * 2 (uncommon, not a book)
        assert_eq!(combination.cost, 7);
        assert_eq!(combination.item.repair_cost(), 7);
    }

    #[test]
    fn material_units_survive_the_enchantment_stage() {
        let mut settings = AnvilSettings::default();
        settings.max_levels.insert(EnchantmentType::Efficiency, 5);
        let policy = ConfiguredAnvilPolicy::new([EnchantmentType::Efficiency], settings);
        let base = iron_pickaxe().with_damage(120);
        let ingots = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 5)
            .with_enchantment(EnchantmentType::Efficiency, 1);

        let result = AnvilCombiner::new(policy).combine(&base, &ingots);
        let combination = result.combination().unwrap();
        assert_eq!(combination.repair_units, 2);
        assert_eq!(combination.item.damage(), 0);
        assert_eq!(
            combination.item.enchantment_level(EnchantmentType::Efficiency),
            1
        );
    }

    #[test]
    fn inputs_without_metadata_never_combine() {
        let bare = ItemStack::without_meta(ItemType::Block(ids::STONE), 1);
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 1);
        assert!(vanilla().combine(&bare, &addition).is_empty());
        assert!(vanilla().combine(&diamond_sword(), &bare).is_empty());
    }

    #[test]
    fn inputs_are_not_mutated() {
        let base = diamond_sword().with_enchantment(EnchantmentType::Sharpness, 3);
        let addition = book().with_enchantment(EnchantmentType::Sharpness, 3);
        let (before_base, before_addition) = (base.clone(), addition.clone());
        let _ = vanilla().combine(&base, &addition);
        assert_eq!(base, before_base);
        assert_eq!(addition, before_addition);
    }

    #[test]
    fn try_combine_rejects_malformed_stacks() {
        let bare = ItemStack::without_meta(ItemType::Bow, 1);
        let err = vanilla().try_combine(&bare, &book()).unwrap_err();
        assert_eq!(err, AnvilError::InvalidBase(ItemError::MissingMeta(ItemType::Bow)));

        let broken = iron_pickaxe().with_damage(999);
        let err = vanilla().try_combine(&iron_pickaxe(), &broken).unwrap_err();
        assert!(matches!(
            err,
            AnvilError::InvalidAddition(ItemError::DamageOutOfRange { damage: 999, .. })
        ));

        let ok = vanilla()
            .try_combine(&iron_pickaxe().with_damage(10), &iron_pickaxe())
            .unwrap();
        assert!(!ok.is_empty());
    }

    #[test]
    fn apply_consumes_units_or_whole_addition() {
        let base = iron_pickaxe().with_damage(100);
        let ingots = ItemStack::new(ItemType::Item(ids::IRON_INGOT), 5);
        let combination = vanilla()
            .combine(&base, &ingots)
            .combination()
            .cloned()
            .unwrap();

        let mut base_slot = Some(base.clone());
        let mut addition_slot = Some(ingots);
        let cost = combination.apply(&mut base_slot, &mut addition_slot);
        assert_eq!(cost, 2);
        assert_eq!(base_slot.unwrap().damage(), 0);
        assert_eq!(addition_slot.unwrap().count, 3);

        let addition = book().with_enchantment(EnchantmentType::Efficiency, 1);
        let combination = vanilla()
            .combine(&iron_pickaxe(), &addition)
            .combination()
            .cloned()
            .unwrap();
        let mut base_slot = Some(iron_pickaxe());
        let mut addition_slot = Some(addition);
        combination.apply(&mut base_slot, &mut addition_slot);
        assert!(addition_slot.is_none());
    }

    #[test]
    fn result_serializes_with_outcome_tag() {
        let json = serde_json::to_value(CombinationResult::Empty).unwrap();
        assert_eq!(json, serde_json::json!({ "outcome": "empty" }));

        let addition = book().with_enchantment(EnchantmentType::Sharpness, 1);
        let result = vanilla().combine(&diamond_sword(), &addition);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["outcome"], "combined");
        assert_eq!(json["cost"], 1);
    }
}
