//! Anvil scenarios read from JSON.

use anyhow::{Context, Result};
use enchantable_core::ItemStack;
use enchantable_world::{
    AnvilCombiner, CombinationResult, ConfiguredAnvilPolicy, EnchantableSettings,
    VanillaAnvilPolicy, FURNACE_ENCHANTMENTS,
};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use tracing::info;

/// Which rule set a scenario combines under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyKind {
    /// Base game anvil rules.
    #[default]
    Vanilla,
    /// Enchanted-block rules resolved from the world's configuration.
    Block,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default = "default_world")]
    pub world: String,
    #[serde(default)]
    pub policy: PolicyKind,
    pub base: ItemStack,
    pub addition: ItemStack,
}

fn default_world() -> String {
    "world".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub world: String,
    pub policy: PolicyKind,
    pub result: CombinationResult,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read scenario {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse scenario {}", path.display()))
    }

    /// Combine the scenario's items under its policy.
    pub fn run(&self, settings: &EnchantableSettings) -> Result<ScenarioReport> {
        let result = match self.policy {
            PolicyKind::Vanilla => {
                AnvilCombiner::new(VanillaAnvilPolicy).try_combine(&self.base, &self.addition)
            }
            PolicyKind::Block => {
                let policy =
                    ConfiguredAnvilPolicy::new(FURNACE_ENCHANTMENTS, settings.anvil(&self.world));
                AnvilCombiner::new(policy).try_combine(&self.base, &self.addition)
            }
        }
        .context("Scenario items are malformed")?;

        info!(
            world = %self.world,
            policy = ?self.policy,
            cost = result.cost(),
            "anvil scenario combined"
        );
        Ok(ScenarioReport {
            world: self.world.clone(),
            policy: self.policy,
            result,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use enchantable_core::EnchantmentType;
    use enchantable_world::EnchantableConfig;

    const FURNACE_BOOK: &str = r#"{
        "world": "mining_world",
        "policy": "block",
        "base": { "item_type": { "block": 61 }, "count": 1, "meta": {} },
        "addition": {
            "item_type": "enchanted_book",
            "count": 1,
            "meta": { "enchantments": { "unbreaking": 2, "efficiency": 3 } }
        }
    }"#;

    fn mining_settings() -> EnchantableSettings {
        let mut config = EnchantableConfig::default();
        config
            .worlds
            .entry("mining_world".into())
            .or_default()
            .anvil
            .disabled_enchants = Some(vec!["unbreaking".into()]);
        config.resolve()
    }

    #[test]
    fn block_scenario_uses_world_settings() {
        let scenario: Scenario = serde_json::from_str(FURNACE_BOOK).unwrap();
        let report = scenario.run(&mining_settings()).unwrap();
        let item = report.result.item().unwrap();
        assert_eq!(item.enchantment_level(EnchantmentType::Efficiency), 3);
        assert!(!item.has_enchantment(EnchantmentType::Unbreaking));
        // Efficiency is common: 3 levels at a floored multiplier of 1.
        assert_eq!(report.result.cost(), 3);
    }

    #[test]
    fn other_worlds_use_defaults() {
        let mut scenario: Scenario = serde_json::from_str(FURNACE_BOOK).unwrap();
        scenario.world = "overworld".into();
        let report = scenario.run(&mining_settings()).unwrap();
        let item = report.result.item().unwrap();
        assert_eq!(item.enchantment_level(EnchantmentType::Unbreaking), 2);
    }

    #[test]
    fn vanilla_rejects_enchanting_blocks() {
        let mut scenario: Scenario = serde_json::from_str(FURNACE_BOOK).unwrap();
        scenario.policy = PolicyKind::Vanilla;
        let report = scenario.run(&EnchantableSettings::default()).unwrap();
        assert!(report.result.is_empty());
    }

    #[test]
    fn bundled_scenarios_combine() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios");
        let settings = crate::config::load_strict(
            &Path::new(env!("CARGO_MANIFEST_DIR")).join(crate::config::DEFAULT_CONFIG_PATH),
        )
        .unwrap();

        let book = Scenario::load(&dir.join("furnace_efficiency_book.json")).unwrap();
        let report = book.run(&settings).unwrap();
        let item = report.result.item().unwrap();
        assert_eq!(item.enchantment_level(EnchantmentType::Efficiency), 5);
        // Fortune conflicts nowhere in the endgame world.
        assert_eq!(item.enchantment_level(EnchantmentType::Fortune), 2);

        let repair = Scenario::load(&dir.join("iron_pickaxe_repair.json")).unwrap();
        let report = repair.run(&settings).unwrap();
        assert_eq!(report.result.repair_units(), 3);
        assert_eq!(report.result.item().unwrap().damage(), 200 - 3 * 62);
    }

    #[test]
    fn malformed_items_are_errors() {
        let mut scenario: Scenario = serde_json::from_str(FURNACE_BOOK).unwrap();
        scenario.base.meta = None;
        assert!(scenario.run(&EnchantableSettings::default()).is_err());
    }
}
