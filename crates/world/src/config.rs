//! Per-world configuration for enchantable blocks.
//!
//! Configuration is authored as a default section plus optional per-world
//! overrides. [`EnchantableConfig`] is the raw (serde) shape; resolving it
//! produces [`EnchantableSettings`], which answers "what is this value in world
//! X" and hands out [`AnvilSettings`] / [`FurnaceSettings`] snapshots.
//!
//! Resolution is lenient by default: unknown enchantment names or out-of-range
//! levels are logged and skipped, so a bad entry falls through to the default
//! instead of discarding the whole file. [`EnchantableConfig::resolve_strict`]
//! reports the first problem instead.

use enchantable_core::EnchantmentType;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;
use tracing::warn;

/// Problems found while resolving configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An enchantment name did not resolve.
    #[error("{section}: unknown enchantment {name:?}")]
    UnknownEnchantment {
        /// Where the name appeared.
        section: String,
        /// The offending name.
        name: String,
    },
    /// A conflict entry did not name exactly two enchantments.
    #[error("{section}: conflict entry must name two enchantments, got {len}")]
    MalformedConflict {
        /// Where the entry appeared.
        section: String,
        /// Number of names in the entry.
        len: usize,
    },
    /// A level was outside 0..=255.
    #[error("{section}: level {level} for {name} is out of range")]
    LevelOutOfRange {
        /// Where the level appeared.
        section: String,
        /// Enchantment name.
        name: String,
        /// The offending level.
        level: i64,
    },
}

/// Anvil keys of a config section. Absent keys inherit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnvilSection {
    /// Allow merging two items of the same kind to repair.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merge_repairs: Option<bool>,
    /// Allow combining enchantments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combine_enchants: Option<bool>,
    /// Enchantments that may not be applied at the anvil.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled_enchants: Option<Vec<String>>,
    /// Pairs of mutually exclusive enchantments.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_conflicts: Option<Vec<Vec<String>>>,
    /// Highest level the anvil combines each enchantment to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enchantment_max: Option<BTreeMap<String, i64>>,
}

/// Furnace keys of a config section. Absent keys inherit.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FurnaceSection {
    /// Whether enchanted furnaces work in this world.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Whether silk touch furnaces may freeze their burn time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_pause: Option<bool>,
}

/// Overrides applied to a single world.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WorldOverrides {
    /// Anvil overrides.
    pub anvil: AnvilSection,
    /// Furnace overrides.
    pub furnace: FurnaceSection,
}

/// Raw configuration file shape.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct EnchantableConfig {
    /// Default anvil settings.
    pub anvil: AnvilSection,
    /// Default furnace settings.
    pub furnace: FurnaceSection,
    /// Per-world overrides keyed by world name.
    pub worlds: BTreeMap<String, WorldOverrides>,
}

/// A value with per-world overrides.
#[derive(Debug, Clone, PartialEq)]
pub struct WorldSetting<T> {
    default: T,
    overrides: BTreeMap<String, T>,
}

impl<T> WorldSetting<T> {
    /// Setting with only a default.
    pub fn new(default: T) -> Self {
        Self {
            default,
            overrides: BTreeMap::new(),
        }
    }

    /// Add or replace a world override.
    pub fn set_override(&mut self, world: impl Into<String>, value: T) {
        self.overrides.insert(world.into(), value);
    }

    /// Value for `world`, falling back to the default.
    pub fn get(&self, world: &str) -> &T {
        self.overrides.get(world).unwrap_or(&self.default)
    }

    /// The default value.
    pub fn default_value(&self) -> &T {
        &self.default
    }
}

/// Per-enchantment levels with per-world overrides.
///
/// Lookup order: world entry, default entry, natural maximum.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorldMapping {
    default: BTreeMap<EnchantmentType, u8>,
    overrides: BTreeMap<String, BTreeMap<EnchantmentType, u8>>,
}

impl WorldMapping {
    /// Level cap for `enchantment` in `world`.
    pub fn get(&self, world: &str, enchantment: EnchantmentType) -> u8 {
        self.overrides
            .get(world)
            .and_then(|levels| levels.get(&enchantment))
            .or_else(|| self.default.get(&enchantment))
            .copied()
            .unwrap_or_else(|| enchantment.max_level())
    }

    /// Merged explicit entries for `world`.
    pub fn entries(&self, world: &str) -> BTreeMap<EnchantmentType, u8> {
        let mut merged = self.default.clone();
        if let Some(levels) = self.overrides.get(world) {
            merged.extend(levels.iter().map(|(e, l)| (*e, *l)));
        }
        merged
    }
}

/// Resolved anvil settings for one world.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnvilSettings {
    /// Same-kind merge repair allowed.
    pub merge_repairs: bool,
    /// Enchantment combination allowed.
    pub combine_enchants: bool,
    /// Enchantments rejected at the anvil.
    pub disabled_enchants: BTreeSet<EnchantmentType>,
    /// Conflict pairs; checked in both orders.
    pub conflicts: Vec<(EnchantmentType, EnchantmentType)>,
    /// Explicit level caps; others use the natural maximum.
    pub max_levels: BTreeMap<EnchantmentType, u8>,
}

impl Default for AnvilSettings {
    fn default() -> Self {
        Self {
            merge_repairs: true,
            combine_enchants: true,
            disabled_enchants: BTreeSet::new(),
            conflicts: default_conflicts(),
            max_levels: BTreeMap::new(),
        }
    }
}

impl AnvilSettings {
    /// Whether `a` and `b` are listed as a conflict pair, in either order.
    pub fn conflicts(&self, a: EnchantmentType, b: EnchantmentType) -> bool {
        self.conflicts
            .iter()
            .any(|&(x, y)| (x == a && y == b) || (x == b && y == a))
    }

    /// Level cap for `enchantment`.
    pub fn max_level(&self, enchantment: EnchantmentType) -> u8 {
        self.max_levels
            .get(&enchantment)
            .copied()
            .unwrap_or_else(|| enchantment.max_level())
    }
}

/// Resolved furnace settings for one world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FurnaceSettings {
    /// Enchanted furnaces active.
    pub enabled: bool,
    /// Silk touch furnaces may freeze.
    pub allow_pause: bool,
}

impl Default for FurnaceSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            allow_pause: true,
        }
    }
}

fn default_conflicts() -> Vec<(EnchantmentType, EnchantmentType)> {
    vec![(EnchantmentType::SilkTouch, EnchantmentType::Fortune)]
}

/// Fully resolved configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnchantableSettings {
    /// Merge repair toggle.
    pub merge_repairs: WorldSetting<bool>,
    /// Enchant combination toggle.
    pub combine_enchants: WorldSetting<bool>,
    /// Disabled enchantments.
    pub disabled_enchants: WorldSetting<BTreeSet<EnchantmentType>>,
    /// Conflict pairs.
    pub enchantment_conflicts: WorldSetting<Vec<(EnchantmentType, EnchantmentType)>>,
    /// Level caps.
    pub enchantment_max: WorldMapping,
    /// Furnace toggle.
    pub furnace_enabled: WorldSetting<bool>,
    /// Freeze toggle.
    pub allow_pause: WorldSetting<bool>,
}

impl Default for EnchantableSettings {
    fn default() -> Self {
        EnchantableConfig::default().resolve()
    }
}

impl EnchantableSettings {
    /// Anvil settings snapshot for `world`.
    pub fn anvil(&self, world: &str) -> AnvilSettings {
        AnvilSettings {
            merge_repairs: *self.merge_repairs.get(world),
            combine_enchants: *self.combine_enchants.get(world),
            disabled_enchants: self.disabled_enchants.get(world).clone(),
            conflicts: self.enchantment_conflicts.get(world).clone(),
            max_levels: self.enchantment_max.entries(world),
        }
    }

    /// Furnace settings snapshot for `world`.
    pub fn furnace(&self, world: &str) -> FurnaceSettings {
        FurnaceSettings {
            enabled: *self.furnace_enabled.get(world),
            allow_pause: *self.allow_pause.get(world),
        }
    }
}

impl EnchantableConfig {
    /// Resolve, logging and skipping invalid entries.
    pub fn resolve(&self) -> EnchantableSettings {
        let mut resolver = Resolver::default();
        let settings = resolver.resolve(self);
        for problem in &resolver.problems {
            warn!("Ignoring invalid config entry: {problem}");
        }
        settings
    }

    /// Resolve, failing on the first invalid entry.
    pub fn resolve_strict(&self) -> Result<EnchantableSettings, ConfigError> {
        let mut resolver = Resolver::default();
        let settings = resolver.resolve(self);
        match resolver.problems.into_iter().next() {
            Some(problem) => Err(problem),
            None => Ok(settings),
        }
    }
}

#[derive(Default)]
struct Resolver {
    problems: Vec<ConfigError>,
}

impl Resolver {
    fn resolve(&mut self, config: &EnchantableConfig) -> EnchantableSettings {
        let defaults = AnvilSettings::default();
        let furnace_defaults = FurnaceSettings::default();
        let anvil = &config.anvil;

        let mut settings = EnchantableSettings {
            merge_repairs: WorldSetting::new(anvil.merge_repairs.unwrap_or(defaults.merge_repairs)),
            combine_enchants: WorldSetting::new(
                anvil.combine_enchants.unwrap_or(defaults.combine_enchants),
            ),
            disabled_enchants: WorldSetting::new(match &anvil.disabled_enchants {
                Some(names) => self.enchant_set("anvil", names),
                None => defaults.disabled_enchants,
            }),
            enchantment_conflicts: WorldSetting::new(match &anvil.enchantment_conflicts {
                Some(pairs) => self.conflict_pairs("anvil", pairs),
                None => defaults.conflicts,
            }),
            enchantment_max: WorldMapping {
                default: anvil
                    .enchantment_max
                    .as_ref()
                    .map(|levels| self.levels("anvil", levels))
                    .unwrap_or_default(),
                overrides: BTreeMap::new(),
            },
            furnace_enabled: WorldSetting::new(
                config.furnace.enabled.unwrap_or(furnace_defaults.enabled),
            ),
            allow_pause: WorldSetting::new(
                config.furnace.allow_pause.unwrap_or(furnace_defaults.allow_pause),
            ),
        };

        for (world, overrides) in &config.worlds {
            let section = format!("worlds.{world}");
            let anvil = &overrides.anvil;
            if let Some(value) = anvil.merge_repairs {
                settings.merge_repairs.set_override(world, value);
            }
            if let Some(value) = anvil.combine_enchants {
                settings.combine_enchants.set_override(world, value);
            }
            if let Some(names) = &anvil.disabled_enchants {
                let set = self.enchant_set(&section, names);
                settings.disabled_enchants.set_override(world, set);
            }
            // An override that resolves to nothing still replaces the default.
            if let Some(pairs) = &anvil.enchantment_conflicts {
                let pairs = self.conflict_pairs(&section, pairs);
                settings.enchantment_conflicts.set_override(world, pairs);
            }
            if let Some(levels) = &anvil.enchantment_max {
                let levels = self.levels(&section, levels);
                settings
                    .enchantment_max
                    .overrides
                    .insert(world.clone(), levels);
            }
            if let Some(value) = overrides.furnace.enabled {
                settings.furnace_enabled.set_override(world, value);
            }
            if let Some(value) = overrides.furnace.allow_pause {
                settings.allow_pause.set_override(world, value);
            }
        }

        settings
    }

    fn enchantment(&mut self, section: &str, name: &str) -> Option<EnchantmentType> {
        match name.parse::<EnchantmentType>() {
            Ok(enchantment) => Some(enchantment),
            Err(_) => {
                self.problems.push(ConfigError::UnknownEnchantment {
                    section: section.to_string(),
                    name: name.to_string(),
                });
                None
            }
        }
    }

    fn enchant_set(&mut self, section: &str, names: &[String]) -> BTreeSet<EnchantmentType> {
        names
            .iter()
            .filter_map(|name| self.enchantment(section, name))
            .collect()
    }

    fn conflict_pairs(
        &mut self,
        section: &str,
        pairs: &[Vec<String>],
    ) -> Vec<(EnchantmentType, EnchantmentType)> {
        let mut resolved = Vec::with_capacity(pairs.len());
        for pair in pairs {
            let [a, b] = pair.as_slice() else {
                self.problems.push(ConfigError::MalformedConflict {
                    section: section.to_string(),
                    len: pair.len(),
                });
                continue;
            };
            let a = self.enchantment(section, a);
            let b = self.enchantment(section, b);
            if let (Some(a), Some(b)) = (a, b) {
                resolved.push((a, b));
            }
        }
        resolved
    }

    fn levels(
        &mut self,
        section: &str,
        levels: &BTreeMap<String, i64>,
    ) -> BTreeMap<EnchantmentType, u8> {
        let mut resolved = BTreeMap::new();
        for (name, level) in levels {
            let Some(enchantment) = self.enchantment(section, name) else {
                continue;
            };
            match u8::try_from(*level) {
                Ok(level) => {
                    resolved.insert(enchantment, level);
                }
                Err(_) => self.problems.push(ConfigError::LevelOutOfRange {
                    section: section.to_string(),
                    name: name.clone(),
                    level: *level,
                }),
            }
        }
        resolved
    }
}
