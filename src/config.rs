use anyhow::{Context, Result};
use enchantable_world::{EnchantableConfig, EnchantableSettings};
use std::{fs, path::Path};
use tracing::warn;

pub const DEFAULT_CONFIG_PATH: &str = "config/enchantable.toml";

/// Load configuration from `path`, falling back to defaults on errors.
pub fn load_from_path(path: &Path) -> EnchantableConfig {
    match fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<EnchantableConfig>(&contents) {
            Ok(cfg) => cfg,
            Err(err) => {
                warn!("Failed to parse {}: {err}. Using defaults", path.display());
                EnchantableConfig::default()
            }
        },
        Err(err) => {
            if path != Path::new(DEFAULT_CONFIG_PATH) || err.kind() != std::io::ErrorKind::NotFound
            {
                warn!("Failed to read {}: {err}. Using defaults", path.display());
            } else {
                warn!("Config not found at {}. Using defaults", path.display());
            }
            EnchantableConfig::default()
        }
    }
}

/// Load and resolve configuration, failing on any unreadable or invalid entry.
pub fn load_strict(path: &Path) -> Result<EnchantableSettings> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let config: EnchantableConfig = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    config
        .resolve_strict()
        .with_context(|| format!("Invalid configuration in {}", path.display()))
}

/// Save configuration as pretty TOML.
pub fn save_to_path(config: &EnchantableConfig, path: &Path) -> Result<()> {
    let toml = toml::to_string_pretty(config)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, toml)?;
    Ok(())
}
