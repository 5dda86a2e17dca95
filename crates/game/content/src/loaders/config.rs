//! Game configuration loader.

use std::path::Path;

use anyhow::{Context, ensure};
use game_core::GameConfig;

use crate::DEFAULT_CONFIG_TOML;
use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
///
/// Missing keys fall back to [`GameConfig::default`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid config {}", path.display()))
    }

    /// Parse and validate a TOML document.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig =
            toml::from_str(content).context("Failed to parse config TOML")?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// The configuration embedded in the crate.
    pub fn embedded() -> LoadResult<GameConfig> {
        Self::parse(DEFAULT_CONFIG_TOML)
    }

    fn validate(config: &GameConfig) -> LoadResult<()> {
        ensure!(
            config.width >= 2 && config.height >= 2,
            "board must be at least 2x2, got {}x{}",
            config.width,
            config.height
        );
        ensure!(config.wizard_hp > 0, "wizard_hp must be positive");
        ensure!(config.goblin_hp > 0, "goblin_hp must be positive");
        for (label, range) in [
            ("goblin_damage", config.goblin_damage),
            ("default_melee_damage", config.default_melee_damage),
        ] {
            ensure!(
                range.min <= range.max,
                "{label} has min {} above max {}",
                range.min,
                range.max
            );
        }
        Ok(())
    }
}
