//! Content factory for building duel content from a data directory.

use std::path::{Path, PathBuf};

use game_core::{GameConfig, SpellCatalog};

use crate::loaders::{ConfigLoader, LoadResult, SpellLoader};

/// Loads duel content from a data directory, falling back to the embedded
/// defaults for any file that is absent.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── spells.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        if path.exists() {
            ConfigLoader::load(&path)
        } else {
            ConfigLoader::embedded()
        }
    }

    /// Load the spell catalog from `spells.ron`.
    pub fn load_spells(&self) -> LoadResult<SpellCatalog> {
        let path = self.data_dir.join("spells.ron");
        if path.exists() {
            SpellLoader::load(&path)
        } else {
            SpellLoader::embedded()
        }
    }
}
