//! Spell catalog loader.

use std::path::Path;

use anyhow::Context;
use game_core::{SpellCatalog, SpellDefinition};
use serde::{Deserialize, Serialize};

use crate::DEFAULT_SPELLS_RON;
use crate::loaders::{LoadResult, read_file};

/// Spell catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellCatalogFile {
    pub spells: Vec<SpellDefinition>,
}

/// Loader for the spell catalog from RON files.
pub struct SpellLoader;

impl SpellLoader {
    pub fn load(path: &Path) -> LoadResult<SpellCatalog> {
        let content = read_file(path)?;
        Self::parse(&content).with_context(|| format!("Invalid spell catalog {}", path.display()))
    }

    /// Parse a RON document and validate names and keys.
    pub fn parse(content: &str) -> LoadResult<SpellCatalog> {
        let file: SpellCatalogFile =
            ron::from_str(content).context("Failed to parse spell catalog RON")?;
        Ok(SpellCatalog::new(file.spells)?)
    }

    /// The catalog embedded in the crate.
    pub fn embedded() -> LoadResult<SpellCatalog> {
        Self::parse(DEFAULT_SPELLS_RON)
    }
}
