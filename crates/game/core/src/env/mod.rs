//! Read-only services the engine consults while executing actions.
mod rng;

pub use rng::{FixedRng, PcgRng, RngOracle, RollContext, compute_seed};

use crate::config::GameConfig;
use crate::spell::SpellCatalog;

/// Bundle of configuration, spell catalog and dice passed to the engine.
#[derive(Clone, Copy)]
pub struct GameEnv<'a> {
    pub config: &'a GameConfig,
    pub spells: &'a SpellCatalog,
    pub rng: &'a dyn RngOracle,
}

impl<'a> GameEnv<'a> {
    pub fn new(config: &'a GameConfig, spells: &'a SpellCatalog, rng: &'a dyn RngOracle) -> Self {
        Self {
            config,
            spells,
            rng,
        }
    }
}

impl std::fmt::Debug for GameEnv<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEnv")
            .field("config", self.config)
            .field("spells", &self.spells.len())
            .finish_non_exhaustive()
    }
}
