//! Data-driven duel content and loaders.
//!
//! This crate ships the default content as embedded data files and provides
//! loaders for overriding it from disk:
//! - Game configuration (board size, HP, melee ranges) via TOML
//! - Spell catalog via RON
//!
//! Content is consumed by the runtime and never appears in game state.

/// Embedded default spell catalog.
pub const DEFAULT_SPELLS_RON: &str = include_str!("../data/spells.ron");

/// Embedded default game configuration.
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../data/config.toml");

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, ContentFactory, LoadResult, SpellLoader};
