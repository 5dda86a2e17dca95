//! Runtime configuration: who is AI controlled, pacing, and AI tuning.

use std::time::Duration;

use game_core::{PlayerId, SpellCatalog};
use serde::{Deserialize, Serialize};

/// Fixed presentation delays inserted between pipeline stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pacing {
    /// Pause before the AI acts.
    pub ai_thinking: Duration,
    /// Step animation of a moving piece.
    pub movement: Duration,
    /// Self-cast (shield) effect.
    pub self_cast: Duration,
    /// Ice Wall or goblin appearing.
    pub placement: Duration,
    /// Offensive spell flight and impact.
    pub impact: Duration,
    /// Spell shattering an Ice Wall.
    pub wall_hit: Duration,
    /// Turn and game-over banners.
    pub banner: Duration,
}

impl Pacing {
    /// No delays at all. Used by tests and headless runs.
    pub const fn instant() -> Self {
        Self {
            ai_thinking: Duration::ZERO,
            movement: Duration::ZERO,
            self_cast: Duration::ZERO,
            placement: Duration::ZERO,
            impact: Duration::ZERO,
            wall_hit: Duration::ZERO,
            banner: Duration::ZERO,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            ai_thinking: Duration::from_millis(800),
            movement: Duration::from_millis(500),
            self_cast: Duration::from_millis(1500),
            placement: Duration::from_millis(500),
            impact: Duration::from_millis(3500),
            wall_hit: Duration::from_millis(1000),
            banner: Duration::from_millis(1500),
        }
    }
}

/// Tuning knobs of the rule-based AI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiConfig {
    /// Shield up when HP is at or below this value.
    pub low_hp_threshold: u32,
    /// Inclusive distance band in which an Ice Wall is considered.
    pub ice_wall_min_distance: u32,
    pub ice_wall_max_distance: u32,
    /// Offensive spells the AI may cast, most preferred first.
    pub offensive_preference: Vec<String>,
    pub shield_spell: String,
    pub ice_wall_spell: String,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            low_hp_threshold: 8,
            ice_wall_min_distance: 4,
            ice_wall_max_distance: 6,
            offensive_preference: vec![
                SpellCatalog::LIGHTNING.to_owned(),
                SpellCatalog::MAGIC_BOLT.to_owned(),
            ],
            shield_spell: SpellCatalog::SHIELD.to_owned(),
            ice_wall_spell: SpellCatalog::ICE_WALL.to_owned(),
        }
    }
}

/// Session-level configuration shared by the controller and AI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Players driven by the AI policy.
    pub ai_players: Vec<PlayerId>,
    /// Base seed for damage rolls.
    pub game_seed: u64,
    pub pacing: Pacing,
    /// How long a human has to answer the melee prompt before it counts as "no".
    pub attack_prompt_timeout: Duration,
    pub ai: AiConfig,
    /// Consecutive AI turns without an action after which an all-AI duel
    /// is abandoned as stalled.
    pub ai_pass_limit: u32,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    pub fn is_ai(&self, player: PlayerId) -> bool {
        self.ai_players.contains(&player)
    }

    /// All humans, no delays. Handy for tests.
    pub fn headless(game_seed: u64) -> Self {
        Self {
            ai_players: Vec::new(),
            game_seed,
            pacing: Pacing::instant(),
            ..Self::default()
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            ai_players: vec![PlayerId::Two],
            game_seed: 0,
            pacing: Pacing::default(),
            attack_prompt_timeout: Duration::from_secs(10),
            ai: AiConfig::default(),
            ai_pass_limit: 6,
            event_buffer_size: 100,
        }
    }
}
