//! Asynchronous abstraction for computer-controlled turns.
//!
//! The session asks an [`ActionProvider`] what the AI side should do and
//! then drives the same pipelines a human selection would.
use async_trait::async_trait;
use game_core::{Direction, GameEnv, GameState, PlayerId, Position};
use serde::{Deserialize, Serialize};

use super::errors::Result;

/// What a computer-controlled side chose for its turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    /// Cast a spell that needs no target (Shield).
    CastSelf { spell: String },
    /// Cast a spell at a cell.
    CastAt { spell: String, target: Position },
    /// Step the wizard one cell.
    Move(Direction),
    /// Nothing useful to do; end the turn.
    Pass,
}

#[async_trait]
pub trait ActionProvider: Send + Sync {
    /// Decide the action for `player` based on a read-only snapshot.
    async fn decide(
        &self,
        player: PlayerId,
        state: &GameState,
        env: GameEnv<'_>,
    ) -> Result<Decision>;
}

/// A provider that always passes. Useful for tests or as a fallback.
pub struct PassProvider;

#[async_trait]
impl ActionProvider for PassProvider {
    async fn decide(
        &self,
        _player: PlayerId,
        _state: &GameState,
        _env: GameEnv<'_>,
    ) -> Result<Decision> {
        Ok(Decision::Pass)
    }
}
