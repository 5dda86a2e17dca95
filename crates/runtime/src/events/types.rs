//! Event payloads for each topic.

use game_core::{ActionResult, GameResult, PlayerId};
use serde::{Deserialize, Serialize};

/// Turn boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    Started { player: PlayerId, turn: u32 },
    Ended { player: PlayerId, turn: u32 },
}

/// Outcome of a requested game action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionEvent {
    Applied {
        player: PlayerId,
        nonce: u64,
        result: ActionResult,
    },
    /// The engine refused the action; state is unchanged.
    Rejected {
        player: PlayerId,
        code: String,
        message: String,
    },
}

/// Controller-level changes that are not game actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    Started { seed: u64 },
    /// New interaction mode, rendered as its name (e.g. `Targeting`).
    ModeChanged(String),
    Paused(bool),
    GameEnded(GameResult),
    Restarted { seed: u64 },
}
