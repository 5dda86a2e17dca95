//! Interaction modes and the inputs that drive them.

use game_core::{Direction, GameResult, PieceId, Position};
use serde::{Deserialize, Serialize};

/// Which page of a piece menu is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuPage {
    Root,
    Spells,
}

/// A spell waiting for its target cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Targeting {
    pub spell: String,
    pub caster: PieceId,
    pub origin: Position,
    pub range: u32,
}

impl Targeting {
    /// Cursor cells the player may reach while choosing a target.
    pub fn allows(&self, cell: Position) -> bool {
        self.origin.chebyshev(cell) <= self.range
    }
}

/// Exactly one mode is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, strum::IntoStaticStr)]
pub enum Mode {
    /// Cursor navigation, nothing selected.
    Idle,
    PieceSelected { piece: PieceId, page: MenuPage },
    Movement { piece: PieceId },
    Targeting(Targeting),
    GameOver(GameResult),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// One-shot input signals delivered by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Input {
    Direction(Direction),
    Confirm,
    Cancel,
    /// Numeric menu selection.
    Select(u8),
    TogglePause,
}

/// Whether the duel goes on after handling an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Finished(GameResult),
}
