//! Unified error types surfaced by the runtime API.
//!
//! Illegal player input never reaches this type: the session rejects it with
//! an error cue and keeps its mode. `RuntimeError` covers failures the caller
//! has to handle.

use game_core::{
    BoardError, ErrorSeverity, ExecuteError, GameError, PieceId, PlayerId, Position, TurnError,
};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("the duel has already ended")]
    GameOver,

    #[error("{0}'s wizard is not on the board")]
    MissingWizard(PlayerId),

    #[error("failed to set up the board")]
    InitialState(#[source] BoardError),

    #[error(transparent)]
    Execute(#[from] ExecuteError),

    #[error("input channel closed before the duel ended")]
    InputClosed,

    #[error("no AI action for {passes} turns in a row, duel stalled")]
    Stalled { passes: u32 },
}

impl RuntimeError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::Execute(error) => error.severity(),
            RuntimeError::MissingWizard(_) => ErrorSeverity::Internal,
            RuntimeError::Stalled { .. } => ErrorSeverity::Recoverable,
            RuntimeError::GameOver | RuntimeError::InitialState(_) | RuntimeError::InputClosed => {
                ErrorSeverity::Fatal
            }
        }
    }
}

/// Player input the session refused before it reached the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("no piece at {0}")]
    EmptyCell(Position),

    #[error(transparent)]
    Turn(#[from] TurnError),

    #[error("no menu entry for key {0}")]
    UnknownEntry(u8),

    #[error("{0} has already been cast")]
    SpellUsed(String),

    #[error("piece {0} cannot cast spells")]
    NotACaster(PieceId),

    #[error("{0} has no goblin ready to act")]
    NoGoblinReady(PlayerId),
}

impl GameError for InputError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Turn(error) => error.severity(),
            Self::NotACaster(_) | Self::NoGoblinReady(_) => ErrorSeverity::Internal,
            Self::EmptyCell(_) | Self::UnknownEntry(_) | Self::SpellUsed(_) => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyCell(_) => "INPUT_EMPTY_CELL",
            Self::Turn(error) => error.error_code(),
            Self::UnknownEntry(_) => "INPUT_UNKNOWN_ENTRY",
            Self::SpellUsed(_) => "INPUT_SPELL_USED",
            Self::NotACaster(_) => "INPUT_NOT_A_CASTER",
            Self::NoGoblinReady(_) => "INPUT_NO_GOBLIN_READY",
        }
    }
}
