//! Error types for the action execution pipeline.

use crate::board::MoveError;
use crate::combat::CombatError;
use crate::error::{ErrorSeverity, GameError};
use crate::spell::CastError;
use crate::state::{PieceId, PlayerId};

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

/// Turn-ownership violations checked before any action runs.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TurnError {
    #[error("the duel is already over")]
    GameOver,

    #[error("piece {0} is not on the board")]
    PieceNotFound(PieceId),

    #[error("piece {piece} does not belong to {current}")]
    NotYourPiece { piece: PieceId, current: PlayerId },

    #[error("piece {0} has already acted this turn")]
    AlreadyActed(PieceId),
}

impl GameError for TurnError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotYourPiece { .. } | Self::AlreadyActed(_) => ErrorSeverity::Recoverable,
            Self::PieceNotFound(_) => ErrorSeverity::Internal,
            Self::GameOver => ErrorSeverity::Fatal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::GameOver => "TURN_GAME_OVER",
            Self::PieceNotFound(_) => "TURN_PIECE_NOT_FOUND",
            Self::NotYourPiece { .. } => "TURN_NOT_YOUR_PIECE",
            Self::AlreadyActed(_) => "TURN_ALREADY_ACTED",
        }
    }
}

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExecuteError {
    #[error("move failed: {0}")]
    Move(TransitionPhaseError<MoveError>),

    #[error("cast failed: {0}")]
    Cast(TransitionPhaseError<CastError>),

    #[error("melee failed: {0}")]
    Melee(TransitionPhaseError<CombatError>),

    #[error(transparent)]
    Turn(#[from] TurnError),
}

impl ExecuteError {
    /// The phase that failed; `None` for turn checks made before dispatch.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::Move(error) => Some(error.phase),
            Self::Cast(error) => Some(error.phase),
            Self::Melee(error) => Some(error.phase),
            Self::Turn(_) => None,
        }
    }

    pub fn as_cast(&self) -> Option<&CastError> {
        match self {
            Self::Cast(error) => Some(&error.error),
            _ => None,
        }
    }

    pub fn as_move(&self) -> Option<&MoveError> {
        match self {
            Self::Move(error) => Some(&error.error),
            _ => None,
        }
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Move(error) => error.error.severity(),
            Self::Cast(error) => error.error.severity(),
            Self::Melee(error) => error.error.severity(),
            Self::Turn(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Move(error) => error.error.error_code(),
            Self::Cast(error) => error.error.error_code(),
            Self::Melee(error) => error.error.error_code(),
            Self::Turn(error) => error.error_code(),
        }
    }
}
