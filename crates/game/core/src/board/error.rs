use crate::error::{ErrorSeverity, GameError};
use crate::state::{PieceId, Position};

/// Placement failures.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("position {0} is outside the board")]
    OutOfBounds(Position),

    #[error("position {0} is already occupied")]
    Occupied(Position),

    #[error("position {0} is a destroyed tile")]
    DestroyedTile(Position),
}

impl GameError for BoardError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::OutOfBounds(_) => "BOARD_OUT_OF_BOUNDS",
            Self::Occupied(_) => "BOARD_OCCUPIED",
            Self::DestroyedTile(_) => "BOARD_DESTROYED_TILE",
        }
    }
}

/// Errors that can occur when moving a piece.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("piece {0} is not on the board")]
    PieceNotFound(PieceId),

    #[error("piece {0} cannot move")]
    Immovable(PieceId),

    #[error("destination {0} is outside the board")]
    OutOfBounds(Position),

    #[error("destination {0} is a destroyed tile")]
    DestroyedTile(Position),

    #[error("destination {0} is occupied")]
    Occupied(Position),

    #[error("a move must be exactly one step, got ({dx}, {dy})")]
    InvalidStep { dx: i32, dy: i32 },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::OutOfBounds(_) | Self::DestroyedTile(_) | Self::Occupied(_) => {
                ErrorSeverity::Recoverable
            }
            Self::Immovable(_) | Self::InvalidStep { .. } => ErrorSeverity::Validation,
            Self::PieceNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::PieceNotFound(_) => "MOVE_PIECE_NOT_FOUND",
            Self::Immovable(_) => "MOVE_IMMOVABLE",
            Self::OutOfBounds(_) => "MOVE_OUT_OF_BOUNDS",
            Self::DestroyedTile(_) => "MOVE_DESTROYED_TILE",
            Self::Occupied(_) => "MOVE_OCCUPIED",
            Self::InvalidStep { .. } => "MOVE_INVALID_STEP",
        }
    }
}
