use crate::error::{ErrorSeverity, GameError};
use crate::state::{PieceId, Position};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("attacker {0} is not on the board")]
    AttackerNotFound(PieceId),

    #[error("target {0} is not on the board")]
    TargetNotFound(PieceId),

    #[error("piece {0} cannot take part in combat")]
    NotCombatant(PieceId),

    #[error("pieces {attacker} and {defender} are not enemies")]
    NotEnemies { attacker: PieceId, defender: PieceId },

    #[error("{attacker} is not adjacent to {defender}")]
    NotAdjacent { attacker: Position, defender: Position },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotEnemies { .. } | Self::NotAdjacent { .. } => ErrorSeverity::Recoverable,
            Self::NotCombatant(_) => ErrorSeverity::Validation,
            Self::AttackerNotFound(_) | Self::TargetNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::AttackerNotFound(_) => "COMBAT_ATTACKER_NOT_FOUND",
            Self::TargetNotFound(_) => "COMBAT_TARGET_NOT_FOUND",
            Self::NotCombatant(_) => "COMBAT_NOT_COMBATANT",
            Self::NotEnemies { .. } => "COMBAT_NOT_ENEMIES",
            Self::NotAdjacent { .. } => "COMBAT_NOT_ADJACENT",
        }
    }
}
