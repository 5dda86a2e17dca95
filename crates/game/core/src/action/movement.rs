use crate::board::MoveError;
use crate::env::GameEnv;
use crate::state::{Direction, GameState, PieceId, Position};

use super::ActionTransition;

/// One step in any of the eight directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub piece: PieceId,
    pub direction: Direction,
}

impl MoveAction {
    pub fn new(piece: PieceId, direction: Direction) -> Self {
        Self { piece, direction }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveOutcome {
    pub piece: PieceId,
    pub from: Position,
    pub to: Position,
    /// First enemy next to the destination, offered for a melee attack.
    pub adjacent_enemy: Option<PieceId>,
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn actor(&self) -> Option<PieceId> {
        Some(self.piece)
    }

    fn pre_validate(&self, state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let piece = state
            .board
            .piece(self.piece)
            .ok_or(MoveError::PieceNotFound(self.piece))?;
        if piece.unit.is_obstacle() {
            return Err(MoveError::Immovable(self.piece));
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let from = state
            .board
            .piece(self.piece)
            .map(|piece| piece.position)
            .ok_or(MoveError::PieceNotFound(self.piece))?;

        let (dx, dy) = self.direction.delta();
        let to = state.board.move_piece(self.piece, dx, dy)?;

        if let Some(goblin) = state
            .board
            .piece_mut(self.piece)
            .and_then(|piece| piece.unit.as_goblin_mut())
        {
            goblin.set_acted(true);
        }

        let adjacent_enemy = state.board.adjacent_enemy(self.piece).map(|piece| piece.id);

        Ok(MoveOutcome {
            piece: self.piece,
            from,
            to,
            adjacent_enemy,
        })
    }
}
