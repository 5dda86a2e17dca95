use std::convert::Infallible;

use crate::env::GameEnv;
use crate::state::{GameState, PieceId, PlayerId};

use super::ActionTransition;

/// Hands control to the other side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndTurnAction;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TurnHandoff {
    pub previous: PlayerId,
    pub next: PlayerId,
    pub turn_number: u32,
}

impl ActionTransition for EndTurnAction {
    type Error = Infallible;
    type Result = TurnHandoff;

    fn actor(&self) -> Option<PieceId> {
        None
    }

    fn apply(&self, state: &mut GameState, _env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let previous = state.turn.current_player;

        // ready the finished side's goblins for its next turn
        for id in state.goblins(previous).to_vec() {
            if let Some(goblin) = state
                .board
                .piece_mut(id)
                .and_then(|piece| piece.unit.as_goblin_mut())
            {
                goblin.set_acted(false);
            }
        }

        state.turn.current_player = previous.opponent();
        state.turn.turn_number += 1;

        Ok(TurnHandoff {
            previous,
            next: state.turn.current_player,
            turn_number: state.turn.turn_number,
        })
    }
}
