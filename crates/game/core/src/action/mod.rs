//! Player-level actions and the transition contract they share.
//!
//! Every state change a wizard or goblin can cause is an [`Action`]. Each
//! concrete action implements [`ActionTransition`]; the engine runs
//! `pre_validate` against the untouched state, then `apply`. A failed
//! `pre_validate` leaves the state exactly as it was.

mod cast;
mod end_turn;
mod melee;
mod movement;

pub use cast::{CastAction, CastOutcome, Impact, Resolution};
pub use end_turn::{EndTurnAction, TurnHandoff};
pub use melee::MeleeAction;
pub use movement::{MoveAction, MoveOutcome};

use crate::combat::HitReport;
use crate::env::GameEnv;
use crate::state::{GameState, PieceId};

/// Defines how a concrete action variant mutates game state.
pub trait ActionTransition {
    type Error;
    type Result;

    /// The piece performing the action; `None` for turn bookkeeping.
    fn actor(&self) -> Option<PieceId>;

    /// Validates preconditions using the state **before** mutation.
    fn pre_validate(&self, _state: &GameState, _env: &GameEnv<'_>) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies the action by mutating the game state directly.
    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Action {
    Move(MoveAction),
    Cast(CastAction),
    Melee(MeleeAction),
    EndTurn(EndTurnAction),
}

impl Action {
    pub fn actor(&self) -> Option<PieceId> {
        match self {
            Action::Move(action) => action.actor(),
            Action::Cast(action) => action.actor(),
            Action::Melee(action) => action.actor(),
            Action::EndTurn(action) => action.actor(),
        }
    }
}

impl From<MoveAction> for Action {
    fn from(action: MoveAction) -> Self {
        Action::Move(action)
    }
}

impl From<CastAction> for Action {
    fn from(action: CastAction) -> Self {
        Action::Cast(action)
    }
}

impl From<MeleeAction> for Action {
    fn from(action: MeleeAction) -> Self {
        Action::Melee(action)
    }
}

impl From<EndTurnAction> for Action {
    fn from(action: EndTurnAction) -> Self {
        Action::EndTurn(action)
    }
}

/// Action-specific result returned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Moved(MoveOutcome),
    Cast(CastOutcome),
    Melee(HitReport),
    TurnEnded(TurnHandoff),
}
