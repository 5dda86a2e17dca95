//! Action transition dispatch.

use crate::action::{Action, ActionResult, ActionTransition};
use crate::env::GameEnv;
use crate::state::GameState;

use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Runs `pre_validate` then `apply`, tagging failures with their phase.
#[inline]
fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    transition
        .apply(state, env)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))
}

pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    env: &GameEnv<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Move(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Moved)
            .map_err(ExecuteError::Move),
        Action::Cast(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Cast)
            .map_err(ExecuteError::Cast),
        Action::Melee(transition) => drive_transition(transition, state, env)
            .map(ActionResult::Melee)
            .map_err(ExecuteError::Melee),
        Action::EndTurn(transition) => match drive_transition(transition, state, env) {
            Ok(handoff) => Ok(ActionResult::TurnEnded(handoff)),
            Err(phase_error) => match phase_error.error {},
        },
    }
}
