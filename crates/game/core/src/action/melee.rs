use crate::combat::{self, CombatError, HitReport};
use crate::env::{GameEnv, RollContext, compute_seed};
use crate::state::{GameState, PieceId};

use super::ActionTransition;

/// Melee strike against an adjacent enemy, usually right after a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MeleeAction {
    pub attacker: PieceId,
    pub defender: PieceId,
}

impl MeleeAction {
    pub fn new(attacker: PieceId, defender: PieceId) -> Self {
        Self { attacker, defender }
    }
}

impl ActionTransition for MeleeAction {
    type Error = CombatError;
    type Result = HitReport;

    fn actor(&self) -> Option<PieceId> {
        Some(self.attacker)
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        combat::melee_damage_range(state, env.config, self.attacker, self.defender).map(|_| ())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let range = combat::melee_damage_range(state, env.config, self.attacker, self.defender)?;
        let seed = compute_seed(
            state.game_seed,
            state.turn.nonce,
            self.attacker.0,
            RollContext::Melee,
        );
        let damage = env.rng.roll(seed, range);
        combat::apply_hit(state, self.defender, damage)
    }
}
