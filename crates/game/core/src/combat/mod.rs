//! Damage application and melee resolution.
//!
//! Every damage source (offensive spells and melee) funnels through
//! [`apply_hit`], which handles death immediately: goblins leave the board
//! and their roster, a dead wizard ends the duel in the opponent's favour.

mod error;

pub use error::CombatError;

use crate::config::{DamageRange, GameConfig};
use crate::state::{GameState, PieceId, PlayerId, Position};
use crate::unit::{DamageTaken, UnitKind};

/// A unit removed because its HP reached zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Casualty {
    Goblin { id: PieceId, owner: PlayerId },
    /// The duel is over; `owner` lost.
    Wizard { id: PieceId, owner: PlayerId },
}

/// Everything observable about one application of damage.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HitReport {
    pub target: PieceId,
    pub target_kind: UnitKind,
    pub position: Position,
    /// Rolled damage before shield absorption.
    pub damage: u32,
    pub taken: DamageTaken,
    pub casualty: Option<Casualty>,
}

/// Applies `damage` to the unit `target` and resolves its death.
pub fn apply_hit(
    state: &mut GameState,
    target: PieceId,
    damage: u32,
) -> Result<HitReport, CombatError> {
    let piece = state
        .board
        .piece_mut(target)
        .ok_or(CombatError::TargetNotFound(target))?;
    let position = piece.position;
    let owner = piece.owner;
    let target_kind = piece.unit.kind();

    let combatant = piece
        .unit
        .as_combatant_mut()
        .ok_or(CombatError::NotCombatant(target))?;
    let taken = combatant.take_damage(damage);

    let casualty = if taken.is_dead {
        let owner = owner.ok_or(CombatError::NotCombatant(target))?;
        state.board.remove_piece(target);
        match target_kind {
            UnitKind::Wizard => {
                state.turn.winner = Some(owner.opponent());
                Some(Casualty::Wizard { id: target, owner })
            }
            _ => {
                state.forget_goblin(target);
                Some(Casualty::Goblin { id: target, owner })
            }
        }
    } else {
        None
    };

    Ok(HitReport {
        target,
        target_kind,
        position,
        damage,
        taken,
        casualty,
    })
}

/// Validates a melee exchange and returns the attacker's damage range.
///
/// Attackers without their own range use `config.default_melee_damage`.
pub fn melee_damage_range(
    state: &GameState,
    config: &GameConfig,
    attacker: PieceId,
    defender: PieceId,
) -> Result<DamageRange, CombatError> {
    let attacking = state
        .board
        .piece(attacker)
        .ok_or(CombatError::AttackerNotFound(attacker))?;
    let defending = state
        .board
        .piece(defender)
        .ok_or(CombatError::TargetNotFound(defender))?;

    if defending.unit.as_combatant().is_none() {
        return Err(CombatError::NotCombatant(defender));
    }
    if !attacking.is_enemy_of(defending) {
        return Err(CombatError::NotEnemies { attacker, defender });
    }
    if !attacking.position.is_adjacent(defending.position) {
        return Err(CombatError::NotAdjacent {
            attacker: attacking.position,
            defender: defending.position,
        });
    }

    let combatant = attacking
        .unit
        .as_combatant()
        .ok_or(CombatError::NotCombatant(attacker))?;
    Ok(combatant
        .melee_damage()
        .unwrap_or(config.default_melee_damage))
}
