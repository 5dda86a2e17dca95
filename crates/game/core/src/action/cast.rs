use crate::board::BoardError;
use crate::combat::{self, HitReport};
use crate::env::{GameEnv, RollContext, compute_seed};
use crate::spell::{CastError, SpellDefinition, SpellEffect, SpellKind};
use crate::state::{GameState, PieceId, PlayerId, Position};
use crate::unit::{Goblin, IceWall, Unit, Wizard};

use super::ActionTransition;

/// A wizard casting a spell from the catalog.
///
/// Self-cast spells take no target. Every other spell needs a target cell
/// within range that is not the caster's own cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastAction {
    pub caster: PieceId,
    pub spell: String,
    pub target: Option<Position>,
}

impl CastAction {
    pub fn new(caster: PieceId, spell: impl Into<String>, target: Option<Position>) -> Self {
        Self {
            caster,
            spell: spell.into(),
            target,
        }
    }

    pub fn at(caster: PieceId, spell: impl Into<String>, target: Position) -> Self {
        Self::new(caster, spell, Some(target))
    }

    pub fn on_self(caster: PieceId, spell: impl Into<String>) -> Self {
        Self::new(caster, spell, None)
    }
}

/// What an offensive spell ended up hitting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Impact {
    /// A unit on the target cell took damage.
    Unit(HitReport),
    /// An Ice Wall absorbed the spell and was destroyed. `intercepted` is
    /// true when the wall stood between caster and target.
    Obstacle {
        wall: PieceId,
        at: Position,
        intercepted: bool,
    },
    /// The empty target cell became a destroyed tile.
    Tile { at: Position, newly_destroyed: bool },
}

impl Impact {
    /// Cell where the spell actually landed.
    pub fn position(&self) -> Position {
        match self {
            Impact::Unit(report) => report.position,
            Impact::Obstacle { at, .. } | Impact::Tile { at, .. } => *at,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resolution {
    Shielded { amount: u32 },
    Offensive { target: Position, impact: Impact },
    WallRaised { wall: PieceId, at: Position },
    GoblinSummoned { goblin: PieceId, at: Position },
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CastOutcome {
    pub caster: PieceId,
    pub owner: PlayerId,
    pub origin: Position,
    pub spell: String,
    pub effect: SpellEffect,
    pub resolution: Resolution,
}

impl CastAction {
    fn definition<'e>(&self, env: &GameEnv<'e>) -> Result<&'e SpellDefinition, CastError> {
        env.spells
            .by_name(&self.spell)
            .ok_or_else(|| CastError::UnknownSpell(self.spell.clone()))
    }

    fn wizard<'s>(&self, state: &'s GameState) -> Result<(&'s Wizard, Position), CastError> {
        let piece = state
            .board
            .piece(self.caster)
            .ok_or(CastError::CasterNotFound(self.caster))?;
        let wizard = piece
            .unit
            .as_wizard()
            .ok_or(CastError::NotAWizard(self.caster))?;
        Ok((wizard, piece.position))
    }

    fn wizard_mut<'s>(&self, state: &'s mut GameState) -> Result<&'s mut Wizard, CastError> {
        state
            .board
            .piece_mut(self.caster)
            .ok_or(CastError::CasterNotFound(self.caster))?
            .unit
            .as_wizard_mut()
            .ok_or(CastError::NotAWizard(self.caster))
    }

    fn resolve(
        &self,
        spell: &SpellDefinition,
        origin: Position,
        owner: PlayerId,
        state: &mut GameState,
        env: &GameEnv<'_>,
    ) -> Result<Resolution, CastError> {
        match spell.kind {
            SpellKind::SelfCast { shield } => {
                self.wizard_mut(state)?.add_shield(shield);
                Ok(Resolution::Shielded { amount: shield })
            }
            SpellKind::Offensive { damage } => {
                let target = self.required_target()?;
                let impact = if let Some(wall) = state.board.obstacle_in_path(origin, target) {
                    let (wall, at) = (wall.id, wall.position);
                    state.board.remove_piece(wall);
                    Impact::Obstacle {
                        wall,
                        at,
                        intercepted: true,
                    }
                } else {
                    match state.board.piece_at(target).map(|p| (p.id, p.unit.is_obstacle())) {
                        Some((wall, true)) => {
                            state.board.remove_piece(wall);
                            Impact::Obstacle {
                                wall,
                                at: target,
                                intercepted: false,
                            }
                        }
                        Some((victim, false)) => {
                            let seed = compute_seed(
                                state.game_seed,
                                state.turn.nonce,
                                self.caster.0,
                                RollContext::Spell,
                            );
                            let roll = env.rng.roll(seed, damage);
                            Impact::Unit(combat::apply_hit(state, victim, roll)?)
                        }
                        None => Impact::Tile {
                            at: target,
                            newly_destroyed: state.board.destroy_tile(target),
                        },
                    }
                };
                Ok(Resolution::Offensive { target, impact })
            }
            SpellKind::Utility => {
                let at = self.required_target()?;
                let wall = state
                    .board
                    .add_piece(Unit::IceWall(IceWall), at, None)
                    .map_err(placement_error)?;
                Ok(Resolution::WallRaised { wall, at })
            }
            SpellKind::Creature => {
                let at = self.required_target()?;
                let goblin = Goblin::new(env.config.goblin_hp, env.config.goblin_damage);
                let goblin = state
                    .board
                    .add_piece(Unit::Goblin(goblin), at, Some(owner))
                    .map_err(placement_error)?;
                state.register_goblin(owner, goblin);
                Ok(Resolution::GoblinSummoned { goblin, at })
            }
        }
    }

    fn required_target(&self) -> Result<Position, CastError> {
        self.target
            .ok_or_else(|| CastError::TargetRequired(self.spell.clone()))
    }
}

fn placement_error(error: BoardError) -> CastError {
    match error {
        BoardError::OutOfBounds(at) => CastError::OutOfBounds(at),
        BoardError::Occupied(at) => CastError::Occupied(at),
        BoardError::DestroyedTile(at) => CastError::DestroyedTile(at),
    }
}

impl ActionTransition for CastAction {
    type Error = CastError;
    type Result = CastOutcome;

    fn actor(&self) -> Option<PieceId> {
        Some(self.caster)
    }

    fn pre_validate(&self, state: &GameState, env: &GameEnv<'_>) -> Result<(), Self::Error> {
        let (wizard, origin) = self.wizard(state)?;
        let spell = self.definition(env)?;

        if wizard.has_used_spell(&spell.name) {
            return Err(CastError::AlreadyUsed(spell.name.clone()));
        }
        if !spell.kind.needs_target() {
            return Ok(());
        }

        let target = self.required_target()?;
        if !state.board.is_valid_position(target) {
            return Err(CastError::OutOfBounds(target));
        }
        let distance = origin.chebyshev(target);
        if distance == 0 {
            return Err(CastError::SelfTarget);
        }
        if distance > spell.range {
            return Err(CastError::OutOfRange {
                target,
                distance,
                range: spell.range,
            });
        }
        Ok(())
    }

    fn apply(&self, state: &mut GameState, env: &GameEnv<'_>) -> Result<Self::Result, Self::Error> {
        let spell = self.definition(env)?;
        let origin = self.wizard(state)?.1;
        let owner = state
            .board
            .piece(self.caster)
            .and_then(|piece| piece.owner)
            .ok_or(CastError::CasterNotFound(self.caster))?;

        if !self.wizard_mut(state)?.mark_spell_used(&spell.name) {
            return Err(CastError::AlreadyUsed(spell.name.clone()));
        }

        match self.resolve(spell, origin, owner, state, env) {
            Ok(resolution) => Ok(CastOutcome {
                caster: self.caster,
                owner,
                origin,
                spell: spell.name.clone(),
                effect: spell.effect,
                resolution,
            }),
            Err(error) => {
                // a failed cast leaves the spell available for a retry
                if let Ok(wizard) = self.wizard_mut(state) {
                    wizard.unmark_spell(&spell.name);
                }
                Err(error)
            }
        }
    }
}
