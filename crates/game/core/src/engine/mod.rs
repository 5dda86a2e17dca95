//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. Every
//! accepted action bumps the state nonce, which feeds the damage roll seeds.

mod errors;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError, TurnError};

use crate::action::{Action, ActionResult, ActionTransition, EndTurnAction, TurnHandoff};
use crate::env::GameEnv;
use crate::state::GameState;

pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Validates turn ownership, then runs the action's transition.
    pub fn execute(
        &mut self,
        env: GameEnv<'_>,
        action: &Action,
    ) -> Result<ActionResult, ExecuteError> {
        self.validate_actor(action)?;

        let result = transition::execute_transition(action, self.state, &env)?;
        self.state.turn.nonce += 1;
        Ok(result)
    }

    /// Executes [`EndTurnAction`] and returns the handoff directly.
    pub fn end_turn(&mut self, env: GameEnv<'_>) -> Result<TurnHandoff, ExecuteError> {
        let action = EndTurnAction;
        self.validate_actor(&Action::EndTurn(action))?;

        let handoff = match action.apply(self.state, &env) {
            Ok(handoff) => handoff,
            Err(never) => match never {},
        };
        self.state.turn.nonce += 1;
        Ok(handoff)
    }

    fn validate_actor(&self, action: &Action) -> Result<(), TurnError> {
        if self.state.is_over() {
            return Err(TurnError::GameOver);
        }

        let Some(actor) = action.actor() else {
            return Ok(());
        };
        let piece = self
            .state
            .board
            .piece(actor)
            .ok_or(TurnError::PieceNotFound(actor))?;

        let current = self.state.turn.current_player;
        if !piece.is_owned_by(current) {
            return Err(TurnError::NotYourPiece {
                piece: actor,
                current,
            });
        }

        if let Action::Move(_) = action
            && piece.unit.as_goblin().is_some_and(|goblin| goblin.has_acted())
        {
            return Err(TurnError::AlreadyActed(actor));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{CastAction, Impact, MeleeAction, MoveAction, Resolution};
    use crate::board::MoveError;
    use crate::combat::Casualty;
    use crate::config::GameConfig;
    use crate::env::{FixedRng, PcgRng, RngOracle};
    use crate::error::{ErrorSeverity, GameError};
    use crate::spell::{CastError, SpellCatalog};
    use crate::state::{Direction, PieceId, PlayerId, Position};
    use crate::unit::{Combatant, IceWall, Unit};

    struct Fixture {
        config: GameConfig,
        spells: SpellCatalog,
        state: GameState,
    }

    impl Fixture {
        fn new() -> Self {
            let config = GameConfig::default();
            let state = GameState::new(&config, 42).unwrap();
            Self {
                config,
                spells: SpellCatalog::default(),
                state,
            }
        }

        /// Places both wizards at the given cells.
        fn with_wizards(one: Position, two: Position) -> Self {
            let config = GameConfig {
                player_one_start: Some(one),
                player_two_start: Some(two),
                ..GameConfig::default()
            };
            let state = GameState::new(&config, 42).unwrap();
            Self {
                config,
                spells: SpellCatalog::default(),
                state,
            }
        }

        fn run(
            &mut self,
            rng: &dyn RngOracle,
            action: Action,
        ) -> Result<ActionResult, ExecuteError> {
            let env = GameEnv::new(&self.config, &self.spells, rng);
            GameEngine::new(&mut self.state).execute(env, &action)
        }

        fn end_turn(&mut self) -> TurnHandoff {
            let env = GameEnv::new(&self.config, &self.spells, &PcgRng);
            GameEngine::new(&mut self.state).end_turn(env).unwrap()
        }

        fn wizard(&self, player: PlayerId) -> PieceId {
            self.state.wizard(player).unwrap().id
        }

        fn hp(&self, player: PlayerId) -> u32 {
            self.state
                .wizard(player)
                .map(|piece| piece.unit.as_wizard().unwrap().hp())
                .unwrap_or(0)
        }

        fn cast_error(result: Result<ActionResult, ExecuteError>) -> CastError {
            result.unwrap_err().as_cast().cloned().unwrap()
        }
    }

    fn cast(caster: PieceId, spell: &str, target: Position) -> Action {
        CastAction::at(caster, spell, target).into()
    }

    #[test]
    fn end_turn_flips_player_and_resets_goblins() {
        let mut fx = Fixture::new();
        let wizard = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(wizard, "Summon Goblin", Position::new(2, 2)))
            .unwrap();
        let goblin = fx.state.goblins(PlayerId::One)[0];
        fx.state
            .board
            .piece_mut(goblin)
            .unwrap()
            .unit
            .as_goblin_mut()
            .unwrap()
            .set_acted(true);

        let handoff = fx.end_turn();
        assert_eq!(handoff.previous, PlayerId::One);
        assert_eq!(handoff.next, PlayerId::Two);
        assert_eq!(fx.state.turn.current_player, PlayerId::Two);
        assert_eq!(fx.state.turn.turn_number, 2);
        let piece = fx.state.board.piece(goblin).unwrap();
        assert!(!piece.unit.as_goblin().unwrap().has_acted());
    }

    #[test]
    fn magic_bolt_damages_within_range() {
        let mut fx = Fixture::with_wizards(Position::new(3, 3), Position::new(6, 3));
        let caster = fx.wizard(PlayerId::One);

        let result = fx
            .run(&PcgRng, cast(caster, "Magic Bolt", Position::new(6, 3)))
            .unwrap();
        let ActionResult::Cast(outcome) = result else {
            panic!("expected cast outcome");
        };
        let Resolution::Offensive {
            impact: Impact::Unit(report),
            ..
        } = outcome.resolution
        else {
            panic!("expected a unit hit, got {:?}", outcome.resolution);
        };
        assert!((1..=5).contains(&report.damage));
        assert_eq!(fx.hp(PlayerId::Two), 8 - report.damage);
        assert!(
            fx.state
                .board
                .piece(caster)
                .unwrap()
                .unit
                .as_wizard()
                .unwrap()
                .has_used_spell("Magic Bolt")
        );
        assert_eq!(fx.state.turn.nonce, 1);
    }

    #[test]
    fn lethal_bolt_ends_the_game() {
        let mut fx = Fixture::with_wizards(Position::new(3, 3), Position::new(4, 4));
        let caster = fx.wizard(PlayerId::One);
        let target = fx.wizard(PlayerId::Two);
        fx.state
            .board
            .piece_mut(target)
            .unwrap()
            .unit
            .as_wizard_mut()
            .unwrap()
            .take_damage(6);

        // FixedRng(4) rolls the maximum of 1..=5
        let result = fx
            .run(&FixedRng(4), cast(caster, "Magic Bolt", Position::new(4, 4)))
            .unwrap();
        let ActionResult::Cast(outcome) = result else {
            panic!("expected cast outcome");
        };
        assert!(matches!(
            outcome.resolution,
            Resolution::Offensive {
                impact: Impact::Unit(report),
                ..
            } if report.casualty == Some(Casualty::Wizard { id: target, owner: PlayerId::Two })
        ));
        assert_eq!(fx.state.turn.winner, Some(PlayerId::One));
        assert!(fx.state.wizard(PlayerId::Two).is_none());

        let err = fx
            .run(&PcgRng, MoveAction::new(caster, Direction::East).into())
            .unwrap_err();
        assert_eq!(err, ExecuteError::Turn(TurnError::GameOver));
    }

    #[test]
    fn ice_wall_redirects_magic_bolt() {
        let mut fx = Fixture::with_wizards(Position::new(5, 1), Position::new(5, 9));
        let one = fx.wizard(PlayerId::One);
        let wall = fx
            .state
            .board
            .add_piece(Unit::IceWall(IceWall), Position::new(5, 5), None)
            .unwrap();

        // Magic Bolt only reaches 5 cells, so move the target into range first.
        let two = fx.wizard(PlayerId::Two);
        fx.state.board.piece_mut(two).unwrap().position = Position::new(5, 6);

        let result = fx
            .run(&PcgRng, cast(one, "Magic Bolt", Position::new(5, 6)))
            .unwrap();
        let ActionResult::Cast(outcome) = result else {
            panic!("expected cast outcome");
        };
        assert_eq!(
            outcome.resolution,
            Resolution::Offensive {
                target: Position::new(5, 6),
                impact: Impact::Obstacle {
                    wall,
                    at: Position::new(5, 5),
                    intercepted: true,
                },
            }
        );
        assert!(fx.state.board.piece(wall).is_none());
        assert_eq!(fx.hp(PlayerId::Two), 8);
    }

    #[test]
    fn ice_wall_redirects_long_range_arrow() {
        let mut fx = Fixture::with_wizards(Position::new(5, 1), Position::new(5, 9));
        let one = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(one, "Ice Wall", Position::new(5, 5)))
            .unwrap();
        fx.end_turn();
        fx.end_turn();

        let result = fx
            .run(&PcgRng, cast(one, "Mighty Arrow", Position::new(5, 9)))
            .unwrap();
        let ActionResult::Cast(outcome) = result else {
            panic!("expected cast outcome");
        };
        assert!(matches!(
            outcome.resolution,
            Resolution::Offensive {
                impact: Impact::Obstacle { at, intercepted: true, .. },
                ..
            } if at == Position::new(5, 5)
        ));
        assert_eq!(fx.hp(PlayerId::Two), 8);
    }

    #[test]
    fn bolt_on_empty_cell_destroys_tile() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(one, "Magic Bolt", Position::new(3, 3)))
            .unwrap();
        assert!(fx.state.board.is_tile_destroyed(Position::new(3, 3)));
    }

    #[test]
    fn spell_can_only_be_cast_once() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(one, "Magic Bolt", Position::new(3, 3)))
            .unwrap();
        fx.end_turn();
        fx.end_turn();

        let before = fx.state.board.clone();
        let err = Fixture::cast_error(fx.run(&PcgRng, cast(one, "Magic Bolt", Position::new(2, 3))));
        assert_eq!(err, CastError::AlreadyUsed("Magic Bolt".into()));
        assert_eq!(err.severity(), ErrorSeverity::Recoverable);
        assert_eq!(fx.state.board, before);
    }

    #[test]
    fn targeting_rejects_self_and_out_of_range() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);

        assert_eq!(
            Fixture::cast_error(fx.run(&PcgRng, cast(one, "Lightning", Position::new(1, 1)))),
            CastError::SelfTarget
        );
        assert_eq!(
            Fixture::cast_error(fx.run(&PcgRng, cast(one, "Lightning", Position::new(5, 1)))),
            CastError::OutOfRange {
                target: Position::new(5, 1),
                distance: 4,
                range: 3
            }
        );
        assert!(
            !fx.state
                .board
                .piece(one)
                .unwrap()
                .unit
                .as_wizard()
                .unwrap()
                .has_used_spell("Lightning")
        );
        assert_eq!(fx.state.turn.nonce, 0);
    }

    #[test]
    fn blocked_ice_wall_keeps_spell_available() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.state.board.destroy_tile(Position::new(2, 2));
        let wall_cell = Position::new(3, 1);
        fx.state
            .board
            .add_piece(Unit::IceWall(IceWall), wall_cell, None)
            .unwrap();

        let err = Fixture::cast_error(fx.run(&PcgRng, cast(one, "Ice Wall", wall_cell)));
        assert_eq!(err, CastError::Occupied(wall_cell));
        let err = Fixture::cast_error(fx.run(&PcgRng, cast(one, "Ice Wall", Position::new(2, 2))));
        assert_eq!(err, CastError::DestroyedTile(Position::new(2, 2)));

        let wizard = fx.state.board.piece(one).unwrap().unit.as_wizard().unwrap();
        assert!(!wizard.has_used_spell("Ice Wall"));

        fx.run(&PcgRng, cast(one, "Ice Wall", Position::new(1, 3)))
            .unwrap();
        let wizard = fx.state.board.piece(one).unwrap().unit.as_wizard().unwrap();
        assert!(wizard.has_used_spell("Ice Wall"));
    }

    #[test]
    fn shield_resolves_without_target() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        let result = fx
            .run(&PcgRng, CastAction::on_self(one, "Shield").into())
            .unwrap();
        let ActionResult::Cast(outcome) = result else {
            panic!("expected cast outcome");
        };
        assert_eq!(outcome.resolution, Resolution::Shielded { amount: 3 });
        let wizard = fx.state.board.piece(one).unwrap().unit.as_wizard().unwrap();
        assert_eq!(wizard.shield(), 3);
    }

    #[test]
    fn summon_registers_goblin_for_owner() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(one, "Summon Goblin", Position::new(3, 2)))
            .unwrap();

        let goblins = fx.state.goblins(PlayerId::One);
        assert_eq!(goblins.len(), 1);
        let piece = fx.state.board.piece(goblins[0]).unwrap();
        assert_eq!(piece.owner, Some(PlayerId::One));
        assert_eq!(piece.unit.as_goblin().unwrap().hp(), 4);
        assert_eq!(fx.state.ready_goblin(PlayerId::One).unwrap().id, goblins[0]);
    }

    #[test]
    fn opponent_pieces_are_rejected() {
        let mut fx = Fixture::new();
        let two = fx.wizard(PlayerId::Two);
        let err = fx
            .run(&PcgRng, MoveAction::new(two, Direction::West).into())
            .unwrap_err();
        assert_eq!(
            err,
            ExecuteError::Turn(TurnError::NotYourPiece {
                piece: two,
                current: PlayerId::One
            })
        );
    }

    #[test]
    fn goblin_cannot_move_twice_in_a_turn() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.run(&PcgRng, cast(one, "Summon Goblin", Position::new(3, 3)))
            .unwrap();
        let goblin = fx.state.goblins(PlayerId::One)[0];

        fx.run(&PcgRng, MoveAction::new(goblin, Direction::East).into())
            .unwrap();
        assert!(fx.state.ready_goblin(PlayerId::One).is_none());
        let err = fx
            .run(&PcgRng, MoveAction::new(goblin, Direction::East).into())
            .unwrap_err();
        assert_eq!(err, ExecuteError::Turn(TurnError::AlreadyActed(goblin)));
    }

    #[test]
    fn move_reports_adjacent_enemy_and_melee_hits() {
        let mut fx = Fixture::with_wizards(Position::new(3, 3), Position::new(5, 3));
        let one = fx.wizard(PlayerId::One);
        let two = fx.wizard(PlayerId::Two);

        let result = fx
            .run(&PcgRng, MoveAction::new(one, Direction::East).into())
            .unwrap();
        let ActionResult::Moved(outcome) = result else {
            panic!("expected move outcome");
        };
        assert_eq!(outcome.to, Position::new(4, 3));
        assert_eq!(outcome.adjacent_enemy, Some(two));

        let result = fx
            .run(&FixedRng(0), MeleeAction::new(one, two).into())
            .unwrap();
        let ActionResult::Melee(report) = result else {
            panic!("expected melee outcome");
        };
        assert_eq!(report.damage, 1);
        assert_eq!(fx.hp(PlayerId::Two), 7);
    }

    #[test]
    fn move_into_destroyed_tile_is_rejected() {
        let mut fx = Fixture::new();
        let one = fx.wizard(PlayerId::One);
        fx.state.board.destroy_tile(Position::new(2, 1));
        let err = fx
            .run(&PcgRng, MoveAction::new(one, Direction::East).into())
            .unwrap_err();
        assert_eq!(err.as_move(), Some(&MoveError::DestroyedTile(Position::new(2, 1))));
        assert_eq!(err.phase(), Some(TransitionPhase::Apply));
    }

    #[test]
    fn same_seed_replays_identically() {
        let play = || {
            let mut fx = Fixture::with_wizards(Position::new(3, 3), Position::new(5, 5));
            let one = fx.wizard(PlayerId::One);
            fx.run(&PcgRng, cast(one, "Lightning", Position::new(5, 5)))
                .unwrap();
            fx.hp(PlayerId::Two)
        };
        assert_eq!(play(), play());
    }
}
