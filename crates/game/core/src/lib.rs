//! Deterministic duel rules shared by the runtime and tooling.
//!
//! `game-core` owns the board, units, spell catalog and turn bookkeeping.
//! All state mutation flows through [`engine::GameEngine`]; the crate does no
//! I/O and never logs, reporting every rejection through typed errors.
pub mod action;
pub mod board;
pub mod combat;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod spell;
pub mod state;
pub mod unit;

pub use action::{
    Action, ActionResult, ActionTransition, CastAction, CastOutcome, EndTurnAction, Impact,
    MeleeAction, MoveAction, MoveOutcome, Resolution, TurnHandoff,
};
pub use board::{Board, BoardError, MoveError, Piece, PieceCategory};
pub use combat::{Casualty, CombatError, HitReport};
pub use config::{DamageRange, GameConfig, WizardProfile};
pub use engine::{ExecuteError, GameEngine, TransitionPhase, TransitionPhaseError, TurnError};
pub use env::{FixedRng, GameEnv, PcgRng, RngOracle, compute_seed};
pub use error::{ErrorSeverity, GameError};
pub use spell::{CastError, CatalogError, SpellCatalog, SpellDefinition, SpellEffect, SpellKind};
pub use state::{
    Axis, Direction, GameResult, GameState, PieceId, PlayerId, Position, TurnState,
};
pub use unit::{Combatant, DamageTaken, Goblin, IceWall, Unit, UnitKind, Wizard};
