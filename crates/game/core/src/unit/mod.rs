//! Board occupants: wizards, goblins and ice walls.
//!
//! [`Unit`] is a closed set of variants. Anything that can be hurt exposes the
//! [`Combatant`] capability, so damage and melee dispatch is checked
//! exhaustively instead of probing for methods at runtime.

mod goblin;
mod wizard;

pub use goblin::Goblin;
pub use wizard::Wizard;

use crate::config::DamageRange;
use crate::state::Position;

/// Result of applying damage to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageTaken {
    /// Points soaked by the shield.
    pub absorbed: u32,
    /// Points removed from HP.
    pub hp_lost: u32,
    /// HP after the hit.
    pub remaining_hp: u32,
    /// Shield after the hit.
    pub remaining_shield: u32,
    pub is_dead: bool,
}

/// Shared capability of every unit that has hit points.
pub trait Combatant {
    fn hp(&self) -> u32;

    fn max_hp(&self) -> u32;

    /// Applies `amount` damage. HP never drops below zero.
    fn take_damage(&mut self, amount: u32) -> DamageTaken;

    /// Melee roll range; `None` means the attacker uses the configured default.
    fn melee_damage(&self) -> Option<DamageRange> {
        None
    }

    /// Hook invoked by the board after a successful move.
    fn on_move(&mut self, _to: Position) {}

    fn is_alive(&self) -> bool {
        self.hp() > 0
    }
}

/// Immovable obstacle created by the Ice Wall spell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IceWall;

/// Discriminant of [`Unit`], handy for logs and events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnitKind {
    Wizard,
    Goblin,
    IceWall,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Unit {
    Wizard(Wizard),
    Goblin(Goblin),
    IceWall(IceWall),
}

impl Unit {
    pub fn kind(&self) -> UnitKind {
        match self {
            Unit::Wizard(_) => UnitKind::Wizard,
            Unit::Goblin(_) => UnitKind::Goblin,
            Unit::IceWall(_) => UnitKind::IceWall,
        }
    }

    pub fn is_obstacle(&self) -> bool {
        matches!(self, Unit::IceWall(_))
    }

    pub fn as_combatant(&self) -> Option<&dyn Combatant> {
        match self {
            Unit::Wizard(wizard) => Some(wizard),
            Unit::Goblin(goblin) => Some(goblin),
            Unit::IceWall(_) => None,
        }
    }

    pub fn as_combatant_mut(&mut self) -> Option<&mut dyn Combatant> {
        match self {
            Unit::Wizard(wizard) => Some(wizard),
            Unit::Goblin(goblin) => Some(goblin),
            Unit::IceWall(_) => None,
        }
    }

    pub fn as_wizard(&self) -> Option<&Wizard> {
        match self {
            Unit::Wizard(wizard) => Some(wizard),
            _ => None,
        }
    }

    pub fn as_wizard_mut(&mut self) -> Option<&mut Wizard> {
        match self {
            Unit::Wizard(wizard) => Some(wizard),
            _ => None,
        }
    }

    pub fn as_goblin(&self) -> Option<&Goblin> {
        match self {
            Unit::Goblin(goblin) => Some(goblin),
            _ => None,
        }
    }

    pub fn as_goblin_mut(&mut self) -> Option<&mut Goblin> {
        match self {
            Unit::Goblin(goblin) => Some(goblin),
            _ => None,
        }
    }

    /// Display name used in examine cards and logs.
    pub fn name(&self) -> &str {
        match self {
            Unit::Wizard(wizard) => wizard.name(),
            Unit::Goblin(_) => "Goblin",
            Unit::IceWall(_) => "Ice Wall",
        }
    }

    pub(crate) fn notify_moved(&mut self, to: Position) {
        if let Some(combatant) = self.as_combatant_mut() {
            combatant.on_move(to);
        }
    }
}
