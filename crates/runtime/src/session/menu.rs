//! Piece menus and examine cards.

use game_core::{Combatant, Piece, SpellCatalog, Unit};

use crate::api::{ExamineCard, MenuItem, MenuView};

/// Entries of a piece's root menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum MenuEntry {
    #[strum(serialize = "Cast Spell")]
    CastSpell,
    Move,
    Examine,
    #[strum(serialize = "Control Goblin")]
    ControlGoblin,
}

impl MenuEntry {
    /// Root entries offered for `unit`, in key order starting at 1.
    pub fn for_unit(unit: &Unit) -> &'static [MenuEntry] {
        match unit {
            Unit::Wizard(_) => &[
                MenuEntry::CastSpell,
                MenuEntry::Move,
                MenuEntry::Examine,
                MenuEntry::ControlGoblin,
            ],
            Unit::Goblin(_) => &[MenuEntry::Move, MenuEntry::Examine],
            Unit::IceWall(_) => &[],
        }
    }

    /// Entry bound to the 1-based `key`, if any.
    pub fn from_key(unit: &Unit, key: u8) -> Option<MenuEntry> {
        let index = usize::from(key).checked_sub(1)?;
        Self::for_unit(unit).get(index).copied()
    }
}

pub fn root_menu(piece: &Piece) -> MenuView {
    let items = MenuEntry::for_unit(&piece.unit)
        .iter()
        .zip(1u8..)
        .map(|(entry, key)| MenuItem {
            key,
            label: entry.to_string(),
            used: false,
        })
        .collect();

    MenuView {
        title: piece.unit.name().to_owned(),
        items,
    }
}

/// Catalog listing for a wizard; spells already cast are flagged.
pub fn spell_menu(piece: &Piece, catalog: &SpellCatalog) -> MenuView {
    let wizard = piece.unit.as_wizard();
    let items = catalog
        .iter()
        .map(|spell| MenuItem {
            key: spell.key,
            label: spell.name.clone(),
            used: wizard.is_some_and(|w| w.has_used_spell(&spell.name)),
        })
        .collect();

    MenuView {
        title: "Cast Spell".to_owned(),
        items,
    }
}

pub fn examine_card(piece: &Piece) -> Option<ExamineCard> {
    let combatant = piece.unit.as_combatant()?;
    let (bio, shield, used_spells) = match piece.unit.as_wizard() {
        Some(wizard) => (
            wizard.bio().to_vec(),
            wizard.shield(),
            wizard.used_spells().map(str::to_owned).collect(),
        ),
        None => (Vec::new(), 0, Vec::new()),
    };

    Some(ExamineCard {
        name: piece.unit.name().to_owned(),
        bio,
        hp: combatant.hp(),
        max_hp: combatant.max_hp(),
        shield,
        used_spells,
    })
}
