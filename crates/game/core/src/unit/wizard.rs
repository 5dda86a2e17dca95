use std::collections::BTreeSet;

use super::{Combatant, DamageTaken};
use crate::spell::{SpellCatalog, SpellDefinition};
use crate::state::Position;

/// Spell-casting leader of a side. Losing it loses the game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Wizard {
    name: String,
    bio: Vec<String>,
    hp: u32,
    max_hp: u32,
    shield: u32,
    used_spells: BTreeSet<String>,
    /// Cell the shield/HP indicators are drawn on.
    anchor: Position,
}

impl Wizard {
    pub fn new(name: impl Into<String>, hp: u32) -> Self {
        Self {
            name: name.into(),
            bio: Vec::new(),
            hp,
            max_hp: hp,
            shield: 0,
            used_spells: BTreeSet::new(),
            anchor: Position::default(),
        }
    }

    pub fn with_bio<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bio = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bio(&self) -> &[String] {
        &self.bio
    }

    pub fn shield(&self) -> u32 {
        self.shield
    }

    pub fn anchor(&self) -> Position {
        self.anchor
    }

    /// Sets the shield to exactly `amount`; recasting overwrites.
    pub fn add_shield(&mut self, amount: u32) {
        self.shield = amount;
    }

    pub fn has_used_spell(&self, name: &str) -> bool {
        self.used_spells.contains(name)
    }

    /// Marks a spell as cast. Returns false if it was already marked.
    pub fn mark_spell_used(&mut self, name: &str) -> bool {
        self.used_spells.insert(name.to_owned())
    }

    /// Reverts a mark left by a failed cast.
    pub fn unmark_spell(&mut self, name: &str) -> bool {
        self.used_spells.remove(name)
    }

    pub fn used_spells(&self) -> impl Iterator<Item = &str> {
        self.used_spells.iter().map(String::as_str)
    }

    /// Catalog entries this wizard may still cast.
    pub fn available_spells<'c>(&self, catalog: &'c SpellCatalog) -> Vec<&'c SpellDefinition> {
        catalog
            .iter()
            .filter(|spell| !self.has_used_spell(&spell.name))
            .collect()
    }

    pub(crate) fn set_anchor(&mut self, position: Position) {
        self.anchor = position;
    }
}

impl Combatant for Wizard {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn take_damage(&mut self, amount: u32) -> DamageTaken {
        let absorbed = amount.min(self.shield);
        self.shield -= absorbed;

        let hp_lost = (amount - absorbed).min(self.hp);
        self.hp -= hp_lost;

        DamageTaken {
            absorbed,
            hp_lost,
            remaining_hp: self.hp,
            remaining_shield: self.shield,
            is_dead: self.hp == 0,
        }
    }

    fn on_move(&mut self, to: Position) {
        self.anchor = to;
    }
}
