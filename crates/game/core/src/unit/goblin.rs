use super::{Combatant, DamageTaken};
use crate::config::DamageRange;

/// Summoned melee creature: no shield, no spells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Goblin {
    hp: u32,
    max_hp: u32,
    damage: DamageRange,
    has_acted: bool,
}

impl Goblin {
    pub fn new(hp: u32, damage: DamageRange) -> Self {
        Self {
            hp,
            max_hp: hp,
            damage,
            has_acted: false,
        }
    }

    pub fn has_acted(&self) -> bool {
        self.has_acted
    }

    pub fn set_acted(&mut self, acted: bool) {
        self.has_acted = acted;
    }
}

impl Combatant for Goblin {
    fn hp(&self) -> u32 {
        self.hp
    }

    fn max_hp(&self) -> u32 {
        self.max_hp
    }

    fn take_damage(&mut self, amount: u32) -> DamageTaken {
        let hp_lost = amount.min(self.hp);
        self.hp -= hp_lost;
        DamageTaken {
            absorbed: 0,
            hp_lost,
            remaining_hp: self.hp,
            remaining_shield: 0,
            is_dead: self.hp == 0,
        }
    }

    fn melee_damage(&self) -> Option<DamageRange> {
        Some(self.damage)
    }
}
