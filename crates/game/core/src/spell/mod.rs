//! Spell catalog: static definitions looked up by name or menu key.

mod error;

pub use error::{CastError, CatalogError};

use crate::config::DamageRange;

/// Presentation tag forwarded to render/audio hosts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellEffect {
    MagicBolt,
    Lightning,
    MightyArrow,
    Shield,
    IceWall,
    SummonGoblin,
}

/// What a spell does when it resolves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpellKind {
    /// Projectile that damages the target cell.
    Offensive { damage: DamageRange },
    /// Resolves on the caster without a targeting step.
    SelfCast { shield: u32 },
    /// Places an Ice Wall obstacle.
    Utility,
    /// Summons a goblin for the caster's side.
    Creature,
}

impl SpellKind {
    pub fn is_offensive(&self) -> bool {
        matches!(self, SpellKind::Offensive { .. })
    }

    pub fn needs_target(&self) -> bool {
        !matches!(self, SpellKind::SelfCast { .. })
    }

    pub fn damage(&self) -> Option<DamageRange> {
        match self {
            SpellKind::Offensive { damage } => Some(*damage),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellDefinition {
    pub name: String,
    /// Menu key (`1`..`9`).
    pub key: u8,
    pub kind: SpellKind,
    /// Maximum Chebyshev distance from the caster. Ignored for self-casts.
    pub range: u32,
    pub effect: SpellEffect,
}

impl SpellDefinition {
    pub fn new(
        name: impl Into<String>,
        key: u8,
        kind: SpellKind,
        range: u32,
        effect: SpellEffect,
    ) -> Self {
        Self {
            name: name.into(),
            key,
            kind,
            range,
            effect,
        }
    }
}

/// Immutable, ordered set of spells. Names and keys are unique.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SpellCatalog {
    spells: Vec<SpellDefinition>,
}

impl SpellCatalog {
    pub const MAGIC_BOLT: &'static str = "Magic Bolt";
    pub const LIGHTNING: &'static str = "Lightning";
    pub const SHIELD: &'static str = "Shield";
    pub const MIGHTY_ARROW: &'static str = "Mighty Arrow";
    pub const ICE_WALL: &'static str = "Ice Wall";
    pub const SUMMON_GOBLIN: &'static str = "Summon Goblin";

    pub fn new(spells: Vec<SpellDefinition>) -> Result<Self, CatalogError> {
        if spells.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (index, spell) in spells.iter().enumerate() {
            let earlier = &spells[..index];
            if earlier.iter().any(|other| other.name == spell.name) {
                return Err(CatalogError::DuplicateName(spell.name.clone()));
            }
            if earlier.iter().any(|other| other.key == spell.key) {
                return Err(CatalogError::DuplicateKey(spell.key));
            }
            if let SpellKind::Offensive { damage } = spell.kind
                && damage.min > damage.max
            {
                return Err(CatalogError::InvalidDamage {
                    name: spell.name.clone(),
                    min: damage.min,
                    max: damage.max,
                });
            }
        }
        Ok(Self { spells })
    }

    pub fn by_name(&self, name: &str) -> Option<&SpellDefinition> {
        self.spells.iter().find(|spell| spell.name == name)
    }

    pub fn by_key(&self, key: u8) -> Option<&SpellDefinition> {
        self.spells.iter().find(|spell| spell.key == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Offensive spell with the shortest range, if any.
    pub fn shortest_offensive_range(&self) -> Option<u32> {
        self.spells
            .iter()
            .filter(|spell| spell.kind.is_offensive())
            .map(|spell| spell.range)
            .min()
    }

    fn builtin() -> Vec<SpellDefinition> {
        vec![
            SpellDefinition::new(
                Self::MAGIC_BOLT,
                1,
                SpellKind::Offensive {
                    damage: DamageRange::new(1, 5),
                },
                5,
                SpellEffect::MagicBolt,
            ),
            SpellDefinition::new(
                Self::LIGHTNING,
                2,
                SpellKind::Offensive {
                    damage: DamageRange::new(3, 10),
                },
                3,
                SpellEffect::Lightning,
            ),
            SpellDefinition::new(
                Self::SHIELD,
                3,
                SpellKind::SelfCast { shield: 3 },
                0,
                SpellEffect::Shield,
            ),
            SpellDefinition::new(
                Self::MIGHTY_ARROW,
                4,
                SpellKind::Offensive {
                    damage: DamageRange::new(2, 5),
                },
                9,
                SpellEffect::MightyArrow,
            ),
            SpellDefinition::new(Self::ICE_WALL, 5, SpellKind::Utility, 5, SpellEffect::IceWall),
            SpellDefinition::new(
                Self::SUMMON_GOBLIN,
                6,
                SpellKind::Creature,
                2,
                SpellEffect::SummonGoblin,
            ),
        ]
    }
}

impl Default for SpellCatalog {
    fn default() -> Self {
        Self {
            spells: Self::builtin(),
        }
    }
}

impl<'a> IntoIterator for &'a SpellCatalog {
    type Item = &'a SpellDefinition;
    type IntoIter = std::slice::Iter<'a, SpellDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.spells.iter()
    }
}
