use crate::state::{PlayerId, Position};

/// Inclusive damage range `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DamageRange {
    pub min: u32,
    pub max: u32,
}

impl DamageRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Name and flavour lines shown on a wizard's examine card.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WizardProfile {
    pub name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    pub bio: Vec<String>,
}

impl WizardProfile {
    pub fn new(name: impl Into<String>, bio: &[&str]) -> Self {
        Self {
            name: name.into(),
            bio: bio.iter().map(|line| (*line).to_owned()).collect(),
        }
    }
}

/// Battle-balance constants and board geometry for a duel.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Number of columns; valid x coordinates are `1..=width`.
    pub width: i32,
    /// Number of rows; valid y coordinates are `1..=height`.
    pub height: i32,
    /// Starting (and maximum) HP of both wizards.
    pub wizard_hp: u32,
    pub goblin_hp: u32,
    pub goblin_damage: DamageRange,
    /// Melee range used by attackers without their own (wizards).
    pub default_melee_damage: DamageRange,
    /// Player 1's wizard spawn; `None` means the top-left corner.
    pub player_one_start: Option<Position>,
    /// Player 2's wizard spawn; `None` means the bottom-right corner.
    pub player_two_start: Option<Position>,
    pub player_one: WizardProfile,
    pub player_two: WizardProfile,
}

impl GameConfig {
    // ===== runtime-tunable defaults =====
    pub const DEFAULT_WIDTH: i32 = 10;
    pub const DEFAULT_HEIGHT: i32 = 9;
    pub const DEFAULT_WIZARD_HP: u32 = 8;
    pub const DEFAULT_GOBLIN_HP: u32 = 4;
    pub const DEFAULT_GOBLIN_DAMAGE: DamageRange = DamageRange::new(1, 2);
    pub const DEFAULT_MELEE_DAMAGE: DamageRange = DamageRange::new(1, 3);

    pub fn new() -> Self {
        Self {
            width: Self::DEFAULT_WIDTH,
            height: Self::DEFAULT_HEIGHT,
            wizard_hp: Self::DEFAULT_WIZARD_HP,
            goblin_hp: Self::DEFAULT_GOBLIN_HP,
            goblin_damage: Self::DEFAULT_GOBLIN_DAMAGE,
            default_melee_damage: Self::DEFAULT_MELEE_DAMAGE,
            player_one_start: None,
            player_two_start: None,
            player_one: WizardProfile::new(
                "Zephyr the White",
                &["Age: 125", "School: Elemental", "Power: 8", "Defense: 5"],
            ),
            player_two: WizardProfile::new(
                "Mordecai the Dark",
                &["Age: 340", "School: Necromancy", "Power: 6", "Defense: 7"],
            ),
        }
    }

    pub fn with_board_size(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            ..Self::new()
        }
    }

    pub fn player_one_start(&self) -> Position {
        self.player_one_start.unwrap_or(Position::new(1, 1))
    }

    pub fn player_two_start(&self) -> Position {
        self.player_two_start
            .unwrap_or(Position::new(self.width, self.height))
    }

    pub fn start_of(&self, player: PlayerId) -> Position {
        match player {
            PlayerId::One => self.player_one_start(),
            PlayerId::Two => self.player_two_start(),
        }
    }

    pub fn profile_of(&self, player: PlayerId) -> &WizardProfile {
        match player {
            PlayerId::One => &self.player_one,
            PlayerId::Two => &self.player_two,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
