use crate::combat::CombatError;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{PieceId, Position};

/// Problems found while building a [`super::SpellCatalog`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("spell catalog is empty")]
    Empty,

    #[error("spell name '{0}' appears more than once")]
    DuplicateName(String),

    #[error("spell key {0} appears more than once")]
    DuplicateKey(u8),

    #[error("spell '{name}' has damage range {min}..={max}")]
    InvalidDamage { name: String, min: u32, max: u32 },
}

impl GameError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Empty => "CATALOG_EMPTY",
            Self::DuplicateName(_) => "CATALOG_DUPLICATE_NAME",
            Self::DuplicateKey(_) => "CATALOG_DUPLICATE_KEY",
            Self::InvalidDamage { .. } => "CATALOG_INVALID_DAMAGE",
        }
    }
}

/// Reasons a spell cast is rejected. A rejected cast never leaves the spell
/// marked as used.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CastError {
    #[error("unknown spell '{0}'")]
    UnknownSpell(String),

    #[error("piece {0} is not on the board")]
    CasterNotFound(PieceId),

    #[error("piece {0} cannot cast spells")]
    NotAWizard(PieceId),

    #[error("spell '{0}' was already used")]
    AlreadyUsed(String),

    #[error("spell '{0}' needs a target")]
    TargetRequired(String),

    #[error("cannot target the caster's own cell")]
    SelfTarget,

    #[error("target {target} is {distance} away, range is {range}")]
    OutOfRange {
        target: Position,
        distance: u32,
        range: u32,
    },

    #[error("target {0} is outside the board")]
    OutOfBounds(Position),

    #[error("target {0} is occupied")]
    Occupied(Position),

    #[error("target {0} is a destroyed tile")]
    DestroyedTile(Position),

    #[error(transparent)]
    Combat(#[from] CombatError),
}

impl GameError for CastError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::AlreadyUsed(_)
            | Self::SelfTarget
            | Self::OutOfRange { .. }
            | Self::OutOfBounds(_)
            | Self::Occupied(_)
            | Self::DestroyedTile(_) => ErrorSeverity::Recoverable,
            Self::UnknownSpell(_) | Self::TargetRequired(_) | Self::NotAWizard(_) => {
                ErrorSeverity::Validation
            }
            Self::CasterNotFound(_) => ErrorSeverity::Internal,
            Self::Combat(error) => error.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownSpell(_) => "CAST_UNKNOWN_SPELL",
            Self::CasterNotFound(_) => "CAST_CASTER_NOT_FOUND",
            Self::NotAWizard(_) => "CAST_NOT_A_WIZARD",
            Self::AlreadyUsed(_) => "CAST_ALREADY_USED",
            Self::TargetRequired(_) => "CAST_TARGET_REQUIRED",
            Self::SelfTarget => "CAST_SELF_TARGET",
            Self::OutOfRange { .. } => "CAST_OUT_OF_RANGE",
            Self::OutOfBounds(_) => "CAST_OUT_OF_BOUNDS",
            Self::Occupied(_) => "CAST_OCCUPIED",
            Self::DestroyedTile(_) => "CAST_DESTROYED_TILE",
            Self::Combat(error) => error.error_code(),
        }
    }
}
