//! Common error infrastructure for game-core.
//!
//! Domain errors (`BoardError`, `MoveError`, `CastError`, ...) live next to
//! the operations that produce them. This module provides the shared
//! classification used by the runtime to decide how to react:
//!
//! - **Recoverable**: an illegal player action; reject it, play the error cue,
//!   keep the current interaction mode so the player can retry
//! - **Validation**: malformed request (unknown spell, wrong owner)
//! - **Internal**: a missing precondition that indicates an upstream bug
//! - **Fatal**: the session cannot continue

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Illegal action, retry with a different input.
    ///
    /// Examples: destination occupied, target out of range, spell already used
    Recoverable,

    /// Invalid request, should not be retried unchanged.
    ///
    /// Examples: unknown spell, piece owned by the opponent
    Validation,

    /// Unexpected state inconsistency.
    ///
    /// Examples: caster piece missing, wizard not on the board
    Internal,

    /// Session cannot continue.
    Fatal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Recoverable => "recoverable",
            Self::Validation => "validation",
            Self::Internal => "internal",
            Self::Fatal => "fatal",
        }
    }

    /// Returns true if the player may simply retry.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Recoverable | Self::Validation)
    }
}

/// Common trait for all game-core errors.
///
/// - Use `#[derive(thiserror::Error)]` for the Display/Error impl
/// - Classify severity based on recoverability, not impact
pub trait GameError: std::fmt::Display + std::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}
