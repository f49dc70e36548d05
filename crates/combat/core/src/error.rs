//! Error infrastructure for combat-core.
//!
//! Resolution itself never fails: bad numbers are clamped and "no attack" is
//! an empty result. Errors only arise when static tables are assembled, which
//! happens once at load time.

/// Severity level of an error, used for categorization and recovery strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Invalid input that should be rejected without retry.
    Validation,
}

impl ErrorSeverity {
    /// Returns a human-readable description of this severity level.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Validation => "validation",
        }
    }
}

/// Common trait for all combat-core errors.
pub trait CombatError: core::fmt::Display + core::fmt::Debug {
    /// Returns the severity level of this error.
    fn severity(&self) -> ErrorSeverity;

    /// Returns a static string identifier for this error variant.
    fn error_code(&self) -> &'static str;
}

/// Errors raised while assembling static combat tables.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("critical level {index} has cutoff {cutoff} below the previous cutoff {previous}")]
    UnsortedCutoffs {
        index: usize,
        cutoff: i32,
        previous: i32,
    },

    #[error("critical level {index} has a negative multiplier {multiplier}")]
    NegativeMultiplier { index: usize, multiplier: i32 },

    #[error("percent critical level {index} has a non-positive chance {chance}")]
    InvalidChance { index: usize, chance: i32 },

    #[error("deadliness table needs {expected} entries, found {found}")]
    DeadlinessLength { expected: usize, found: usize },

    #[error("deadliness table is not monotonically non-decreasing at index {index}")]
    DeadlinessNotMonotonic { index: usize },
}

impl CombatError for TableError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::UnsortedCutoffs { .. } => "UNSORTED_CUTOFFS",
            Self::NegativeMultiplier { .. } => "NEGATIVE_MULTIPLIER",
            Self::InvalidChance { .. } => "INVALID_CHANCE",
            Self::DeadlinessLength { .. } => "DEADLINESS_LENGTH",
            Self::DeadlinessNotMonotonic { .. } => "DEADLINESS_NOT_MONOTONIC",
        }
    }
}
