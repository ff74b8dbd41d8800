use crate::field::SetKind;
use thiserror::Error;

/// Crate specific Errors implementation.
#[derive(Debug, Error, Clone, PartialEq, Eq, Hash)]
pub enum Error {
    /// Error parsing whole schedule expression.
    #[error("invalid schedule expression: {0}")]
    InvalidSchedule(String),
    /// Error parsing single schedule field.
    #[error("invalid schedule field: {0}")]
    InvalidField(String),
    /// Field value is outside of the unit's allowed domain.
    #[error("invalid {kind} value {value}: allowed values are {low}-{high}")]
    OutOfBounds {
        /// Outermost syntactic construct the value belongs to.
        kind: SetKind,
        /// Offending value.
        value: u16,
        /// Lower domain bound of the unit.
        low: u16,
        /// Upper domain bound of the unit.
        high: u16,
    },
    /// Range with lower bound greater than upper bound.
    #[error("invalid {kind}: range bounds {lo}-{hi} are reversed")]
    ReversedRange {
        /// Outermost syntactic construct the range belongs to.
        kind: SetKind,
        /// Lower bound as written.
        lo: u16,
        /// Upper bound as written.
        hi: u16,
    },
    /// No scheduled instant exists after the requested one.
    #[error("no next scheduled slot")]
    NoNextSlot,
    /// No scheduled instant exists before the requested one.
    #[error("no previous scheduled slot")]
    NoPrevSlot,
}

impl Error {
    /// Re-tags a validation error with the outermost syntactic kind,
    /// preserving the offending value and bounds.
    pub(crate) fn retag(self, kind: SetKind) -> Self {
        match self {
            Self::OutOfBounds { value, low, high, .. } => Self::OutOfBounds { kind, value, low, high },
            Self::ReversedRange { lo, hi, .. } => Self::ReversedRange { kind, lo, hi },
            other => other,
        }
    }
}
