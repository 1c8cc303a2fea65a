//! Error types for value handling.

use thiserror::Error;

/// Errors raised while coercing or combining [`crate::Value`]s.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValueError {
    /// Value cannot be read as an integer.
    #[error("value {value:?} is not an integer")]
    NotInteger { value: String },

    /// Value cannot be read as a number.
    #[error("value {value:?} is not a number")]
    NotNumeric { value: String },

    /// Append between two values that have no addition defined.
    #[error("cannot append {incoming} value onto {existing} value")]
    IncompatibleAppend {
        existing: &'static str,
        incoming: &'static str,
    },

    /// Integer append overflowed.
    #[error("integer overflow appending {incoming} onto {existing}")]
    Overflow { existing: i64, incoming: i64 },
}

/// Result type for value operations.
pub type Result<T> = std::result::Result<T, ValueError>;
