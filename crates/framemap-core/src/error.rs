//! Error types for mapping runs.
//!
//! A missing source column is not an error: it is logged and the row goes
//! on. Everything here aborts the run.

use std::fmt;

use framemap_model::ValueError;
use polars::prelude::PolarsError;
use thiserror::Error;

/// Which rule callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackKind {
    Condition,
    Modification,
    SideEffect,
}

impl fmt::Display for CallbackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Condition => "condition",
            Self::Modification => "modification",
            Self::SideEffect => "side-effect",
        })
    }
}

/// Fatal errors raised while running mappings.
#[derive(Debug, Error)]
pub enum MappingError {
    /// Append-mode rule targeted a field no earlier rule wrote in this row.
    #[error("cannot append to \"{destination}\" on row {row}: field was not written before")]
    AppendWithoutPriorWrite { destination: String, row: usize },

    /// Append-mode rule produced a value that cannot be added to the stored one.
    #[error("cannot append to \"{destination}\" on row {row}: {source}")]
    IncompatibleAppend {
        destination: String,
        row: usize,
        #[source]
        source: ValueError,
    },

    /// A rule callback returned an error.
    #[error("{kind} for \"{destination}\" failed on row {row}: {source}")]
    Callback {
        kind: CallbackKind,
        destination: String,
        row: usize,
        #[source]
        source: anyhow::Error,
    },

    /// The provider could not produce the source dataset.
    #[error("failed to prepare source data: {0}")]
    Prepare(#[source] anyhow::Error),

    /// The output frame could not be assembled.
    #[error("failed to build output frame: {0}")]
    Frame(#[from] PolarsError),
}

/// Result type for mapping operations.
pub type Result<T> = std::result::Result<T, MappingError>;
