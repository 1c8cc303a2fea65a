//! Read-only view of one source row.

use std::fmt;

use framemap_common::{any_to_f64, any_to_i64, any_to_string};
use polars::prelude::{AnyValue, DataFrame};

/// A single row of the source `DataFrame`, addressed by column name.
///
/// Lookups of absent columns return `None`; that is how the engine detects a
/// missing source column.
#[derive(Clone, Copy)]
pub struct SourceRow<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl<'a> SourceRow<'a> {
    /// View row `index` of `frame`.
    pub fn new(frame: &'a DataFrame, index: usize) -> Self {
        Self { frame, index }
    }

    /// Zero-based position of the row in the source frame.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Raw cell value, or `None` when the column is absent.
    pub fn get(&self, name: &str) -> Option<AnyValue<'a>> {
        let column = self.frame.column(name).ok()?;
        Some(column.get(self.index).unwrap_or(AnyValue::Null))
    }

    /// Cell coerced to its string representation and trimmed.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|value| any_to_string(value).trim().to_string())
    }

    /// Cell read as an integer.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(any_to_i64)
    }

    /// Cell read as a float.
    pub fn float(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(any_to_f64)
    }
}

impl fmt::Debug for SourceRow<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceRow")
            .field("index", &self.index)
            .field("width", &self.frame.width())
            .finish()
    }
}
