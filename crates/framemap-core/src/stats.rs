//! Run counters and the combined run result.

use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

/// Counters collected while mapping a dataset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    /// Rows in the prepared source frame.
    pub source_rows: usize,
    /// Rows that produced a non-empty record.
    pub emitted_rows: usize,
    /// Rows where no rule wrote anything.
    pub dropped_rows: usize,
    /// Missing-source-column diagnostics emitted across all rows.
    pub missing_source_reports: usize,
    /// Output columns in first-write order.
    pub columns: Vec<String>,
}

impl RunStats {
    /// True when every source row made it into the output.
    pub fn all_rows_emitted(&self) -> bool {
        self.dropped_rows == 0
    }
}

/// Output frame plus the counters of the run that produced it.
#[derive(Debug, Clone)]
pub struct MappingRun {
    pub data: DataFrame,
    pub stats: RunStats,
}
