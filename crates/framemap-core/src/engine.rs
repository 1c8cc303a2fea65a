//! The per-row mapping loop.

use framemap_model::{ResultRecord, SourceRow};
use polars::prelude::DataFrame;
use tracing::{debug, info_span, trace};

use crate::error::Result;
use crate::evaluator::evaluate_rule;
use crate::frame::{output_columns, records_to_frame};
use crate::rule::Mapping;
use crate::stats::{MappingRun, RunStats};

/// Result of running all rules against one source row.
#[derive(Debug, Clone, Default)]
pub struct RowResult {
    pub record: ResultRecord,
    pub missing_source_reports: usize,
}

/// Applies an ordered rule list to every row of a source frame.
#[derive(Debug, Clone, Copy)]
pub struct MappingEngine<'r> {
    mappings: &'r [Mapping],
}

impl<'r> MappingEngine<'r> {
    pub fn new(mappings: &'r [Mapping]) -> Self {
        Self { mappings }
    }

    /// Run every rule, in declaration order, against `row`.
    pub fn evaluate_row(&self, row: &SourceRow<'_>) -> Result<RowResult> {
        let mut result = RowResult::default();
        for rule in self.mappings {
            let outcome = evaluate_rule(rule, row, &mut result.record)?;
            if outcome.reported_missing {
                result.missing_source_reports += 1;
            }
        }
        Ok(result)
    }

    /// Map `source` into records, dropping rows that wrote nothing.
    pub fn run_records(&self, source: &DataFrame) -> Result<(Vec<ResultRecord>, RunStats)> {
        let span = info_span!("mapping_run", rules = self.mappings.len(), rows = source.height());
        let _guard = span.enter();

        let mut stats = RunStats {
            source_rows: source.height(),
            ..RunStats::default()
        };
        let mut records = Vec::with_capacity(source.height());

        for index in 0..source.height() {
            let row = SourceRow::new(source, index);
            let result = self.evaluate_row(&row)?;
            stats.missing_source_reports += result.missing_source_reports;
            if result.record.is_empty() {
                trace!(row = index, "no rule fired, row dropped");
                stats.dropped_rows += 1;
            } else {
                records.push(result.record);
            }
        }

        stats.emitted_rows = records.len();
        stats.columns = output_columns(&records);
        debug!(
            source_rows = stats.source_rows,
            emitted_rows = stats.emitted_rows,
            dropped_rows = stats.dropped_rows,
            missing_source_reports = stats.missing_source_reports,
            "mapping run finished"
        );
        Ok((records, stats))
    }

    /// Map `source` into a new frame.
    pub fn run(&self, source: &DataFrame) -> Result<DataFrame> {
        self.run_with_stats(source).map(|run| run.data)
    }

    /// Map `source` into a new frame and report what happened.
    pub fn run_with_stats(&self, source: &DataFrame) -> Result<MappingRun> {
        let (records, stats) = self.run_records(source)?;
        let data = records_to_frame(&records)?;
        Ok(MappingRun { data, stats })
    }
}
