//! CSV-backed source provider.

use std::path::PathBuf;

use framemap_core::SourceProvider;
use polars::prelude::DataFrame;

use crate::csv::{CsvOptions, read_csv_frame};

/// Loads the source frame from a CSV file on every `prepare`.
#[derive(Debug, Clone)]
pub struct CsvSource {
    path: PathBuf,
    options: CsvOptions,
}

impl CsvSource {
    pub fn new(path: impl Into<PathBuf>, options: CsvOptions) -> Self {
        Self {
            path: path.into(),
            options,
        }
    }
}

impl SourceProvider for CsvSource {
    fn prepare(&mut self) -> anyhow::Result<DataFrame> {
        Ok(read_csv_frame(&self.path, &self.options)?)
    }
}
