//! The `run` command pipeline: load, map, write.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use framemap_core::{DatasetMapping, RuleSet, RunStats};
use framemap_ingest::{CsvOptions, CsvSource, write_csv_frame};
use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::{info, info_span};

use crate::catalog;

/// Inputs of a single mapping run.
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub mapping: String,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub delimiter: u8,
    pub stats_json: Option<PathBuf>,
}

/// What a run produced.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub mapping: String,
    pub input: PathBuf,
    pub output: Option<PathBuf>,
    pub stats_json: Option<PathBuf>,
    pub stats: RunStats,
    pub data: DataFrame,
}

/// Stats file layout.
#[derive(Debug, Serialize)]
struct StatsFile<'a> {
    mapping: &'a str,
    input: &'a Path,
    #[serde(flatten)]
    stats: &'a RunStats,
}

/// Run a catalog mapping set against a CSV file.
pub fn execute(request: &RunRequest) -> Result<RunReport> {
    let span = info_span!("run", mapping = %request.mapping);
    let _guard = span.enter();

    let entry = catalog::find(&request.mapping).ok_or_else(|| {
        let known: Vec<&str> = catalog::entries().iter().map(|e| e.name).collect();
        anyhow!(
            "unknown mapping set '{}' (available: {})",
            request.mapping,
            known.join(", ")
        )
    })?;

    let options = CsvOptions::default().with_delimiter(request.delimiter);
    let source = CsvSource::new(&request.input, options);
    let mut rule_set = RuleSet::new(entry.mappings(), source);
    let mut run = rule_set
        .run_with_stats()
        .with_context(|| format!("run mapping set {} on {}", entry.name, request.input.display()))?;
    info!(
        emitted_rows = run.stats.emitted_rows,
        dropped_rows = run.stats.dropped_rows,
        "mapping set applied"
    );

    if let Some(path) = &request.output {
        write_csv_frame(&mut run.data, path, request.delimiter)
            .with_context(|| format!("write output {}", path.display()))?;
        info!(path = %path.display(), "output written");
    }

    if let Some(path) = &request.stats_json {
        write_stats(path, entry.name, &request.input, &run.stats)?;
    }

    Ok(RunReport {
        mapping: entry.name.to_string(),
        input: request.input.clone(),
        output: request.output.clone(),
        stats_json: request.stats_json.clone(),
        stats: run.stats,
        data: run.data,
    })
}

fn write_stats(path: &Path, mapping: &str, input: &Path, stats: &RunStats) -> Result<()> {
    let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    let payload = StatsFile {
        mapping,
        input,
        stats,
    };
    serde_json::to_writer_pretty(file, &payload)
        .with_context(|| format!("write stats {}", path.display()))?;
    Ok(())
}
