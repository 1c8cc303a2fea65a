//! Provider contract: where the source frame comes from and which rules apply.

use polars::prelude::DataFrame;

use crate::engine::MappingEngine;
use crate::error::{MappingError, Result};
use crate::rule::Mapping;
use crate::stats::MappingRun;

/// Builds the source dataset for a run.
pub trait SourceProvider {
    /// Produce the source frame. Called once per run, never cached.
    fn prepare(&mut self) -> anyhow::Result<DataFrame>;
}

/// A fixed rule list bound to a source provider.
pub trait DatasetMapping: SourceProvider {
    /// Rules in evaluation order.
    fn mappings(&self) -> &[Mapping];

    /// Prepare the source and map it.
    fn run(&mut self) -> Result<DataFrame> {
        self.run_with_stats().map(|run| run.data)
    }

    /// Prepare the source, map it, and keep the run counters.
    fn run_with_stats(&mut self) -> Result<MappingRun> {
        let source = self.prepare().map_err(MappingError::Prepare)?;
        MappingEngine::new(self.mappings()).run_with_stats(&source)
    }
}

/// Provider handing out copies of an in-memory frame.
#[derive(Debug, Clone)]
pub struct InMemory(pub DataFrame);

impl SourceProvider for InMemory {
    fn prepare(&mut self) -> anyhow::Result<DataFrame> {
        Ok(self.0.clone())
    }
}

/// Rule list paired with any [`SourceProvider`].
#[derive(Debug, Clone)]
pub struct RuleSet<P> {
    mappings: Vec<Mapping>,
    source: P,
}

impl<P: SourceProvider> RuleSet<P> {
    pub fn new(mappings: Vec<Mapping>, source: P) -> Self {
        Self { mappings, source }
    }
}

impl<P: SourceProvider> SourceProvider for RuleSet<P> {
    fn prepare(&mut self) -> anyhow::Result<DataFrame> {
        self.source.prepare()
    }
}

impl<P: SourceProvider> DatasetMapping for RuleSet<P> {
    fn mappings(&self) -> &[Mapping] {
        &self.mappings
    }
}
