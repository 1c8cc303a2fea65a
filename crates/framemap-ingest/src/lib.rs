//! CSV ingestion for framemap.
//!
//! Loads source CSV files into Polars DataFrames, exposes a CSV-backed
//! [`SourceProvider`](framemap_core::SourceProvider), and writes mapped
//! output back to CSV.
//!
//! # Example
//!
//! ```ignore
//! use framemap_core::{DatasetMapping, Mapping, RuleSet};
//! use framemap_ingest::{CsvOptions, CsvSource};
//!
//! let source = CsvSource::new("families.csv", CsvOptions::default());
//! let mut set = RuleSet::new(vec![Mapping::new("fname", "family")], source);
//! let output = set.run()?;
//! ```

mod csv;
mod error;
mod source;

// === Error Types ===
pub use error::{IngestError, Result};

// === CSV Reading / Writing ===
pub use csv::{CsvOptions, read_csv_frame, write_csv_frame};

// === Source Providers ===
pub use source::CsvSource;
