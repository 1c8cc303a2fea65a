//! Shared utilities for framemap crates.
//!
//! This crate provides the Polars `AnyValue` helpers used when source cells
//! are read into the mapping engine.

pub mod polars;

// Re-export commonly used functions at crate root for convenience
pub use self::polars::{any_to_f64, any_to_i64, any_to_string, format_numeric, parse_f64, parse_i64};
