//! Declarative row-transformation engine.
//!
//! A rule set is an ordered list of [`Mapping`]s. For every source row the
//! engine threads one [`ResultRecord`] through each rule in declaration
//! order:
//!
//! - **rule**: [`Mapping`] and its callback wrappers
//! - **evaluator**: one rule against one row ([`evaluate_rule`])
//! - **engine**: the row loop ([`MappingEngine`])
//! - **dataset**: the provider contract ([`SourceProvider`], [`DatasetMapping`])
//! - **frame**: result records to an output `DataFrame`
//!
//! # Example
//!
//! ```ignore
//! use framemap_core::{Mapping, MappingEngine};
//!
//! let mappings = vec![
//!     Mapping::new("fname", "family"),
//!     Mapping::new("children", "members")
//!         .modify_value(|v| Ok((v.require_i64()? + 2).into())),
//! ];
//! let output = MappingEngine::new(&mappings).run(&source)?;
//! ```

pub mod dataset;
pub mod engine;
pub mod error;
pub mod evaluator;
pub mod frame;
pub mod rule;
pub mod stats;

pub use dataset::{DatasetMapping, InMemory, RuleSet, SourceProvider};
pub use engine::{MappingEngine, RowResult};
pub use error::{CallbackKind, MappingError, Result};
pub use evaluator::{RuleOutcome, evaluate_rule};
pub use frame::{output_columns, records_to_frame};
pub use rule::{Condition, Mapping, Modification, SideEffect};
pub use stats::{MappingRun, RunStats};

pub use framemap_model::{NOT_SET, ResultRecord, SourceRow, Value, ValueError};
