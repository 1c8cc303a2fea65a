//! Data model for the framemap mapping engine.
//!
//! - **value**: [`Value`] cells, including the [`Value::NotSet`] sentinel
//! - **record**: [`ResultRecord`], the insertion-ordered per-row accumulator
//! - **row**: [`SourceRow`], a read-only view of one source `DataFrame` row
//! - **error**: [`ValueError`] for value coercion and append failures

pub mod error;
pub mod record;
pub mod row;
pub mod value;

pub use error::{Result, ValueError};
pub use record::ResultRecord;
pub use row::SourceRow;
pub use value::{NOT_SET, Value};
