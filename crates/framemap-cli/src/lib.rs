//! CLI library components for framemap.

pub mod catalog;
pub mod logging;
pub mod pipeline;
