//! Command implementations

pub mod simple;
pub mod stats;

pub use simple::run_simple;
pub use stats::{Overview, ReportFilter, SortOrder, WordRow, overview, word_report};
