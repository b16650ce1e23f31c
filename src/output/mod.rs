//! Terminal output formatting
//!
//! Display utilities for CLI results and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{
    print_delete_report, print_export, print_import_report, print_overview, print_reload_report,
    print_reset, print_set_summaries, print_word_deleted, print_word_report,
};
