//! Terminal output formatting
//!
//! Display utilities for the line-mode game and command results.

pub mod display;
pub mod formatters;

pub use display::{
    paint_difficulty, print_audit_report, print_check_results, print_headline, print_matrix,
    print_stats, print_transcript,
};
