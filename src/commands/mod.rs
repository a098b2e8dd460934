//! Command implementations

pub mod audit;
pub mod check;
pub mod simple;

pub use audit::{AuditReport, run_audit};
pub use check::{CheckResult, check_equations};
pub use simple::{Command, GuessReport, parse_command, play_guess, run_simple};
