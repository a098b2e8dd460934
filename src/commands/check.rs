//! Equation check command
//!
//! Validates equations given on the command line and explains failures.

use crate::core::{EquationError, check, evaluate};

/// Outcome of checking one equation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    pub text: String,
    pub verdict: Result<(), EquationError>,
    /// Value of the left side, when it evaluates
    pub left_value: Option<String>,
}

impl CheckResult {
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.verdict.is_ok()
    }
}

/// Check each equation in order
#[must_use]
pub fn check_equations(equations: &[String]) -> Vec<CheckResult> {
    equations
        .iter()
        .map(|text| {
            let left_value = text
                .split_once('=')
                .and_then(|(lhs, _)| evaluate(lhs).ok())
                .map(|value| format!("{value}"));
            CheckResult {
                text: text.clone(),
                verdict: check(text),
                left_value,
            }
        })
        .collect()
}
