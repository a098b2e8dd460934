//! Equation validation
//!
//! An equation is valid when it splits on its first `=` into two expressions
//! that evaluate to the same value.

use super::expr::{EvalError, evaluate};
use std::fmt;
use thiserror::Error;

/// Relative tolerance used when comparing the two sides
const EPSILON: f64 = 1e-9;

/// Why a string is not a valid equation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EquationError {
    #[error("equation has no '=' sign")]
    MissingEquals,
    #[error("left side: {0}")]
    Left(#[source] EvalError),
    #[error("right side: {0}")]
    Right(#[source] EvalError),
    #[error("sides are not equal ({left} != {right})")]
    Unequal { left: String, right: String },
    #[error("'{0}' cannot be typed on the keypad")]
    Untypable(char),
}

/// Operators on the keypad
const KEYPAD_OPERATORS: &[char] = &['+', '-', '*', '/', '=', '^'];

/// Whether `ch` can be typed into a guess cell
///
/// A space only counts when `allow_whitespace` is set.
#[must_use]
pub fn is_typable(ch: char, allow_whitespace: bool) -> bool {
    ch.is_ascii_digit() || KEYPAD_OPERATORS.contains(&ch) || (ch == ' ' && allow_whitespace)
}

/// Check an equation and report why it is invalid
///
/// # Errors
/// Returns `EquationError` when `text` has no `=`, when either side fails to
/// evaluate, or when the sides differ.
pub fn check(text: &str) -> Result<(), EquationError> {
    let (lhs, rhs) = text.split_once('=').ok_or(EquationError::MissingEquals)?;

    let left = evaluate(lhs).map_err(EquationError::Left)?;
    let right = evaluate(rhs).map_err(EquationError::Right)?;

    let scale = left.abs().max(right.abs()).max(1.0);
    if (left - right).abs() <= EPSILON * scale {
        Ok(())
    } else {
        Err(EquationError::Unequal {
            left: format_value(left),
            right: format_value(right),
        })
    }
}

/// Whether `text` is a valid equation
///
/// Never panics; any evaluation problem yields `false`.
///
/// # Examples
/// ```
/// use nerdle::core::is_valid;
///
/// assert!(is_valid("10+20=30"));
/// assert!(!is_valid("10+20=31"));
/// assert!(!is_valid("no-equals-sign"));
/// assert!(!is_valid("1/0=1"));
/// ```
#[must_use]
pub fn is_valid(text: &str) -> bool {
    check(text).is_ok()
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.0}")
    } else {
        format!("{value}")
    }
}

/// A validated target equation
///
/// Caches the characters so scoring can index by column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Equation {
    text: String,
    chars: Vec<char>,
}

impl Equation {
    /// Validate `text` and wrap it
    ///
    /// # Errors
    /// Returns the `EquationError` from [`check`] when `text` is not valid.
    ///
    /// # Examples
    /// ```
    /// use nerdle::core::Equation;
    ///
    /// let eq = Equation::new("5+60=65").unwrap();
    /// assert_eq!(eq.len(), 7);
    /// assert!(Equation::new("5+60=66").is_err());
    /// ```
    pub fn new(text: impl Into<String>) -> Result<Self, EquationError> {
        let text = text.into();
        check(&text)?;
        let chars = text.chars().collect();
        Ok(Self { text, chars })
    }

    #[inline]
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    #[must_use]
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Number of cells a guess row needs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Check that a player could type every character
    ///
    /// # Errors
    /// Returns `EquationError::Untypable` with the first offending character.
    pub fn ensure_typable(&self, allow_whitespace: bool) -> Result<(), EquationError> {
        match self.chars.iter().find(|&&ch| !is_typable(ch, allow_whitespace)) {
            Some(&ch) => Err(EquationError::Untypable(ch)),
            None => Ok(()),
        }
    }
}

impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn valid_equations() {
        assert!(is_valid("10+20=30"));
        assert!(is_valid("1+2+3=6"));
        assert!(is_valid("2*3+4=10"));
        assert!(is_valid("2^3=8"));
        assert!(is_valid("30=10+20"));
        assert!(is_valid("12/3=2*2"));
    }

    #[test]
    fn unequal_sides_are_invalid() {
        assert!(!is_valid("10+20=31"));
        assert!(matches!(
            check("10+20=31"),
            Err(EquationError::Unequal { ref left, ref right }) if left == "30" && right == "31"
        ));
    }

    #[test]
    fn missing_equals_is_invalid() {
        assert!(!is_valid("no-equals-sign"));
        assert_eq!(check("1+1"), Err(EquationError::MissingEquals));
    }

    #[test]
    fn division_by_zero_is_invalid() {
        assert!(!is_valid("1/0=1"));
        assert_eq!(
            check("1/0=1"),
            Err(EquationError::Left(EvalError::DivisionByZero))
        );
        assert!(!is_valid("2/0=2/0"));
    }

    #[test]
    fn only_first_equals_splits() {
        assert!(!is_valid("1=1=1"));
        assert!(matches!(check("1=1=1"), Err(EquationError::Right(_))));
    }

    #[test]
    fn empty_sides_are_invalid() {
        assert!(!is_valid("="));
        assert!(!is_valid("=5"));
        assert!(!is_valid("5="));
    }

    #[test]
    fn fractional_sides_compare_with_tolerance() {
        assert!(is_valid("1/10+2/10=3/10"));
        assert!(is_valid("1/3+1/3+1/3=1"));
        assert!(!is_valid("1/3=0"));
    }

    #[test]
    fn equation_new_caches_chars() {
        let eq = Equation::new("5+60=65").unwrap();
        assert_eq!(eq.text(), "5+60=65");
        assert_eq!(eq.chars(), &['5', '+', '6', '0', '=', '6', '5']);
        assert!(eq.contains('='));
        assert!(!eq.contains('9'));
        assert_eq!(eq.to_string(), "5+60=65");
    }

    #[test]
    fn equation_new_rejects_invalid() {
        assert!(Equation::new("1+1=3").is_err());
        assert!(Equation::new("").is_err());
    }

    #[test]
    fn runaway_input_is_invalid() {
        assert!(!is_valid(&format!("{}1=1", "-".repeat(200_000))));
        assert!(!is_valid(&format!("{}1=1", "(".repeat(100_000))));
        assert!(matches!(
            check(&format!("1={}1", "+".repeat(1_000))),
            Err(EquationError::Right(EvalError::TooDeep))
        ));
    }

    #[test]
    fn typable_characters() {
        assert!("0123456789+-*/=^".chars().all(|ch| is_typable(ch, false)));
        assert!(!is_typable('(', false));
        assert!(!is_typable(' ', false));
        assert!(is_typable(' ', true));
        assert!(!is_typable('\t', true));
    }

    #[test]
    fn ensure_typable_reports_first_offender() {
        let eq = Equation::new("(1+2)*3=9").unwrap();
        assert_eq!(eq.ensure_typable(true), Err(EquationError::Untypable('(')));

        let spaced = Equation::new("1 + 1 = 2").unwrap();
        assert_eq!(spaced.ensure_typable(false), Err(EquationError::Untypable(' ')));
        assert_eq!(spaced.ensure_typable(true), Ok(()));

        assert_eq!(Equation::new("2^3=8").unwrap().ensure_typable(false), Ok(()));
    }

    proptest! {
        #[test]
        fn validator_never_panics(text in "[0-9+*/^=() -]{0,16}") {
            let _ = is_valid(&text);
        }

        #[test]
        fn sum_equations_validate(a in 0u32..10_000, b in 0u32..10_000) {
            let text = format!("{a}+{b}={}", a + b);
            prop_assert!(is_valid(&text));
        }
    }
}
