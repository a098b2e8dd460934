//! Guess scoring
//!
//! Two rules are supported:
//! - `Existence`: a non-matching character is partially correct whenever it
//!   appears anywhere in the target, however many times it was guessed
//! - `DuplicateAware`: Wordle rules. Exact matches are taken first, then
//!   partial matches are handed out left to right while the target still has
//!   unmatched copies of that character

use super::cell::CellState;
use super::equation::Equation;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// How partially-correct cells are decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScoringRule {
    #[default]
    Existence,
    DuplicateAware,
}

impl ScoringRule {
    /// Parse a rule name as used on the command line
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "existence" | "exists" => Some(Self::Existence),
            "duplicate-aware" | "duplicates" | "wordle" => Some(Self::DuplicateAware),
            _ => None,
        }
    }
}

/// Score `guess` column by column against `target`
///
/// Columns beyond the target's length score as incorrect.
///
/// # Examples
/// ```
/// use nerdle::core::{CellState, Equation, ScoringRule, score_guess};
///
/// let target = Equation::new("5+60=65").unwrap();
/// let guess: Vec<char> = "6+50=56".chars().collect();
/// let states = score_guess(&guess, &target, ScoringRule::Existence);
/// assert_eq!(states[1], CellState::Correct);
/// assert_eq!(states[0], CellState::PartiallyCorrect);
/// ```
#[must_use]
pub fn score_guess(guess: &[char], target: &Equation, rule: ScoringRule) -> Vec<CellState> {
    match rule {
        ScoringRule::Existence => score_existence(guess, target),
        ScoringRule::DuplicateAware => score_duplicate_aware(guess, target),
    }
}

fn score_existence(guess: &[char], target: &Equation) -> Vec<CellState> {
    guess
        .iter()
        .enumerate()
        .map(|(i, &ch)| {
            if target.chars().get(i) == Some(&ch) {
                CellState::Correct
            } else if target.contains(ch) {
                CellState::PartiallyCorrect
            } else {
                CellState::Incorrect
            }
        })
        .collect()
}

fn score_duplicate_aware(guess: &[char], target: &Equation) -> Vec<CellState> {
    let mut result = vec![CellState::Incorrect; guess.len()];
    let mut available: FxHashMap<char, usize> = FxHashMap::default();
    for &ch in target.chars() {
        *available.entry(ch).or_insert(0) += 1;
    }

    // First pass: exact matches use up their copy
    for (i, &ch) in guess.iter().enumerate() {
        if target.chars().get(i) == Some(&ch) {
            result[i] = CellState::Correct;
            if let Some(count) = available.get_mut(&ch) {
                *count = count.saturating_sub(1);
            }
        }
    }

    // Second pass: partial matches from whatever is left
    for (i, &ch) in guess.iter().enumerate() {
        if result[i] == CellState::Correct {
            continue;
        }
        if let Some(count) = available.get_mut(&ch)
            && *count > 0
        {
            result[i] = CellState::PartiallyCorrect;
            *count -= 1;
        }
    }

    result
}
