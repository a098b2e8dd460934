//! Core domain types for the equation game
//!
//! Pure types with no I/O: expression evaluation, equation validation, grid
//! cells, the guess matrix and guess scoring.

mod cell;
mod equation;
mod expr;
mod matrix;
mod scoring;

pub use cell::{Cell, CellState};
pub use equation::{Equation, EquationError, check, is_typable, is_valid};
pub use expr::{EvalError, evaluate};
pub use matrix::GuessMatrix;
pub use scoring::{ScoringRule, score_guess};
