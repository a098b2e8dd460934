//! Game engine
//!
//! Owns the round state: target equation, guess matrix, active row,
//! difficulty, headline and cheat flags.

mod engine;
mod error;
mod headline;
mod stats;
mod transcript;

pub use engine::{EntryOutcome, Game, GuessOutcome, RejectReason, RoundStatus};
pub use error::{GameError, Result};
pub use headline::{Headline, Severity};
pub use stats::Statistics;
pub use transcript::Transcript;
