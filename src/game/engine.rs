//! Round state machine
//!
//! Every intent (type, delete, submit, reset, new round, difficulty, cheat)
//! runs synchronously to completion. State changes happen through explicit,
//! ordered transition methods:
//!
//! ```text
//! submit -> score_active_row -> advance_row -> check_completion
//! round start -> rebuild_matrix -> headline
//! ```

use super::error::{GameError, Result};
use super::headline::Headline;
use super::stats::Statistics;
use super::transcript::Transcript;
use crate::config::{Difficulty, GameConfig};
use crate::core::{Cell, CellState, Equation, GuessMatrix, is_typable, is_valid, score_guess};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Where a round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Playing,
    Won,
    /// Solved, but the cheat panel was used
    Cheated,
    Lost,
}

impl RoundStatus {
    #[must_use]
    pub const fn is_over(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Why a typed character was not written
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    RoundOver,
    InactiveRow,
    OutOfBounds,
    InvalidChar(char),
    RowFull,
}

/// Result of typing a character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Written; `next_col` is where input focus should move, if anywhere
    Accepted { col: usize, next_col: Option<usize> },
    Rejected(RejectReason),
}

/// Result of submitting the active row
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Round already over
    Ignored,
    /// Some cells were blank; they are now marked empty
    Incomplete { blanks: usize },
    /// Row is filled but not a valid equation
    InvalidEquation,
    /// Row scored, round continues on the next row
    Scored { row: usize },
    /// Solved without cheating; score transcript attached
    Won { transcript: Transcript },
    /// Solved after opening the cheat panel
    WonWithCheat,
    Lost,
}

/// Equation guessing game
///
/// Owns the configuration, the hidden target, the guess matrix and all round
/// state.
pub struct Game<R> {
    config: GameConfig,
    rng: R,
    target: Equation,
    difficulty: usize,
    matrix: GuessMatrix,
    /// Active row; `None` once the round is over
    guess_count: Option<usize>,
    status: RoundStatus,
    headline: Headline,
    cheat_visible: bool,
    cheat_used: bool,
    transcript: Option<Transcript>,
    stats: Statistics,
}

impl<R: Rng> Game<R> {
    /// Start a game on a random target from the answer pool
    ///
    /// # Errors
    /// Returns `GameError::EmptyPool` if the configuration has no answers.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Self> {
        let target = config
            .answers()
            .choose(&mut rng)
            .cloned()
            .ok_or(GameError::EmptyPool)?;
        Ok(Self::start(config, target, rng))
    }

    /// Start a game on an explicit target
    ///
    /// # Errors
    /// Returns `GameError::InvalidTarget` when `target` is not a valid
    /// equation or holds a character the keypad cannot produce, so an
    /// unwinnable round never starts.
    pub fn with_target(config: GameConfig, target: &str, rng: R) -> Result<Self> {
        let allow_whitespace = config.options().allow_whitespace;
        let target = Equation::new(target)
            .and_then(|eq| eq.ensure_typable(allow_whitespace).map(|()| eq))
            .map_err(|source| GameError::InvalidTarget {
                text: target.to_string(),
                source,
            })?;
        Ok(Self::start(config, target, rng))
    }

    fn start(config: GameConfig, target: Equation, rng: R) -> Self {
        let mut game = Self {
            matrix: GuessMatrix::create(0, 0),
            config,
            rng,
            target,
            difficulty: 0,
            guess_count: Some(0),
            status: RoundStatus::Playing,
            headline: Headline::Playing,
            cheat_visible: false,
            cheat_used: false,
            transcript: None,
            stats: Statistics::default(),
        };
        game.begin_round();
        game
    }

    // ----- Queries ---------------------------------------------------------

    #[must_use]
    pub const fn matrix(&self) -> &GuessMatrix {
        &self.matrix
    }

    /// Active row, or `None` when the round is over
    #[must_use]
    pub const fn guess_count(&self) -> Option<usize> {
        self.guess_count
    }

    #[must_use]
    pub const fn status(&self) -> RoundStatus {
        self.status
    }

    #[must_use]
    pub const fn headline(&self) -> Headline {
        self.headline
    }

    #[must_use]
    pub const fn is_over(&self) -> bool {
        self.guess_count.is_none()
    }

    #[must_use]
    pub fn difficulty(&self) -> &Difficulty {
        &self.config.difficulties()[self.difficulty]
    }

    #[must_use]
    pub const fn difficulty_index(&self) -> usize {
        self.difficulty
    }

    /// Guesses allowed this round
    #[must_use]
    pub fn row_budget(&self) -> usize {
        self.difficulty().rows
    }

    /// Cells per row
    #[must_use]
    pub fn cols(&self) -> usize {
        self.target.len()
    }

    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn cheat_visible(&self) -> bool {
        self.cheat_visible
    }

    #[must_use]
    pub const fn cheat_used(&self) -> bool {
        self.cheat_used
    }

    /// Target characters, only while the cheat panel is open
    #[must_use]
    pub fn cheat_reveal(&self) -> Option<&[char]> {
        self.cheat_visible.then(|| self.target.chars())
    }

    /// Score of the last genuine win in this round
    #[must_use]
    pub const fn transcript(&self) -> Option<&Transcript> {
        self.transcript.as_ref()
    }

    #[must_use]
    pub const fn stats(&self) -> &Statistics {
        &self.stats
    }

    // ----- Character entry -------------------------------------------------

    fn accepts_char(&self, ch: char) -> bool {
        is_typable(ch, self.config.options().allow_whitespace)
    }

    /// Type `ch` into a specific cell of the active row
    pub fn enter_char(&mut self, ch: char, row: usize, col: usize) -> EntryOutcome {
        let outcome = self.try_enter(ch, row, col);
        if let EntryOutcome::Rejected(reason) = outcome {
            log::debug!("Rejected {ch:?} at ({row}, {col}): {reason:?}");
        }
        outcome
    }

    fn try_enter(&mut self, ch: char, row: usize, col: usize) -> EntryOutcome {
        let Some(active) = self.guess_count else {
            return EntryOutcome::Rejected(RejectReason::RoundOver);
        };
        if row != active {
            return EntryOutcome::Rejected(RejectReason::InactiveRow);
        }
        if col >= self.matrix.cols() {
            return EntryOutcome::Rejected(RejectReason::OutOfBounds);
        }
        if !self.accepts_char(ch) {
            return EntryOutcome::Rejected(RejectReason::InvalidChar(ch));
        }

        self.matrix = self.matrix.with_cell(row, col, Cell::typed(ch));
        let next_col = col + 1;
        EntryOutcome::Accepted {
            col,
            next_col: (next_col < self.matrix.cols()).then_some(next_col),
        }
    }

    /// Type `ch` into the first blank cell of the active row
    pub fn push_char(&mut self, ch: char) -> EntryOutcome {
        let Some(active) = self.guess_count else {
            return EntryOutcome::Rejected(RejectReason::RoundOver);
        };
        let first_blank = self
            .matrix
            .row(active)
            .and_then(|cells| cells.iter().position(Cell::is_blank));

        match first_blank {
            Some(col) => self.enter_char(ch, active, col),
            None => {
                log::debug!("Rejected {ch:?}: row {active} is full");
                EntryOutcome::Rejected(RejectReason::RowFull)
            }
        }
    }

    /// Clear the right-most filled cell of the active row
    ///
    /// Returns the cleared column.
    pub fn delete(&mut self) -> Option<usize> {
        let active = self.guess_count?;
        let col = self
            .matrix
            .row(active)?
            .iter()
            .rposition(|cell| !cell.is_blank())?;
        self.matrix = self.matrix.with_cell(active, col, Cell::BLANK);
        Some(col)
    }

    // ----- Guessing --------------------------------------------------------

    /// Submit the active row
    pub fn submit(&mut self) -> GuessOutcome {
        let Some(row) = self.guess_count else {
            return GuessOutcome::Ignored;
        };
        let Some(cells) = self.matrix.row(row) else {
            return GuessOutcome::Ignored;
        };

        let blanks: Vec<usize> = cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_blank())
            .map(|(col, _)| col)
            .collect();
        if !blanks.is_empty() {
            for &col in &blanks {
                self.matrix = self.matrix.with_cell(row, col, Cell::empty());
            }
            self.headline = Headline::Incomplete;
            log::debug!("Row {row} incomplete: {} blank cells", blanks.len());
            return GuessOutcome::Incomplete {
                blanks: blanks.len(),
            };
        }

        let guess: Vec<char> = cells.iter().filter_map(|cell| cell.value).collect();
        let candidate: String = guess.iter().collect();
        if !is_valid(&candidate) {
            self.headline = Headline::InvalidEquation;
            log::debug!("Row {row} rejected: {candidate:?} is not a valid equation");
            return GuessOutcome::InvalidEquation;
        }

        self.score_active_row(row, &guess);
        self.advance_row(row);
        self.headline = Headline::Playing;
        self.check_completion(row)
    }

    fn score_active_row(&mut self, row: usize, guess: &[char]) {
        let states = score_guess(guess, &self.target, self.config.options().scoring);
        let cells = guess
            .iter()
            .zip(states)
            .map(|(&ch, state)| Cell::scored(ch, state))
            .collect();
        self.matrix = self.matrix.with_row(row, cells);
    }

    fn advance_row(&mut self, row: usize) {
        if row < self.row_budget() {
            self.guess_count = Some(row + 1);
        }
    }

    fn check_completion(&mut self, scored_row: usize) -> GuessOutcome {
        let Some(count) = self.guess_count else {
            return GuessOutcome::Ignored;
        };

        let solved = count > 0
            && self.matrix.row(count - 1).is_some_and(|cells| {
                cells.iter().all(|cell| cell.state == CellState::Correct)
            });

        if solved {
            self.guess_count = None;
            if self.cheat_used {
                self.headline = Headline::Cheated;
                self.status = RoundStatus::Cheated;
                self.stats.record_cheated();
                log::info!("Round solved in {count} guesses with cheat panel");
                return GuessOutcome::WonWithCheat;
            }

            let transcript = Transcript::from_matrix(&self.matrix);
            self.headline = Headline::Won;
            self.status = RoundStatus::Won;
            self.stats.record_win(count);
            self.transcript = Some(transcript.clone());
            log::info!("Round won in {count} guesses");
            return GuessOutcome::Won { transcript };
        }

        if count == self.row_budget() {
            self.guess_count = None;
            self.headline = Headline::Lost;
            self.status = RoundStatus::Lost;
            self.stats.record_loss();
            log::info!("Round lost after {count} guesses");
            return GuessOutcome::Lost;
        }

        GuessOutcome::Scored { row: scored_row }
    }

    // ----- Round lifecycle -------------------------------------------------

    fn rebuild_matrix(&mut self) {
        self.matrix = GuessMatrix::create(self.row_budget(), self.cols());
    }

    fn begin_round(&mut self) {
        self.guess_count = Some(0);
        self.status = RoundStatus::Playing;
        self.cheat_used = false;
        self.cheat_visible = false;
        self.transcript = None;
        self.rebuild_matrix();
        self.headline = Headline::Playing;
        log::info!(
            "New round: {} columns, {} guesses ({})",
            self.cols(),
            self.row_budget(),
            self.difficulty().name
        );
    }

    /// Same target, fresh grid
    ///
    /// A cheat used this round stays recorded.
    pub fn reset(&mut self) {
        self.rebuild_matrix();
        self.guess_count = Some(0);
        self.status = RoundStatus::Playing;
        self.transcript = None;
        if !self.cheat_used {
            self.headline = Headline::Playing;
        }
        log::debug!("Round reset");
    }

    /// Pick a new target and start over
    pub fn new_round(&mut self) {
        if let Some(target) = self.config.answers().choose(&mut self.rng) {
            self.target = target.clone();
        }
        self.begin_round();
    }

    /// Cycle to the next difficulty
    ///
    /// Only allowed before the first guess of a round; returns whether
    /// anything changed.
    pub fn toggle_difficulty(&mut self) -> bool {
        let next = (self.difficulty + 1) % self.config.difficulties().len();
        self.set_difficulty(next)
    }

    /// Switch to difficulty `index`, under the same rule as
    /// [`toggle_difficulty`](Self::toggle_difficulty)
    pub fn set_difficulty(&mut self, index: usize) -> bool {
        if self.guess_count != Some(0) || index >= self.config.difficulties().len() {
            log::debug!("Difficulty change refused");
            return false;
        }
        self.difficulty = index;
        self.rebuild_matrix();
        log::debug!("Difficulty set to {}", self.difficulty().name);
        true
    }

    /// Switch to a difficulty by name
    ///
    /// # Errors
    /// Returns `GameError::UnknownDifficulty` if no difficulty has that name.
    pub fn set_difficulty_by_name(&mut self, name: &str) -> Result<bool> {
        let index = self
            .config
            .difficulty_index(name)
            .ok_or_else(|| GameError::UnknownDifficulty(name.to_string()))?;
        Ok(self.set_difficulty(index))
    }

    /// Show or hide the target reference panel
    ///
    /// Any use marks the round as cheated.
    pub fn toggle_cheat(&mut self) {
        self.cheat_visible = !self.cheat_visible;
        self.cheat_used = true;
        self.headline = Headline::Cheated;
        log::debug!("Cheat panel visible: {}", self.cheat_visible);
    }
}
