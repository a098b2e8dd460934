//! Per-session round statistics

/// Counts of finished rounds
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Statistics {
    pub rounds_played: usize,
    pub rounds_won: usize,
    pub rounds_cheated: usize,
    pub rounds_lost: usize,
    /// `wins_by_guesses[n]` counts genuine wins that took `n` guesses
    pub wins_by_guesses: Vec<usize>,
}

impl Statistics {
    pub(crate) fn record_win(&mut self, guesses: usize) {
        self.rounds_played += 1;
        self.rounds_won += 1;
        if self.wins_by_guesses.len() <= guesses {
            self.wins_by_guesses.resize(guesses + 1, 0);
        }
        self.wins_by_guesses[guesses] += 1;
    }

    pub(crate) fn record_cheated(&mut self) {
        self.rounds_played += 1;
        self.rounds_cheated += 1;
    }

    pub(crate) fn record_loss(&mut self) {
        self.rounds_played += 1;
        self.rounds_lost += 1;
    }

    /// Share of finished rounds won without cheating, in percent
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.rounds_played == 0 {
            0.0
        } else {
            self.rounds_won as f64 / self.rounds_played as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_outcomes() {
        let mut stats = Statistics::default();
        stats.record_win(3);
        stats.record_win(3);
        stats.record_loss();
        stats.record_cheated();

        assert_eq!(stats.rounds_played, 4);
        assert_eq!(stats.rounds_won, 2);
        assert_eq!(stats.wins_by_guesses, vec![0, 0, 0, 2]);
        assert!((stats.win_rate() - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_win_rate_is_zero() {
        assert!(Statistics::default().win_rate().abs() < f64::EPSILON);
    }
}
