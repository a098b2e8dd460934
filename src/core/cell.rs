//! Grid cell representation

/// Classification of a single cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellState {
    /// Untouched or being edited
    #[default]
    Default,
    /// Right character in the right column
    Correct,
    /// Character appears elsewhere in the target
    PartiallyCorrect,
    /// Character does not appear in the target
    Incorrect,
    /// Submitted while blank
    Empty,
}

impl CellState {
    /// Numeric code used by the score transcript
    #[must_use]
    pub const fn score_code(self) -> i8 {
        match self {
            Self::Correct => 2,
            Self::PartiallyCorrect => 1,
            Self::Incorrect => 0,
            Self::Default | Self::Empty => -1,
        }
    }
}

/// A single grid cell: optional character plus its state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub value: Option<char>,
    pub state: CellState,
}

impl Cell {
    /// Blank, editable cell
    pub const BLANK: Self = Self {
        value: None,
        state: CellState::Default,
    };

    /// Cell holding a freshly typed character
    #[must_use]
    pub const fn typed(ch: char) -> Self {
        Self {
            value: Some(ch),
            state: CellState::Default,
        }
    }

    /// Cell that was blank at submission time
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            value: None,
            state: CellState::Empty,
        }
    }

    #[must_use]
    pub const fn scored(ch: char, state: CellState) -> Self {
        Self {
            value: Some(ch),
            state,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.value.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_codes() {
        assert_eq!(CellState::Correct.score_code(), 2);
        assert_eq!(CellState::PartiallyCorrect.score_code(), 1);
        assert_eq!(CellState::Incorrect.score_code(), 0);
        assert_eq!(CellState::Default.score_code(), -1);
        assert_eq!(CellState::Empty.score_code(), -1);
    }

    #[test]
    fn blank_cell_defaults() {
        assert_eq!(Cell::default(), Cell::BLANK);
        assert!(Cell::BLANK.is_blank());
        assert!(!Cell::typed('7').is_blank());
        assert_eq!(Cell::empty().state, CellState::Empty);
    }
}
