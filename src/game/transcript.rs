//! Numeric score transcript
//!
//! Each cell maps to a code: 2 correct, 1 partially correct, 0 incorrect,
//! -1 anything else. Turning codes into glyphs is left to the front-end.

use crate::core::GuessMatrix;

/// Score codes for every cell of a finished round, in row order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    rows: Vec<Vec<i8>>,
}

impl Transcript {
    /// Encode every cell of `matrix`
    #[must_use]
    pub fn from_matrix(matrix: &GuessMatrix) -> Self {
        Self {
            rows: matrix
                .iter_rows()
                .map(|row| row.iter().map(|cell| cell.state.score_code()).collect())
                .collect(),
        }
    }

    /// All rows, including unplayed ones
    #[must_use]
    pub fn rows(&self) -> &[Vec<i8>] {
        &self.rows
    }

    /// Rows that hold at least one scored cell
    pub fn played_rows(&self) -> impl Iterator<Item = &[i8]> {
        self.rows
            .iter()
            .filter(|row| row.iter().any(|&code| code >= 0))
            .map(Vec::as_slice)
    }

    /// Number of guesses it took
    #[must_use]
    pub fn guesses(&self) -> usize {
        self.played_rows().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Cell, CellState};

    #[test]
    fn encodes_cells_and_skips_unplayed_rows() {
        let matrix = GuessMatrix::create(3, 2)
            .with_row(
                0,
                vec![
                    Cell::scored('1', CellState::Incorrect),
                    Cell::scored('2', CellState::PartiallyCorrect),
                ],
            )
            .with_row(1, vec![Cell::scored('1', CellState::Correct); 2]);

        let transcript = Transcript::from_matrix(&matrix);
        assert_eq!(
            transcript.rows(),
            &[vec![0, 1], vec![2, 2], vec![-1, -1]]
        );

        let played: Vec<&[i8]> = transcript.played_rows().collect();
        assert_eq!(played, vec![&[0, 1][..], &[2, 2][..]]);
        assert_eq!(transcript.guesses(), 2);
    }

    #[test]
    fn all_incorrect_row_still_counts() {
        let matrix =
            GuessMatrix::create(1, 2).with_row(0, vec![Cell::scored('9', CellState::Incorrect); 2]);
        assert_eq!(Transcript::from_matrix(&matrix).guesses(), 1);
    }
}
