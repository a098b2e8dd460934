//! Guess matrix
//!
//! A `rows x cols` grid of cells. Rows are reference counted so that a
//! modified matrix shares every untouched row with the matrix it came from,
//! observable through [`GuessMatrix::row_shared`].

use super::cell::Cell;
use std::rc::Rc;

/// Grid of guess cells, one row per attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessMatrix {
    rows: Vec<Rc<Vec<Cell>>>,
    cols: usize,
}

impl GuessMatrix {
    /// Create a blank `rows x cols` matrix
    ///
    /// Zero rows or zero columns give empty sequences.
    ///
    /// # Examples
    /// ```
    /// use nerdle::core::{Cell, GuessMatrix};
    ///
    /// let matrix = GuessMatrix::create(6, 8);
    /// assert_eq!(matrix.rows(), 6);
    /// assert_eq!(matrix.cols(), 8);
    /// assert!(matrix.iter_rows().flatten().all(|cell| *cell == Cell::BLANK));
    /// ```
    #[must_use]
    pub fn create(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| Rc::new(vec![Cell::BLANK; cols])).collect(),
            cols,
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn row(&self, row: usize) -> Option<&[Cell]> {
        self.rows.get(row).map(|cells| cells.as_slice())
    }

    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.rows.iter().map(|cells| cells.as_slice())
    }

    /// Return a copy with exactly one cell replaced
    ///
    /// Out-of-range positions return an unchanged copy.
    #[must_use]
    pub fn with_cell(&self, row: usize, col: usize, cell: Cell) -> Self {
        let mut next = self.clone();
        next.set(row, col, cell);
        next
    }

    /// Return a copy with a whole row replaced
    ///
    /// `cells` must have exactly `cols` entries, otherwise the copy is unchanged.
    #[must_use]
    pub fn with_row(&self, row: usize, cells: Vec<Cell>) -> Self {
        let mut next = self.clone();
        if row < next.rows.len() && cells.len() == self.cols {
            next.rows[row] = Rc::new(cells);
        }
        next
    }

    /// Whether `row` is the same allocation in both matrices
    #[must_use]
    pub fn row_shared(&self, other: &Self, row: usize) -> bool {
        match (self.rows.get(row), other.rows.get(row)) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    fn set(&mut self, row: usize, col: usize, cell: Cell) {
        if let Some(cells) = self.rows.get_mut(row)
            && col < cells.len()
        {
            // Clones the row only when another matrix still holds it
            Rc::make_mut(cells)[col] = cell;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CellState;
    use proptest::prelude::*;

    #[test]
    fn create_zero_rows_or_cols() {
        let no_rows = GuessMatrix::create(0, 5);
        assert_eq!(no_rows.rows(), 0);
        assert_eq!(no_rows.iter_rows().count(), 0);

        let no_cols = GuessMatrix::create(3, 0);
        assert_eq!(no_cols.rows(), 3);
        assert!(no_cols.iter_rows().all(<[Cell]>::is_empty));
    }

    #[test]
    fn with_cell_changes_exactly_one_cell() {
        let matrix = GuessMatrix::create(3, 4);
        let next = matrix.with_cell(1, 2, Cell::typed('7'));

        assert_eq!(matrix.cell(1, 2), Some(&Cell::BLANK));
        assert_eq!(next.cell(1, 2), Some(&Cell::typed('7')));

        let changed = matrix
            .iter_rows()
            .flatten()
            .zip(next.iter_rows().flatten())
            .filter(|(a, b)| a != b)
            .count();
        assert_eq!(changed, 1);
    }

    #[test]
    fn with_cell_shares_untouched_rows() {
        let matrix = GuessMatrix::create(3, 4);
        let next = matrix.with_cell(1, 0, Cell::typed('1'));

        assert!(next.row_shared(&matrix, 0));
        assert!(!next.row_shared(&matrix, 1));
        assert!(next.row_shared(&matrix, 2));
    }

    #[test]
    fn with_cell_out_of_range_is_unchanged() {
        let matrix = GuessMatrix::create(2, 2);
        assert_eq!(matrix.with_cell(5, 0, Cell::typed('1')), matrix);
        assert_eq!(matrix.with_cell(0, 5, Cell::typed('1')), matrix);
    }

    #[test]
    fn with_row_replaces_whole_row() {
        let matrix = GuessMatrix::create(2, 2);
        let row = vec![Cell::scored('1', CellState::Correct); 2];
        let next = matrix.with_row(0, row.clone());
        assert_eq!(next.row(0), Some(row.as_slice()));
        assert!(next.row_shared(&matrix, 1));

        // Wrong width is ignored
        assert_eq!(matrix.with_row(0, vec![Cell::BLANK]), matrix);
    }

    proptest! {
        #[test]
        fn create_has_requested_shape(rows in 0usize..12, cols in 0usize..12) {
            let matrix = GuessMatrix::create(rows, cols);
            prop_assert_eq!(matrix.rows(), rows);
            prop_assert_eq!(matrix.cols(), cols);
            for row in matrix.iter_rows() {
                prop_assert_eq!(row.len(), cols);
                prop_assert!(row.iter().all(|cell| *cell == Cell::BLANK));
            }
        }
    }
}
