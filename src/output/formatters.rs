//! Formatting utilities for terminal output

use crate::core::{Cell, CellState};
use crate::game::Transcript;

/// Glyph for one transcript code
#[must_use]
pub const fn code_to_emoji(code: i8) -> char {
    match code {
        2 => '🟩',
        1 => '🟨',
        0 => '⬛',
        _ => '⬜',
    }
}

/// Format the played rows of a transcript as emoji lines
///
/// # Examples
/// ```
/// use nerdle::core::{Cell, CellState, GuessMatrix};
/// use nerdle::game::Transcript;
/// use nerdle::output::formatters::transcript_to_emoji;
///
/// let matrix = GuessMatrix::create(2, 3)
///     .with_row(0, vec![Cell::scored('1', CellState::Correct); 3]);
/// assert_eq!(transcript_to_emoji(&Transcript::from_matrix(&matrix)), "🟩🟩🟩");
/// ```
#[must_use]
pub fn transcript_to_emoji(transcript: &Transcript) -> String {
    transcript
        .played_rows()
        .map(|row| row.iter().map(|&code| code_to_emoji(code)).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Character shown for a cell, with blanks drawn as a dot
#[must_use]
pub fn cell_text(cell: &Cell) -> char {
    match (cell.value, cell.state) {
        (Some(ch), _) => ch,
        (None, CellState::Empty) => '_',
        (None, _) => '·',
    }
}

/// Parse `#rrggbb` into components
#[must_use]
pub fn hex_to_rgb(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Create a progress bar string
#[must_use]
pub fn create_progress_bar(value: f64, max: f64, width: usize) -> String {
    if max <= 0.0 {
        return "░".repeat(width);
    }
    // Cast is safe: values are clamped to [0, width]
    let filled = ((value / max) * width as f64).max(0.0) as usize;
    let filled = filled.min(width);

    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GuessMatrix;

    #[test]
    fn transcript_emoji_skips_unplayed_rows() {
        let matrix = GuessMatrix::create(3, 3)
            .with_row(
                0,
                vec![
                    Cell::scored('1', CellState::Incorrect),
                    Cell::scored('+', CellState::PartiallyCorrect),
                    Cell::scored('2', CellState::Correct),
                ],
            )
            .with_row(1, vec![Cell::scored('1', CellState::Correct); 3]);

        let text = transcript_to_emoji(&Transcript::from_matrix(&matrix));
        assert_eq!(text, "⬛🟨🟩\n🟩🟩🟩");
    }

    #[test]
    fn cell_text_variants() {
        assert_eq!(cell_text(&Cell::typed('7')), '7');
        assert_eq!(cell_text(&Cell::empty()), '_');
        assert_eq!(cell_text(&Cell::BLANK), '·');
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#99fc37"), Some((0x99, 0xfc, 0x37)));
        assert_eq!(hex_to_rgb("99fc37"), None);
        assert_eq!(hex_to_rgb("#99fc3"), None);
        assert_eq!(hex_to_rgb("#zzzzzz"), None);
        assert_eq!(hex_to_rgb(""), None);
    }

    #[test]
    fn progress_bar_empty() {
        let bar = create_progress_bar(0.0, 100.0, 10);
        assert_eq!(bar, "░░░░░░░░░░");
    }

    #[test]
    fn progress_bar_full() {
        let bar = create_progress_bar(100.0, 100.0, 10);
        assert_eq!(bar, "██████████");
    }

    #[test]
    fn progress_bar_half() {
        let bar = create_progress_bar(50.0, 100.0, 10);
        assert_eq!(bar, "█████░░░░░");
    }

    #[test]
    fn progress_bar_zero_max() {
        assert_eq!(create_progress_bar(5.0, 0.0, 4), "░░░░");
    }
}
