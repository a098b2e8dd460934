//! Round status message shown above the grid

use std::fmt;

/// How alarming a headline is, for coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Good,
    Warning,
    Bad,
}

/// Status message for the current round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Headline {
    Playing,
    /// Submitted row had blank cells
    Incomplete,
    /// Submitted row is not a valid equation
    InvalidEquation,
    Won,
    /// Cheat panel was opened this round
    Cheated,
    Lost,
}

impl Headline {
    #[must_use]
    pub const fn text(self) -> &'static str {
        match self {
            Self::Playing => "[playing...]",
            Self::Incomplete => "[Incomplete...]",
            Self::InvalidEquation => "[Invalid Equation]",
            Self::Won => "[Won...]",
            Self::Cheated => "[Cheat used...]",
            Self::Lost => "[Lost...]",
        }
    }

    #[must_use]
    pub const fn severity(self) -> Severity {
        match self {
            Self::Playing | Self::Won => Severity::Good,
            Self::Incomplete => Severity::Warning,
            Self::InvalidEquation | Self::Cheated | Self::Lost => Severity::Bad,
        }
    }
}

impl fmt::Display for Headline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severities() {
        assert_eq!(Headline::Playing.severity(), Severity::Good);
        assert_eq!(Headline::Won.severity(), Severity::Good);
        assert_eq!(Headline::Incomplete.severity(), Severity::Warning);
        assert_eq!(Headline::Cheated.severity(), Severity::Bad);
        assert_eq!(Headline::Lost.severity(), Severity::Bad);
    }

    #[test]
    fn display_uses_text() {
        assert_eq!(Headline::Won.to_string(), "[Won...]");
        assert_eq!(Headline::InvalidEquation.to_string(), "[Invalid Equation]");
    }
}
