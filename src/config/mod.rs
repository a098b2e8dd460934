//! Game configuration
//!
//! The configuration document carries the answer pool, the difficulty table
//! and which optional buttons the front-end shows. It is parsed with serde and
//! validated into a [`GameConfig`] once, then handed to each game instance.

mod embedded;
pub mod loader;

pub use embedded::{ANSWERS, ANSWERS_COUNT};
pub use loader::{ConfigLoader, ConfigSource, EmbeddedSource, FileSource, LoadState};

use crate::core::{Equation, EquationError, ScoringRule};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced while fetching or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("could not read configuration from {source_name}: {message}")]
    Fetch {
        source_name: String,
        message: String,
    },
    #[error("malformed configuration document: {0}")]
    Parse(String),
    #[error("difficulty table is empty")]
    NoDifficulties,
    #[error("difficulty '{0}' must allow at least one guess")]
    ZeroRows(String),
    #[error("answer pool has no valid equations ({rejected} rejected)")]
    NoValidAnswers { rejected: usize },
}

/// One entry of the difficulty table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: String,
    #[serde(rename = "rowCount", alias = "ROWS", alias = "rows")]
    pub rows: usize,
    #[serde(default)]
    pub color: String,
}

impl Difficulty {
    #[must_use]
    pub fn new(name: &str, rows: usize, color: &str) -> Self {
        Self {
            name: name.to_string(),
            rows,
            color: color.to_string(),
        }
    }

    /// Name with the first letter capitalized, for button labels
    #[must_use]
    pub fn label(&self) -> String {
        let mut chars = self.name.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }
}

/// Default difficulty table, easiest first
#[must_use]
pub fn default_difficulties() -> Vec<Difficulty> {
    vec![
        Difficulty::new("easy", 6, "#99fc37"),
        Difficulty::new("amateur", 5, "#cafc25"),
        Difficulty::new("medium", 4, "#fcd825"),
        Difficulty::new("hard", 3, "#f77171"),
        Difficulty::new("very-hard", 2, "#ef4343"),
        Difficulty::new("extreme", 1, "#dc2626"),
    ]
}

/// Visibility of optional front-end buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonsConfig {
    #[serde(rename = "resetVisible", alias = "reset", default = "visible")]
    pub reset: bool,
    #[serde(rename = "cheatVisible", alias = "cheat", default = "visible")]
    pub cheat: bool,
}

const fn visible() -> bool {
    true
}

impl Default for ButtonsConfig {
    fn default() -> Self {
        Self {
            reset: true,
            cheat: true,
        }
    }
}

/// Engine behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub scoring: ScoringRule,
    /// Accept a space as a typed character
    pub allow_whitespace: bool,
}

/// Raw configuration document as delivered by a [`ConfigSource`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigDocument {
    pub answers: Vec<String>,
    #[serde(default = "default_difficulties")]
    pub difficulty_config: Vec<Difficulty>,
    #[serde(default)]
    pub buttons_config: ButtonsConfig,
    #[serde(default)]
    pub options: EngineOptions,
}

impl ConfigDocument {
    /// Parse a JSON document
    ///
    /// # Errors
    /// Returns `ConfigError::Parse` when the JSON is malformed or misses the
    /// answer list.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Document built from the embedded answer pool and default tables
    #[must_use]
    pub fn embedded() -> Self {
        Self {
            answers: ANSWERS.iter().map(|&s| s.to_string()).collect(),
            difficulty_config: default_difficulties(),
            buttons_config: ButtonsConfig::default(),
            options: EngineOptions::default(),
        }
    }
}

/// Validated configuration owned by a game instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    answers: Vec<Equation>,
    rejected: Vec<String>,
    difficulties: Vec<Difficulty>,
    buttons: ButtonsConfig,
    options: EngineOptions,
}

impl GameConfig {
    /// Validate a document
    ///
    /// Answers that are not valid equations, or that the keypad cannot type,
    /// are dropped and logged; the config is still usable as long as at least
    /// one answer survives.
    ///
    /// # Errors
    /// Returns `ConfigError` when the difficulty table is empty, a difficulty
    /// allows zero guesses, or no answer is a valid equation.
    pub fn from_document(document: ConfigDocument) -> Result<Self, ConfigError> {
        if document.difficulty_config.is_empty() {
            return Err(ConfigError::NoDifficulties);
        }
        if let Some(bad) = document.difficulty_config.iter().find(|d| d.rows == 0) {
            return Err(ConfigError::ZeroRows(bad.name.clone()));
        }

        let mut answers = Vec::with_capacity(document.answers.len());
        let mut rejected = Vec::new();
        let allow_whitespace = document.options.allow_whitespace;
        for raw in document.answers {
            match validate_answer(&raw, allow_whitespace) {
                Ok(equation) => answers.push(equation),
                Err(e) => {
                    log::warn!("Dropping answer {:?}: {e}", raw.trim());
                    rejected.push(raw);
                }
            }
        }

        if answers.is_empty() {
            return Err(ConfigError::NoValidAnswers {
                rejected: rejected.len(),
            });
        }

        log::debug!(
            "Configuration ready: {} answers, {} difficulties",
            answers.len(),
            document.difficulty_config.len()
        );

        Ok(Self {
            answers,
            rejected,
            difficulties: document.difficulty_config,
            buttons: document.buttons_config,
            options: document.options,
        })
    }

    /// Built-in configuration
    ///
    /// # Errors
    /// Only fails if the embedded answer list has no valid equation.
    pub fn embedded() -> Result<Self, ConfigError> {
        Self::from_document(ConfigDocument::embedded())
    }

    #[must_use]
    pub fn answers(&self) -> &[Equation] {
        &self.answers
    }

    /// Raw entries that failed validation
    #[must_use]
    pub fn rejected_answers(&self) -> &[String] {
        &self.rejected
    }

    #[must_use]
    pub fn difficulties(&self) -> &[Difficulty] {
        &self.difficulties
    }

    #[must_use]
    pub fn buttons(&self) -> ButtonsConfig {
        self.buttons
    }

    #[must_use]
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Override the scoring rule
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringRule) -> Self {
        self.options.scoring = scoring;
        self
    }

    /// Index of the difficulty called `name` (case-insensitive)
    #[must_use]
    pub fn difficulty_index(&self, name: &str) -> Option<usize> {
        self.difficulties
            .iter()
            .position(|d| d.name.eq_ignore_ascii_case(name))
    }
}

/// Validate one raw pool entry the way a game would
///
/// The entry is trimmed, must be a valid equation and must be typable on the
/// keypad under `allow_whitespace`.
///
/// # Errors
/// Returns the first `EquationError` that makes the entry unplayable.
pub fn validate_answer(raw: &str, allow_whitespace: bool) -> Result<Equation, EquationError> {
    let equation = Equation::new(raw.trim())?;
    equation.ensure_typable(allow_whitespace)?;
    Ok(equation)
}
