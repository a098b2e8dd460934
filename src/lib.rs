//! Nerdle
//!
//! An equation guessing game: find the hidden equation in a limited number of
//! guesses, with each cell scored as correct, misplaced or absent.
//!
//! # Quick Start
//!
//! ```rust
//! use nerdle::config::GameConfig;
//! use nerdle::game::{Game, GuessOutcome};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! let config = GameConfig::embedded().unwrap();
//! let mut game = Game::with_target(config, "12+34=46", StdRng::seed_from_u64(1)).unwrap();
//!
//! for ch in "12+34=46".chars() {
//!     game.push_char(ch);
//! }
//! assert!(matches!(game.submit(), GuessOutcome::Won { .. }));
//! ```

// Core domain types
pub mod core;

// Round state machine
pub mod game;

// Answer pool and difficulty configuration
pub mod config;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;

// Stderr logger for the log facade
pub mod logging;
