//! Simple interactive CLI mode
//!
//! Line-based game without TUI: each line is a whole guess or a command.

use crate::game::{EntryOutcome, Game, GuessOutcome, RejectReason};
use crate::output::{
    paint_difficulty, print_headline, print_matrix, print_stats, print_transcript,
};
use anyhow::Result;
use colored::Colorize;
use rand::Rng;
use std::io::{self, Write};

/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    NewRound,
    Reset,
    Difficulty,
    Cheat,
    Help,
    Guess(String),
}

/// Interpret a line; blank lines yield `None`
#[must_use]
pub fn parse_command(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let command = match line.to_lowercase().as_str() {
        "quit" | "q" | "exit" => Command::Quit,
        "new" | "n" => Command::NewRound,
        "reset" | "r" => Command::Reset,
        "difficulty" | "d" => Command::Difficulty,
        "cheat" | "c" => Command::Cheat,
        "help" | "h" | "?" => Command::Help,
        _ => Command::Guess(line.to_string()),
    };
    Some(command)
}

/// What happened to a typed guess
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuessReport {
    /// Characters the keypad would not accept, or that overflowed the row
    pub rejected: Vec<char>,
    pub outcome: GuessOutcome,
}

/// Type `text` into the active row, replacing its contents, then submit
pub fn play_guess<R: Rng>(game: &mut Game<R>, text: &str) -> GuessReport {
    while game.delete().is_some() {}

    let rejected = text
        .chars()
        .filter(|&ch| match game.push_char(ch) {
            EntryOutcome::Accepted { .. } | EntryOutcome::Rejected(RejectReason::RoundOver) => {
                false
            }
            EntryOutcome::Rejected(_) => true,
        })
        .collect();

    GuessReport {
        rejected,
        outcome: game.submit(),
    }
}

/// Run the simple interactive CLI mode
///
/// # Errors
///
/// Returns an error if reading input or flushing stdout fails.
pub fn run_simple<R: Rng>(game: &mut Game<R>) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║              Nerdle - Interactive Mode                       ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    println!("Guess the hidden equation. Type a whole equation and press Enter.");
    print_legend();
    print_help(game);

    loop {
        print_round(game);

        let Some(line) = get_user_input("Guess")? else {
            break;
        };
        let Some(command) = parse_command(&line) else {
            continue;
        };

        match command {
            Command::Quit => break,
            Command::Help => print_help(game),
            Command::NewRound => {
                game.new_round();
                println!("\n🔄 New round started!");
            }
            Command::Reset => {
                if game.config().buttons().reset {
                    game.reset();
                    println!("\n↺ Grid cleared.");
                } else {
                    println!("{}", "Reset is disabled.".red());
                }
            }
            Command::Difficulty => {
                if game.toggle_difficulty() {
                    println!(
                        "\nDifficulty: {} ({} guesses)",
                        paint_difficulty(game.difficulty()),
                        game.row_budget()
                    );
                } else {
                    println!(
                        "{}",
                        "Difficulty can only change before the first guess.".yellow()
                    );
                }
            }
            Command::Cheat => {
                if game.config().buttons().cheat {
                    game.toggle_cheat();
                } else {
                    println!("{}", "Cheat is disabled.".red());
                }
            }
            Command::Guess(text) => {
                let report = play_guess(game, &text);
                report_guess(game, &report);
            }
        }
    }

    print_stats(game.stats());
    println!("\n👋 Thanks for playing!\n");
    Ok(())
}

fn report_guess<R: Rng>(game: &Game<R>, report: &GuessReport) {
    if !report.rejected.is_empty() {
        let ignored: String = report.rejected.iter().collect();
        println!("{} {ignored:?}", "Ignored characters:".yellow());
    }

    match &report.outcome {
        GuessOutcome::Ignored => {
            println!("Round is over. Type 'new' to play again.");
        }
        GuessOutcome::Incomplete { blanks } => {
            println!(
                "{}",
                format!("{blanks} of {} cells are blank.", game.cols()).yellow()
            );
        }
        GuessOutcome::InvalidEquation => {
            println!("{}", "That is not a valid equation.".red());
        }
        GuessOutcome::Scored { .. } => {}
        GuessOutcome::Won { transcript } => {
            print_matrix(game.matrix(), None);
            println!("\n{}", "═".repeat(62).bright_cyan());
            println!(
                "{}",
                "        🎉  E Q U A T I O N   S O L V E D !  🎉".bright_green().bold()
            );
            println!("{}", "═".repeat(62).bright_cyan());
            print_transcript(transcript);
            println!("\nType 'new' for another round.");
        }
        GuessOutcome::WonWithCheat => {
            print_matrix(game.matrix(), None);
            println!("{}", "Solved, with a little help.".yellow().bold());
            println!("Type 'new' for another round.");
        }
        GuessOutcome::Lost => {
            print_matrix(game.matrix(), None);
            println!("{}", "Out of guesses!".red().bold());
            println!("Type 'new' for another round.");
        }
    }
}

fn print_round<R: Rng>(game: &Game<R>) {
    if game.is_over() {
        return;
    }
    println!(
        "\n{} · {} guesses · {} columns",
        paint_difficulty(game.difficulty()),
        game.row_budget(),
        game.cols()
    );
    print_matrix(game.matrix(), game.guess_count());
    print_headline(game.headline());
    if let Some(target) = game.cheat_reveal() {
        let target: String = target.iter().collect();
        println!("  {} {}", "Target:".bright_black(), target.bright_white().bold());
    }
}

fn print_legend() {
    println!(
        "  {} right place   {} elsewhere in the equation   {} not in the equation\n",
        " 1 ".black().on_green().bold(),
        " 1 ".black().on_yellow().bold(),
        " 1 ".white().on_bright_black()
    );
}

fn print_help<R: Rng>(game: &Game<R>) {
    let buttons = game.config().buttons();
    let mut commands = vec!["'new'", "'difficulty'"];
    if buttons.reset {
        commands.push("'reset'");
    }
    if buttons.cheat {
        commands.push("'cheat'");
    }
    commands.push("'quit'");
    println!("Commands: {}\n", commands.join(", "));
}

/// Read one line; `None` at end of input
fn get_user_input(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}: ");
    io::stdout().flush()?;

    let mut input = String::new();
    if io::stdin().read_line(&mut input)? == 0 {
        return Ok(None);
    }
    Ok(Some(input.trim().to_string()))
}
