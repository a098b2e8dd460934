//! Display functions for the game and command results

use super::formatters::{cell_text, create_progress_bar, hex_to_rgb, transcript_to_emoji};
use crate::commands::{AuditReport, CheckResult};
use crate::config::Difficulty;
use crate::core::{Cell, CellState, GuessMatrix};
use crate::game::{Headline, Severity, Statistics, Transcript};
use colored::{ColoredString, Colorize};

fn paint_cell(cell: &Cell) -> ColoredString {
    let text = format!(" {} ", cell_text(cell));
    match cell.state {
        CellState::Correct => text.black().on_green().bold(),
        CellState::PartiallyCorrect => text.black().on_yellow().bold(),
        CellState::Incorrect => text.white().on_bright_black(),
        CellState::Empty => text.red(),
        CellState::Default => text.bright_white(),
    }
}

/// Difficulty label in its configured color
#[must_use]
pub fn paint_difficulty(difficulty: &Difficulty) -> ColoredString {
    match hex_to_rgb(&difficulty.color) {
        Some((r, g, b)) => difficulty.label().truecolor(r, g, b).bold(),
        None => difficulty.label().bold(),
    }
}

/// Print the guess grid, marking the active row
pub fn print_matrix(matrix: &GuessMatrix, active: Option<usize>) {
    println!();
    for (i, row) in matrix.iter_rows().enumerate() {
        let marker = if active == Some(i) {
            "▶".cyan().bold()
        } else {
            " ".normal()
        };
        let cells: String = row.iter().map(|cell| paint_cell(cell).to_string()).collect();
        println!("  {marker} {cells}");
    }
    println!();
}

/// Print the round headline colored by severity
pub fn print_headline(headline: Headline) {
    let text = match headline.severity() {
        Severity::Good => headline.text().green().bold(),
        Severity::Warning => headline.text().yellow().bold(),
        Severity::Bad => headline.text().red().bold(),
    };
    println!("  {text}");
}

/// Print a win transcript as emoji rows
pub fn print_transcript(transcript: &Transcript) {
    println!("\n  Score:");
    for line in transcript_to_emoji(transcript).lines() {
        println!("    {line}");
    }
}

/// Print session statistics
pub fn print_stats(stats: &Statistics) {
    println!("\n📊 {}", "Session:".bright_cyan().bold());
    println!("   Rounds played:  {}", stats.rounds_played);
    println!(
        "   Won:            {} ({:.0}%)",
        stats.rounds_won.to_string().green(),
        stats.win_rate()
    );
    println!("   Cheated:        {}", stats.rounds_cheated.to_string().yellow());
    println!("   Lost:           {}", stats.rounds_lost.to_string().red());

    let best = stats.wins_by_guesses.iter().copied().max().unwrap_or(0);
    for (guesses, &count) in stats.wins_by_guesses.iter().enumerate() {
        if count > 0 {
            let bar = create_progress_bar(count as f64, best as f64, 20);
            println!("   {guesses}: {} {count}", bar.green());
        }
    }
}

/// Print the verdict for each checked equation
pub fn print_check_results(results: &[CheckResult]) {
    for result in results {
        match &result.verdict {
            Ok(()) => println!(
                "{} {} {}",
                "✓".green().bold(),
                result.text.bright_white().bold(),
                format!("(= {})", result.left_value.as_deref().unwrap_or("?")).bright_black()
            ),
            Err(e) => println!(
                "{} {} {}",
                "✗".red().bold(),
                result.text.bright_white().bold(),
                e.to_string().red()
            ),
        }
    }
}

/// Print an answer pool audit
pub fn print_audit_report(report: &AuditReport) {
    println!("\n{}", "═".repeat(60).cyan());
    println!(" {} ", "ANSWER POOL AUDIT".bright_cyan().bold());
    println!("{}", "═".repeat(60).cyan());

    println!("\n📋 {}", "Pool:".bright_cyan().bold());
    println!("   Source:       {}", report.source);
    println!("   Entries:      {}", report.total);
    println!("   Valid:        {}", report.valid.to_string().green().bold());
    println!(
        "   Invalid:      {}",
        if report.invalid.is_empty() {
            "0".green()
        } else {
            report.invalid.len().to_string().red().bold()
        }
    );
    println!(
        "   Duplicates:   {}",
        if report.duplicates.is_empty() {
            "0".green()
        } else {
            report.duplicates.len().to_string().yellow()
        }
    );
    println!("   Time taken:   {:.3}s", report.duration.as_secs_f64());

    if !report.length_distribution.is_empty() {
        println!("\n📈 {}", "Length distribution:".bright_cyan().bold());
        let mut lengths: Vec<_> = report.length_distribution.iter().collect();
        lengths.sort_unstable();
        for (len, &count) in lengths {
            let bar = create_progress_bar(count as f64, report.valid as f64, 30);
            println!("   {len:2}: {} {count:4}", bar.green());
        }
    }

    println!("\n🎚  {}", "Difficulties:".bright_cyan().bold());
    for difficulty in &report.difficulties {
        println!(
            "   {:<12} {} guesses",
            paint_difficulty(difficulty),
            difficulty.rows
        );
    }

    if !report.invalid.is_empty() {
        println!("\n❌ {}", "Rejected entries:".red().bold());
        for (entry, reason) in &report.invalid {
            println!("   {:<16} {}", entry.bright_white(), reason.bright_black());
        }
    }

    if !report.duplicates.is_empty() {
        println!("\n⚠  {}", "Duplicated entries:".yellow().bold());
        for entry in &report.duplicates {
            println!("   {entry}");
        }
    }

    println!();
    if report.is_playable() {
        println!("{}", "✅ Pool is playable".green().bold());
    } else {
        println!("{}", "❌ Pool cannot start a game".red().bold());
    }
}
