//! TUI rendering with ratatui
//!
//! Draws the guess grid, the headline, the cheat panel and session status.

use super::app::{App, MessageStyle};
use crate::config::{Difficulty, LoadState};
use crate::core::{Cell, CellState};
use crate::game::{Game, Severity};
use crate::output::formatters::{cell_text, hex_to_rgb, transcript_to_emoji};
use rand::rngs::StdRng;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Keys
            Constraint::Length(3), // Status bar
        ])
        .split(f.area());

    render_header(f, chunks[0]);

    let Some(game) = app.game.as_ref() else {
        render_loading(f, app, chunks[1]);
        render_messages(f, app, chunks[2]);
        return;
    };

    // Main content area - split horizontally
    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(60), // Grid
            Constraint::Percentage(40), // Side panel
        ])
        .split(chunks[1]);

    render_grid(f, app, game, main_chunks[0]);
    render_side_panel(f, app, game, main_chunks[1]);
    render_keys(f, game, chunks[2]);
    render_status(f, game, chunks[3]);
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("🧮 NERDLE - Guess the Equation")
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_loading(f: &mut Frame, app: &App, area: Rect) {
    let source = app.loader.source_name();
    let (title, lines, color) = match app.loader.state() {
        LoadState::Failed(e) => (
            " Configuration Failed ",
            vec![
                Line::from(format!("Could not load {source}")),
                Line::from(Span::styled(
                    e.to_string(),
                    Style::default().fg(Color::Red),
                )),
                Line::from(""),
                Line::from(format!(
                    "Attempts: {} | Ctrl-R: retry | Esc: quit",
                    app.loader.attempts()
                )),
            ],
            Color::Red,
        ),
        _ => (
            " Loading ",
            vec![Line::from(format!("Loading configuration from {source}..."))],
            Color::Yellow,
        ),
    };

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(color)),
        );
    f.render_widget(paragraph, area);
}

fn cell_style(cell: &Cell) -> Style {
    match cell.state {
        CellState::Correct => Style::default()
            .fg(Color::Black)
            .bg(Color::Green)
            .add_modifier(Modifier::BOLD),
        CellState::PartiallyCorrect => Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        CellState::Incorrect => Style::default().fg(Color::White).bg(Color::DarkGray),
        CellState::Empty => Style::default().fg(Color::Red),
        CellState::Default => Style::default().fg(Color::White),
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Good => Color::Green,
        Severity::Warning => Color::Yellow,
        Severity::Bad => Color::Red,
    }
}

fn difficulty_color(difficulty: &Difficulty) -> Color {
    hex_to_rgb(&difficulty.color).map_or(Color::White, |(r, g, b)| Color::Rgb(r, g, b))
}

fn render_grid(f: &mut Frame, app: &App, game: &Game<StdRng>, area: Rect) {
    let headline = game.headline();
    let mut lines = vec![
        Line::from(Span::styled(
            headline.text(),
            Style::default()
                .fg(severity_color(headline.severity()))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    let active = game.guess_count();
    for (i, row) in game.matrix().iter_rows().enumerate() {
        let is_active = active == Some(i);
        let mut spans = vec![Span::styled(
            if is_active { "▶ " } else { "  " },
            Style::default().fg(Color::Cyan),
        )];
        for (col, cell) in row.iter().enumerate() {
            let mut style = cell_style(cell);
            if is_active && col == app.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!(" {} ", cell_text(cell)), style));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
        lines.push(Line::from(""));
    }

    let paragraph = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title(" Guesses ")
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(paragraph, area);
}

fn render_side_panel(f: &mut Frame, app: &App, game: &Game<StdRng>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(50), // Cheat / score
            Constraint::Percentage(50), // Messages
        ])
        .split(area);

    render_reference(f, game, chunks[0]);
    render_messages(f, app, chunks[1]);
}

fn render_reference(f: &mut Frame, game: &Game<StdRng>, area: Rect) {
    let (title, lines, color) = if let Some(target) = game.cheat_reveal() {
        let target: String = target.iter().collect();
        (
            " Cheat ",
            vec![
                Line::from("Target equation:"),
                Line::from(Span::styled(
                    target,
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
            ],
            Color::Red,
        )
    } else if let Some(transcript) = game.transcript() {
        let lines = transcript_to_emoji(transcript)
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect();
        (" Score ", lines, Color::Green)
    } else {
        (
            " Legend ",
            vec![
                Line::from(vec![
                    Span::styled(" 1 ", cell_style(&Cell::scored('1', CellState::Correct))),
                    Span::raw(" right place"),
                ]),
                Line::from(vec![
                    Span::styled(
                        " 1 ",
                        cell_style(&Cell::scored('1', CellState::PartiallyCorrect)),
                    ),
                    Span::raw(" elsewhere in the equation"),
                ]),
                Line::from(vec![
                    Span::styled(" 1 ", cell_style(&Cell::scored('1', CellState::Incorrect))),
                    Span::raw(" not in the equation"),
                ]),
            ],
            Color::Cyan,
        )
    };

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .style(Style::default().fg(color)),
    );
    f.render_widget(paragraph, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));

    f.render_widget(messages_list, area);
}

fn render_keys(f: &mut Frame, game: &Game<StdRng>, area: Rect) {
    let buttons = game.config().buttons();
    let mut keys = vec!["0-9 + - * / = ^", "←/→ move", "Enter submit", "Ctrl-N new"];
    if buttons.reset {
        keys.push("Ctrl-R reset");
    }
    if game.guess_count() == Some(0) {
        keys.push("Ctrl-T difficulty");
    }
    if buttons.cheat {
        keys.push("Ctrl-E cheat");
    }
    keys.push("Esc quit");

    let help = Paragraph::new(keys.join(" | "))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double),
        );
    f.render_widget(help, area);
}

fn render_status(f: &mut Frame, game: &Game<StdRng>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let difficulty = game.difficulty();
    let mode = Paragraph::new(Line::from(vec![
        Span::raw("Difficulty: "),
        Span::styled(
            difficulty.label(),
            Style::default()
                .fg(difficulty_color(difficulty))
                .add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(mode, chunks[0]);

    let row_text = match game.guess_count() {
        Some(row) => format!("Guess {} of {}", row + 1, game.row_budget()),
        None => "Round over".to_string(),
    };
    let rows = Paragraph::new(row_text).alignment(Alignment::Center);
    f.render_widget(rows, chunks[1]);

    let stats = game.stats();
    let stats_text = format!(
        "Rounds: {} | Win Rate: {:.0}%",
        stats.rounds_played,
        stats.win_rate()
    );
    let stats = Paragraph::new(stats_text).alignment(Alignment::Center);
    f.render_widget(stats, chunks[2]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, EmbeddedSource};
    use ratatui::{Terminal, backend::TestBackend};

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn renders_headline_and_difficulty() {
        let app = App::new(ConfigLoader::new(EmbeddedSource), Some(1), None);
        let screen = rendered(&app);
        assert!(screen.contains("[playing...]"));
        assert!(screen.contains("Easy"));
        assert!(screen.contains("Guess 1 of 6"));
    }

    #[test]
    fn renders_failed_configuration() {
        let app = App::new(
            ConfigLoader::new(crate::config::FileSource::new("/nonexistent/pool.json")),
            None,
            None,
        );
        let screen = rendered(&app);
        assert!(screen.contains("Configuration Failed"));
        assert!(screen.contains("Ctrl-R: retry"));
    }

    #[test]
    fn hex_colors_map_to_rgb() {
        let difficulty = Difficulty::new("easy", 6, "#99fc37");
        assert_eq!(difficulty_color(&difficulty), Color::Rgb(0x99, 0xfc, 0x37));
        let plain = Difficulty::new("plain", 6, "green");
        assert_eq!(difficulty_color(&plain), Color::White);
    }
}
