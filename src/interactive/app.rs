//! TUI application state and logic

use crate::config::{ConfigLoader, LoadState};
use crate::game::{EntryOutcome, Game, GuessOutcome, RejectReason};
use crate::logging;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Application state
pub struct App {
    pub loader: ConfigLoader,
    /// Present once configuration is ready
    pub game: Option<Game<StdRng>>,
    /// Column of the active row that receives the next character
    pub cursor: usize,
    pub messages: Vec<Message>,
    pub should_quit: bool,
    seed: Option<u64>,
    difficulty: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

impl App {
    /// Create the app and attempt the first configuration load
    ///
    /// `seed` makes target selection reproducible; `difficulty` names the
    /// starting difficulty.
    #[must_use]
    pub fn new(loader: ConfigLoader, seed: Option<u64>, difficulty: Option<String>) -> Self {
        let mut app = Self {
            loader,
            game: None,
            cursor: 0,
            messages: Vec::new(),
            should_quit: false,
            seed,
            difficulty,
        };
        app.loader.load();
        app.start_game();
        app
    }

    fn start_game(&mut self) {
        let Some(config) = self.loader.config() else {
            if let LoadState::Failed(e) = self.loader.state() {
                let text = format!("{e}");
                self.add_message(&text, MessageStyle::Error);
            }
            return;
        };

        let rng = self
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        match Game::new(config.clone(), rng) {
            Ok(mut game) => {
                if let Some(name) = self.difficulty.as_deref()
                    && let Err(e) = game.set_difficulty_by_name(name)
                {
                    let text = format!("{e}");
                    self.add_message(&text, MessageStyle::Error);
                }
                self.game = Some(game);
                self.cursor = 0;
                self.add_message(
                    "Welcome! Type an equation and press Enter.",
                    MessageStyle::Info,
                );
            }
            Err(e) => {
                let text = format!("{e}");
                self.add_message(&text, MessageStyle::Error);
            }
        }
    }

    /// Re-fetch configuration after a failure
    pub fn retry_config(&mut self) {
        if !matches!(self.loader.state(), LoadState::Failed(_)) {
            return;
        }
        self.messages.clear();
        self.add_message("Retrying configuration...", MessageStyle::Info);
        self.loader.retry();
        self.start_game();
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// Apply one key press
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl && self.game.is_none() => self.retry_config(),
            _ if self.game.is_some() => self.handle_game_key(key.code, ctrl),
            _ => {}
        }
    }

    fn handle_game_key(&mut self, code: KeyCode, ctrl: bool) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let buttons = game.config().buttons();

        match code {
            KeyCode::Char('r') if ctrl => {
                if buttons.reset {
                    game.reset();
                    self.cursor = 0;
                    self.add_message("Grid cleared", MessageStyle::Info);
                }
            }
            KeyCode::Char('n') if ctrl => {
                game.new_round();
                self.cursor = 0;
                self.messages.clear();
                self.add_message("New round started!", MessageStyle::Info);
            }
            KeyCode::Char('t') if ctrl => {
                if game.toggle_difficulty() {
                    self.cursor = 0;
                    let text = format!(
                        "Difficulty: {} ({} guesses)",
                        game.difficulty().label(),
                        game.row_budget()
                    );
                    self.add_message(&text, MessageStyle::Info);
                } else {
                    self.add_message(
                        "Difficulty can only change before the first guess",
                        MessageStyle::Error,
                    );
                }
            }
            KeyCode::Char('e') if ctrl => {
                if buttons.cheat {
                    game.toggle_cheat();
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(game.cols().saturating_sub(1));
            }
            KeyCode::Backspace => {
                if let Some(col) = game.delete() {
                    self.cursor = col;
                }
            }
            KeyCode::Enter => self.submit(),
            KeyCode::Char(ch) if !ctrl => self.type_char(ch),
            _ => {}
        }
    }

    fn type_char(&mut self, ch: char) {
        let Some(game) = self.game.as_mut() else {
            return;
        };
        let Some(row) = game.guess_count() else {
            return;
        };

        match game.enter_char(ch, row, self.cursor) {
            EntryOutcome::Accepted { next_col, .. } => {
                if let Some(next) = next_col {
                    self.cursor = next;
                }
            }
            EntryOutcome::Rejected(RejectReason::InvalidChar(ch)) => {
                let text = format!("'{ch}' is not on the keypad");
                self.add_message(&text, MessageStyle::Error);
            }
            EntryOutcome::Rejected(_) => {}
        }
    }

    fn submit(&mut self) {
        let Some(game) = self.game.as_mut() else {
            return;
        };

        match game.submit() {
            GuessOutcome::Ignored => {
                self.add_message("Press Ctrl-N for a new round", MessageStyle::Info);
            }
            GuessOutcome::Incomplete { blanks } => {
                let text = format!("{blanks} blank cells");
                self.add_message(&text, MessageStyle::Error);
            }
            GuessOutcome::InvalidEquation => {
                self.add_message("Not a valid equation", MessageStyle::Error);
            }
            GuessOutcome::Scored { .. } => self.cursor = 0,
            GuessOutcome::Won { transcript } => {
                let celebration = match transcript.played_rows().count() {
                    1 => "🎯 HOLE IN ONE! Extraordinary! 🌟",
                    2 => "🔥 MAGNIFICENT! Two guesses! 🔥",
                    3 => "✨ SPLENDID! Three guesses! ✨",
                    4 => "👏 GREAT JOB! Four guesses! 👏",
                    5 => "🎉 NICE WORK! Five guesses! 🎉",
                    6 => "😅 PHEW! Got it in six! 😅",
                    _ => "🎊 SOLVED! 🎊",
                };
                self.add_message(celebration, MessageStyle::Success);
                self.add_message("Press Ctrl-N for a new round", MessageStyle::Info);
            }
            GuessOutcome::WonWithCheat => {
                self.add_message("Solved, with the cheat panel", MessageStyle::Info);
            }
            GuessOutcome::Lost => {
                self.add_message("Out of guesses! Ctrl-N to try again", MessageStyle::Error);
            }
        }
    }
}

/// Run the TUI application
///
/// Logging is muted while the interface owns the terminal.
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails or if there's an I/O error
/// during rendering or event handling.
pub fn run_tui(app: App) -> Result<()> {
    logging::muted(|| {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        // Run app
        let res = run_app(&mut terminal, app);

        // Restore terminal
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        if let Err(err) = res {
            eprintln!("Error: {err}");
        }

        Ok(())
    })
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    loop {
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (fixes Windows double-input bug)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key(key);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigDocument, ConfigError, ConfigSource, EmbeddedSource};
    use crate::game::RoundStatus;

    struct SingleAnswer(&'static str);

    impl ConfigSource for SingleAnswer {
        fn name(&self) -> String {
            "single".to_string()
        }

        fn fetch(&self) -> Result<ConfigDocument, ConfigError> {
            let mut document = ConfigDocument::embedded();
            document.answers = vec![self.0.to_string()];
            Ok(document)
        }
    }

    struct Unreachable;

    impl ConfigSource for Unreachable {
        fn name(&self) -> String {
            "unreachable".to_string()
        }

        fn fetch(&self) -> Result<ConfigDocument, ConfigError> {
            Err(ConfigError::Fetch {
                source_name: self.name(),
                message: "offline".to_string(),
            })
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn ctrl(app: &mut App, ch: char) {
        app.handle_key(KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL));
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    fn app(target: &'static str) -> App {
        App::new(ConfigLoader::new(SingleAnswer(target)), Some(3), None)
    }

    #[test]
    fn typing_and_submitting_wins() {
        let mut app = app("12+34=46");
        type_text(&mut app, "12+34=46");
        press(&mut app, KeyCode::Enter);

        let game = app.game.as_ref().unwrap();
        assert_eq!(game.status(), RoundStatus::Won);
        assert_eq!(
            app.messages.last().map(|m| m.style),
            Some(MessageStyle::Info)
        );
    }

    #[test]
    fn cursor_follows_typing_and_backspace() {
        let mut app = app("12+34=46");
        type_text(&mut app, "123");
        assert_eq!(app.cursor, 3);

        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.cursor, 2);

        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.cursor, 0);

        for _ in 0..20 {
            press(&mut app, KeyCode::Right);
        }
        assert_eq!(app.cursor, 7);
    }

    #[test]
    fn invalid_character_is_reported() {
        let mut app = app("12+34=46");
        press(&mut app, KeyCode::Char('x'));
        assert_eq!(app.cursor, 0);
        assert_eq!(
            app.messages.last().map(|m| m.style),
            Some(MessageStyle::Error)
        );
    }

    #[test]
    fn scored_row_moves_cursor_home() {
        let mut app = app("12+34=46");
        type_text(&mut app, "20+26=46");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.cursor, 0);
        assert_eq!(app.game.as_ref().unwrap().guess_count(), Some(1));
    }

    #[test]
    fn cheat_then_solve() {
        let mut app = App::new(ConfigLoader::new(EmbeddedSource), Some(11), None);
        ctrl(&mut app, 'e');

        let target: String = app
            .game
            .as_ref()
            .and_then(Game::cheat_reveal)
            .unwrap()
            .iter()
            .collect();
        type_text(&mut app, &target);
        press(&mut app, KeyCode::Enter);

        assert_eq!(
            app.game.as_ref().unwrap().status(),
            RoundStatus::Cheated
        );
    }

    #[test]
    fn starting_difficulty_by_name() {
        let app = App::new(
            ConfigLoader::new(EmbeddedSource),
            Some(5),
            Some("hard".to_string()),
        );
        assert_eq!(app.game.as_ref().unwrap().row_budget(), 3);
    }

    #[test]
    fn failed_config_waits_for_retry() {
        let mut app = App::new(ConfigLoader::new(Unreachable), None, None);
        assert!(app.game.is_none());
        assert!(matches!(app.loader.state(), LoadState::Failed(_)));

        press(&mut app, KeyCode::Char('1'));
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.loader.attempts(), 1);

        ctrl(&mut app, 'r');
        assert_eq!(app.loader.attempts(), 2);
        assert!(app.game.is_none());
    }

    #[test]
    fn escape_quits() {
        let mut app = app("12+34=46");
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }
}
