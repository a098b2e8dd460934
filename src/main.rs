//! Nerdle - CLI
//!
//! Equation guessing game with TUI and line modes, plus tooling to check
//! equations and audit answer pools.

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use nerdle::{
    commands::{check_equations, run_audit, run_simple},
    config::{ConfigLoader, ConfigSource, EmbeddedSource, FileSource, GameConfig, LoadState},
    core::ScoringRule,
    game::Game,
    logging,
    output::{print_audit_report, print_check_results},
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "nerdle",
    about = "Guess the hidden equation in a limited number of tries",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Configuration: a JSON document, or a plain list of equations (default: built-in pool)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Starting difficulty by name (easy, amateur, medium, hard, very-hard, extreme)
    #[arg(short, long, global = true)]
    difficulty: Option<String>,

    /// Scoring rule: existence (default) or duplicate-aware
    #[arg(short, long, global = true)]
    scoring: Option<String>,

    /// Seed for reproducible target selection
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(flatten)]
    verbose: Verbosity<WarnLevel>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive TUI mode (default)
    Play,

    /// Simple CLI mode (one guess per line, no TUI)
    Simple,

    /// Check whether equations are valid
    Check {
        /// Equations to check, e.g. "10+20=30"
        #[arg(required = true)]
        equations: Vec<String>,
    },

    /// Validate every answer of the configured pool
    Audit {
        /// Hide the progress bar
        #[arg(long)]
        no_progress: bool,
    },
}

/// Build the configuration source from the --config flag
fn config_source(path: Option<&Path>) -> Box<dyn ConfigSource> {
    match path {
        Some(path) => Box::new(FileSource::new(path)),
        None => Box::new(EmbeddedSource),
    }
}

fn config_loader(path: Option<&Path>, scoring: Option<ScoringRule>) -> ConfigLoader {
    match path {
        Some(path) => ConfigLoader::new(FileSource::new(path)),
        None => ConfigLoader::new(EmbeddedSource),
    }
    .with_scoring(scoring)
}

fn parse_scoring(name: Option<&str>) -> Result<Option<ScoringRule>> {
    name.map(|name| {
        ScoringRule::from_name(name)
            .with_context(|| format!("unknown scoring rule '{name}' (existence, duplicate-aware)"))
    })
    .transpose()
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose.log_level_filter());

    let scoring = parse_scoring(cli.scoring.as_deref())?;

    // Default to Play mode if no command given
    let command = cli.command.unwrap_or(Commands::Play);

    let config = cli.config.as_deref();

    match command {
        Commands::Play => run_play_command(config, scoring, cli.seed, cli.difficulty),
        Commands::Simple => {
            run_simple_command(config, scoring, cli.seed, cli.difficulty.as_deref())
        }
        Commands::Check { equations } => {
            run_check_command(&equations);
            Ok(())
        }
        Commands::Audit { no_progress } => run_audit_command(config, !no_progress),
    }
}

fn run_play_command(
    config: Option<&Path>,
    scoring: Option<ScoringRule>,
    seed: Option<u64>,
    difficulty: Option<String>,
) -> Result<()> {
    use nerdle::interactive::{App, run_tui};

    let app = App::new(config_loader(config, scoring), seed, difficulty);
    run_tui(app)
}

fn load_config(config: Option<&Path>, scoring: Option<ScoringRule>) -> Result<GameConfig> {
    let mut loader = config_loader(config, scoring);

    match loader.load() {
        LoadState::Ready(config) => Ok(config.clone()),
        LoadState::Failed(e) => Err(e.clone()).context("failed to load configuration"),
        LoadState::Loading => bail!("configuration did not load"),
    }
}

fn run_simple_command(
    config: Option<&Path>,
    scoring: Option<ScoringRule>,
    seed: Option<u64>,
    difficulty: Option<&str>,
) -> Result<()> {
    let config = load_config(config, scoring)?;
    let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
    let mut game = Game::new(config, rng)?;

    if let Some(name) = difficulty {
        game.set_difficulty_by_name(name)?;
    }

    run_simple(&mut game)
}

fn run_check_command(equations: &[String]) {
    let results = check_equations(equations);
    print_check_results(&results);

    let invalid = results.iter().filter(|r| !r.is_valid()).count();
    if invalid > 0 {
        log::info!("{invalid} of {} equations are invalid", results.len());
    }
}

fn run_audit_command(config: Option<&Path>, show_progress: bool) -> Result<()> {
    let source = config_source(config);
    let document = source
        .fetch()
        .with_context(|| format!("failed to read {}", source.name()))?;

    let report = run_audit(&document, &source.name(), show_progress);
    print_audit_report(&report);
    Ok(())
}
