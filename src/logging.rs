//! Logging set-up
//!
//! `env_logger` writes to stderr; the level comes from the `-v`/`-q` flags.

use log::LevelFilter;

/// Install the logger
///
/// Calling this twice keeps the first logger and only adjusts the level.
pub fn init(level: LevelFilter) {
    let installed = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp(None)
        .try_init();

    if installed.is_err() {
        log::set_max_level(level);
        log::debug!("Logger already installed");
    }
}

/// Run `f` with logging switched off, restoring the previous level after
///
/// Used while a full-screen interface owns the terminal.
pub fn muted<T>(f: impl FnOnce() -> T) -> T {
    let previous = log::max_level();
    log::set_max_level(LevelFilter::Off);
    let result = f();
    log::set_max_level(previous);
    result
}
