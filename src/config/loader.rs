//! Configuration loading
//!
//! A [`ConfigSource`] delivers a [`ConfigDocument`]; a [`ConfigLoader`] runs
//! the fetch once and keeps the outcome as an explicit [`LoadState`] that a
//! front-end can render and, after a failure, retry on request.

use super::{ConfigDocument, ConfigError, GameConfig};
use crate::core::ScoringRule;
use std::fs;
use std::path::{Path, PathBuf};

/// Something that can deliver a configuration document
pub trait ConfigSource {
    /// Human readable origin, used in errors and logs
    fn name(&self) -> String;

    /// Fetch the document
    ///
    /// # Errors
    /// Returns `ConfigError` when the document cannot be read or parsed.
    fn fetch(&self) -> Result<ConfigDocument, ConfigError>;
}

/// Built-in answer pool with default tables
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedSource;

impl ConfigSource for EmbeddedSource {
    fn name(&self) -> String {
        "built-in pool".to_string()
    }

    fn fetch(&self) -> Result<ConfigDocument, ConfigError> {
        Ok(ConfigDocument::embedded())
    }
}

/// Configuration read from disk
///
/// `.json` files hold a full document. Any other file is read as a plain
/// equation list, one per line, with default tables.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn is_json(&self) -> bool {
        self.path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
    }
}

impl ConfigSource for FileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<ConfigDocument, ConfigError> {
        let content = fs::read_to_string(&self.path).map_err(|e| ConfigError::Fetch {
            source_name: self.name(),
            message: e.to_string(),
        })?;

        if self.is_json() {
            return ConfigDocument::from_json(&content);
        }

        let mut document = ConfigDocument::embedded();
        document.answers = equations_from_lines(&content);
        Ok(document)
    }
}

/// Split a plain equation list, skipping blank lines and `#` comments
#[must_use]
pub fn equations_from_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Where configuration loading stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// Not fetched yet
    Loading,
    /// Fetch or validation failed; waits for an explicit retry
    Failed(ConfigError),
    Ready(GameConfig),
}

impl LoadState {
    #[must_use]
    pub const fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }
}

/// One-shot configuration loader with manual retry
pub struct ConfigLoader {
    source: Box<dyn ConfigSource>,
    scoring: Option<ScoringRule>,
    state: LoadState,
    attempts: usize,
}

impl ConfigLoader {
    pub fn new(source: impl ConfigSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            scoring: None,
            state: LoadState::Loading,
            attempts: 0,
        }
    }

    /// Force a scoring rule regardless of what the document says
    #[must_use]
    pub fn with_scoring(mut self, scoring: Option<ScoringRule>) -> Self {
        self.scoring = scoring;
        self
    }

    /// Fetch and validate, once
    ///
    /// Does nothing when a previous attempt already succeeded or failed.
    pub fn load(&mut self) -> &LoadState {
        if matches!(self.state, LoadState::Loading) {
            self.attempts += 1;
            log::debug!(
                "Loading configuration from {} (attempt {})",
                self.source.name(),
                self.attempts
            );

            self.state = match self.source.fetch().and_then(GameConfig::from_document) {
                Ok(config) => {
                    let config = match self.scoring {
                        Some(rule) => config.with_scoring(rule),
                        None => config,
                    };
                    LoadState::Ready(config)
                }
                Err(e) => {
                    log::warn!("Configuration failed: {e}");
                    LoadState::Failed(e)
                }
            };
        }
        &self.state
    }

    /// Try again after a failure
    ///
    /// Has no effect unless the current state is `Failed`.
    pub fn retry(&mut self) -> &LoadState {
        if matches!(self.state, LoadState::Failed(_)) {
            self.state = LoadState::Loading;
        }
        self.load()
    }

    #[must_use]
    pub const fn state(&self) -> &LoadState {
        &self.state
    }

    #[must_use]
    pub const fn config(&self) -> Option<&GameConfig> {
        match &self.state {
            LoadState::Ready(config) => Some(config),
            _ => None,
        }
    }

    /// Number of fetches issued so far
    #[must_use]
    pub const fn attempts(&self) -> usize {
        self.attempts
    }

    #[must_use]
    pub fn source_name(&self) -> String {
        self.source.name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Fails a set number of times before succeeding
    struct Flaky {
        failures_left: Rc<Cell<usize>>,
    }

    impl ConfigSource for Flaky {
        fn name(&self) -> String {
            "flaky".to_string()
        }

        fn fetch(&self) -> Result<ConfigDocument, ConfigError> {
            let left = self.failures_left.get();
            if left > 0 {
                self.failures_left.set(left - 1);
                return Err(ConfigError::Fetch {
                    source_name: self.name(),
                    message: "unavailable".to_string(),
                });
            }
            Ok(ConfigDocument::embedded())
        }
    }

    #[test]
    fn starts_in_loading_state() {
        let loader = ConfigLoader::new(EmbeddedSource);
        assert_eq!(loader.state(), &LoadState::Loading);
        assert_eq!(loader.attempts(), 0);
        assert!(loader.config().is_none());
    }

    #[test]
    fn embedded_source_becomes_ready() {
        let mut loader = ConfigLoader::new(EmbeddedSource);
        assert!(loader.load().is_ready());
        assert!(loader.config().is_some());
    }

    #[test]
    fn load_runs_only_once() {
        let mut loader = ConfigLoader::new(EmbeddedSource);
        loader.load();
        loader.load();
        loader.retry();
        assert_eq!(loader.attempts(), 1);
    }

    #[test]
    fn failure_waits_for_explicit_retry() {
        let failures = Rc::new(Cell::new(1));
        let mut loader = ConfigLoader::new(Flaky {
            failures_left: Rc::clone(&failures),
        });

        assert!(matches!(loader.load(), LoadState::Failed(_)));
        // A second load does not fetch again
        assert!(matches!(loader.load(), LoadState::Failed(_)));
        assert_eq!(loader.attempts(), 1);

        assert!(loader.retry().is_ready());
        assert_eq!(loader.attempts(), 2);
    }

    #[test]
    fn scoring_override_applies() {
        let mut loader =
            ConfigLoader::new(EmbeddedSource).with_scoring(Some(ScoringRule::DuplicateAware));
        loader.load();
        assert_eq!(
            loader.config().unwrap().options().scoring,
            ScoringRule::DuplicateAware
        );
    }

    #[test]
    fn missing_file_fails() {
        let mut loader = ConfigLoader::new(FileSource::new("/nonexistent/nerdle.json"));
        assert!(matches!(
            loader.load(),
            LoadState::Failed(ConfigError::Fetch { .. })
        ));
    }

    #[test]
    fn plain_list_file_is_read() {
        let path = std::env::temp_dir().join(format!("nerdle-pool-{}.txt", std::process::id()));
        fs::write(&path, "# pool\n1+1=2\n\n3*3=9\n").unwrap();

        let document = FileSource::new(&path).fetch().unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(document.answers, vec!["1+1=2", "3*3=9"]);
    }

    #[test]
    fn equations_from_lines_skips_comments() {
        let lines = equations_from_lines("  1+1=2 \n# skip\n\n2+2=4");
        assert_eq!(lines, vec!["1+1=2", "2+2=4"]);
    }
}
