//! Answer pool audit
//!
//! Validates every entry of a configuration document in parallel and
//! summarizes what a game would actually be able to use.

use crate::config::{ConfigDocument, Difficulty, validate_answer};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::{Duration, Instant};

/// Summary of an answer pool
#[derive(Debug)]
pub struct AuditReport {
    pub source: String,
    pub total: usize,
    pub valid: usize,
    /// Entry and reason, in document order
    pub invalid: Vec<(String, String)>,
    /// Entries that appear more than once
    pub duplicates: Vec<String>,
    /// Equation length -> number of valid answers
    pub length_distribution: FxHashMap<usize, usize>,
    pub difficulties: Vec<Difficulty>,
    pub duration: Duration,
}

impl AuditReport {
    /// Whether a game could start from this pool
    #[must_use]
    pub fn is_playable(&self) -> bool {
        self.valid > 0 && !self.difficulties.is_empty()
    }
}

/// Audit the answers of `document`
///
/// Shows a progress bar when `show_progress` is set.
#[must_use]
pub fn run_audit(document: &ConfigDocument, source: &str, show_progress: bool) -> AuditReport {
    let start = Instant::now();
    let answers = &document.answers;
    let allow_whitespace = document.options.allow_whitespace;

    let pb = if show_progress {
        let pb = ProgressBar::new(answers.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} ({percent}%)",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let verdicts: Vec<Result<usize, String>> = answers
        .par_iter()
        .map(|raw| {
            let verdict = validate_answer(raw, allow_whitespace)
                .map(|equation| equation.len())
                .map_err(|e| e.to_string());
            pb.inc(1);
            verdict
        })
        .collect();
    pb.finish_and_clear();

    let mut invalid = Vec::new();
    let mut length_distribution: FxHashMap<usize, usize> = FxHashMap::default();
    for (raw, verdict) in answers.iter().zip(verdicts) {
        match verdict {
            Ok(len) => *length_distribution.entry(len).or_insert(0) += 1,
            Err(reason) => invalid.push((raw.clone(), reason)),
        }
    }

    let mut seen = FxHashSet::default();
    let mut reported = FxHashSet::default();
    let mut duplicates = Vec::new();
    for raw in answers {
        let text = raw.trim();
        if !seen.insert(text) && reported.insert(text) {
            duplicates.push(text.to_string());
        }
    }

    AuditReport {
        source: source.to_string(),
        total: answers.len(),
        valid: answers.len() - invalid.len(),
        invalid,
        duplicates,
        length_distribution,
        difficulties: document.difficulty_config.clone(),
        duration: start.elapsed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(answers: &[&str]) -> ConfigDocument {
        let mut doc = ConfigDocument::embedded();
        doc.answers = answers.iter().map(|&s| s.to_string()).collect();
        doc
    }

    #[test]
    fn audit_counts_valid_and_invalid() {
        let doc = document(&["1+1=2", "2*2=5", "10+20=30", "1/0=0"]);
        let report = run_audit(&doc, "test", false);

        assert_eq!(report.total, 4);
        assert_eq!(report.valid, 2);
        assert_eq!(report.invalid.len(), 2);
        assert_eq!(report.invalid[0].0, "2*2=5");
        assert_eq!(report.invalid[1].0, "1/0=0");
        assert!(report.is_playable());
    }

    #[test]
    fn audit_flags_untypable_answers() {
        let doc = document(&["(1+2)*3=9", "1 + 1 = 2", "3*3=9"]);
        let report = run_audit(&doc, "test", false);

        assert_eq!(report.valid, 1);
        assert_eq!(report.invalid.len(), 2);
        assert!(report.invalid[0].1.contains("'('"));
    }

    #[test]
    fn audit_length_distribution() {
        let doc = document(&["1+1=2", "2+2=4", "10+20=30"]);
        let report = run_audit(&doc, "test", false);

        assert_eq!(report.length_distribution.get(&5), Some(&2));
        assert_eq!(report.length_distribution.get(&8), Some(&1));
    }

    #[test]
    fn audit_reports_duplicates_once() {
        let doc = document(&["1+1=2", "1+1=2", " 1+1=2", "2+2=4"]);
        let report = run_audit(&doc, "test", false);
        assert_eq!(report.duplicates, vec!["1+1=2".to_string()]);
    }

    #[test]
    fn empty_pool_is_not_playable() {
        let report = run_audit(&document(&[]), "test", false);
        assert_eq!(report.total, 0);
        assert!(!report.is_playable());
    }

    #[test]
    fn embedded_pool_is_clean() {
        let report = run_audit(&ConfigDocument::embedded(), "built-in", false);
        assert!(report.invalid.is_empty());
        assert!(report.duplicates.is_empty());
        assert_eq!(report.valid, crate::config::ANSWERS_COUNT);
    }
}
