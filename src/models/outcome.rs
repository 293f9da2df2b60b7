//! Batch outcome bookkeeping.
//!
//! One [`BatchOutcome`] is owned by a pipeline instance and mutated during a
//! run; the caller reads it after `run` returns. A word lands in exactly one
//! of `done` or `failed`, and `reasons` stays index-parallel to `failed`.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Accumulated result state for one pipeline instance.
#[derive(Debug, Default, Clone, Serialize)]
pub struct BatchOutcome {
    done: Vec<String>,
    failed: Vec<String>,
    reasons: Vec<String>,
}

impl BatchOutcome {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the word was already recorded as done or failed.
    pub fn is_processed(&self, word: &str) -> bool {
        self.done.iter().any(|w| w == word) || self.failed.iter().any(|w| w == word)
    }

    /// Record a successfully downloaded word.
    pub fn record_done(&mut self, word: &str) {
        if !self.is_processed(word) {
            self.done.push(word.to_string());
        }
    }

    /// Record a failed word with its failure reason.
    ///
    /// The reason is only appended when the word is newly added, keeping
    /// `reasons` the same length as `failed`.
    pub fn record_failure(&mut self, word: &str, reason: &str) {
        if !self.is_processed(word) {
            self.failed.push(word.to_string());
            self.reasons.push(reason.to_string());
        }
    }

    /// Words downloaded successfully, in processing order.
    pub fn done(&self) -> &[String] {
        &self.done
    }

    /// Words that did not complete, in processing order.
    pub fn failed(&self) -> &[String] {
        &self.failed
    }

    /// Failure reasons, index-parallel to [`BatchOutcome::failed`].
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// Iterate over `(word, reason)` pairs for the failed words.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.failed
            .iter()
            .zip(&self.reasons)
            .map(|(w, r)| (w.as_str(), r.as_str()))
    }

    /// Total number of words processed so far.
    pub fn processed_count(&self) -> usize {
        self.done.len() + self.failed.len()
    }

    /// Render a plain-text table of failed words and reasons.
    ///
    /// Read-only convenience for callers; returns an empty string when
    /// nothing failed.
    pub fn failed_table(&self) -> String {
        if self.failed.is_empty() {
            return String::new();
        }

        let word_width = self
            .failed
            .iter()
            .map(|w| w.len())
            .chain(["Word".len()])
            .max()
            .unwrap_or(0);

        let mut table = format!("{:<word_width$}  Reason\n", "Word");
        table.push_str(&format!("{:<word_width$}  ------\n", "----"));
        for (word, reason) in self.failures() {
            table.push_str(&format!("{word:<word_width$}  {reason}\n"));
        }
        table
    }
}

/// Timing and counts for one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// Display name of the source the batch ran against
    pub source: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub done_count: usize,
    pub failed_count: usize,
}
