// src/utils/words.rs

//! Word list normalization and validation.
//!
//! The pipeline expects clean, deduplicated lowercase tokens; this module is
//! the boundary that produces them from raw user input.

use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

/// Why a candidate word was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordIssue {
    Empty,
    Numeric,
    InvalidChars,
}

impl fmt::Display for WordIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            WordIssue::Empty => "is empty",
            WordIssue::Numeric => "is numeric",
            WordIssue::InvalidChars => "contains invalid characters",
        };
        f.write_str(text)
    }
}

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

/// Validate a single normalized word.
///
/// Accepts ASCII letters plus hyphen, backtick, apostrophe, and internal
/// spaces (multi-word entries like "ice cream").
pub fn validate_word(word: &str) -> std::result::Result<(), WordIssue> {
    if word.is_empty() {
        return Err(WordIssue::Empty);
    }
    if word.chars().all(|c| c.is_ascii_digit()) {
        return Err(WordIssue::Numeric);
    }
    if !word
        .chars()
        .all(|c| c.is_ascii_alphabetic() || matches!(c, '-' | '`' | '\'' | ' '))
    {
        return Err(WordIssue::InvalidChars);
    }
    Ok(())
}

/// Normalize a comma-separated word list.
///
/// Trims, lowercases, collapses internal whitespace, drops empty entries,
/// dedupes preserving first occurrence, and splits off entries that fail
/// validation. Returns `(valid, rejected)`.
pub fn normalize_words(input: &str) -> (Vec<String>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut valid = Vec::new();
    let mut rejected = Vec::new();

    for part in input.split(',') {
        let word = whitespace_re()
            .replace_all(part.trim(), " ")
            .to_lowercase();
        if word.is_empty() {
            continue;
        }

        match validate_word(&word) {
            Ok(()) => {
                if seen.insert(word.clone()) {
                    valid.push(word);
                }
            }
            Err(issue) => {
                log::debug!("Rejecting '{word}': {issue}");
                rejected.push(word);
            }
        }
    }

    (valid, rejected)
}
