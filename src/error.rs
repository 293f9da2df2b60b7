// src/error.rs

//! Unified error handling for the fetcher.

use std::fmt;

use thiserror::Error;

/// Result type alias for fetcher operations.
pub type Result<T> = std::result::Result<T, FetchError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Source has no entry for the word (HTTP 404 on lookup)
    #[error("word not found: {0}")]
    WordNotFound(String),

    /// Entry exists but carries no audio matching the accepted variants
    #[error("audio not found for: {0}")]
    AudioNotFound(String),

    /// Transport or status failure fetching the lookup page or audio binary
    #[error("download failed for {context}: {message}")]
    Download { context: String, message: String },

    /// Adapter cannot interpret the parsed response structure
    #[error("unsupported response shape: {0}")]
    UnsupportedShape(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl FetchError {
    /// Create a word-not-found error.
    pub fn word_not_found(word: impl Into<String>) -> Self {
        Self::WordNotFound(word.into())
    }

    /// Create an audio-not-found error.
    pub fn audio_not_found(word: impl Into<String>) -> Self {
        Self::AudioNotFound(word.into())
    }

    /// Create a download error with context.
    pub fn download(context: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Download {
            context: context.into(),
            message: message.to_string(),
        }
    }

    /// Create an unsupported-shape error.
    pub fn unsupported_shape(message: impl Into<String>) -> Self {
        Self::UnsupportedShape(message.into())
    }

    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Classify this error into the stable failure taxonomy.
    ///
    /// Transport failures and timeouts count as download errors; a body the
    /// adapter cannot decode counts as an unsupported response shape.
    pub fn failure_kind(&self) -> FailureKind {
        match self {
            Self::WordNotFound(_) => FailureKind::WordNotFound,
            Self::AudioNotFound(_) => FailureKind::AudioNotFound,
            Self::Download { .. } | Self::Http(_) => FailureKind::Download,
            Self::UnsupportedShape(_) | Self::Json(_) => FailureKind::UnsupportedShape,
            _ => FailureKind::Unexpected,
        }
    }
}

/// Failure categories surfaced to the caller after a batch run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    WordNotFound,
    AudioNotFound,
    Download,
    UnsupportedShape,
    Unexpected,
}

impl FailureKind {
    /// Stable human-readable label recorded in the outcome's reason list.
    pub fn label(&self) -> &'static str {
        match self {
            FailureKind::WordNotFound => "Word not found",
            FailureKind::AudioNotFound => "Audio not found",
            FailureKind::Download => "Download error",
            FailureKind::UnsupportedShape => "Unsupported response shape",
            FailureKind::Unexpected => "Unexpected error. Try another source",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_classify_to_their_kind() {
        assert_eq!(
            FetchError::word_not_found("hello").failure_kind(),
            FailureKind::WordNotFound
        );
        assert_eq!(
            FetchError::audio_not_found("hello").failure_kind(),
            FailureKind::AudioNotFound
        );
        assert_eq!(
            FetchError::download("hello", "status 500").failure_kind(),
            FailureKind::Download
        );
        assert_eq!(
            FetchError::unsupported_shape("suggestion list").failure_kind(),
            FailureKind::UnsupportedShape
        );
    }

    #[test]
    fn test_json_errors_count_as_shape_drift() {
        let err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        assert_eq!(
            FetchError::from(err).failure_kind(),
            FailureKind::UnsupportedShape
        );
    }

    #[test]
    fn test_other_errors_are_unexpected() {
        let err = FetchError::Io(std::io::Error::other("disk gone"));
        assert_eq!(err.failure_kind(), FailureKind::Unexpected);
        assert_eq!(
            FetchError::config("bad").failure_kind(),
            FailureKind::Unexpected
        );
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(FailureKind::WordNotFound.label(), "Word not found");
        assert_eq!(FailureKind::AudioNotFound.label(), "Audio not found");
        assert_eq!(FailureKind::Download.label(), "Download error");
        assert_eq!(
            FailureKind::UnsupportedShape.label(),
            "Unsupported response shape"
        );
        assert_eq!(
            FailureKind::Unexpected.label(),
            "Unexpected error. Try another source"
        );
    }
}
