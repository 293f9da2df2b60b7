//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FetchError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// HTTP and batch behavior settings
    #[serde(default)]
    pub fetcher: FetcherConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetcher.user_agent.trim().is_empty() {
            return Err(FetchError::validation("fetcher.user_agent is empty"));
        }
        if self.fetcher.timeout_secs == 0 {
            return Err(FetchError::validation("fetcher.timeout_secs must be > 0"));
        }
        if self.fetcher.max_batch_size == 0 {
            return Err(FetchError::validation("fetcher.max_batch_size must be > 0"));
        }
        Ok(())
    }
}

/// HTTP client and batch behavior settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetcherConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Maximum number of words accepted per batch
    #[serde(default = "defaults::max_batch_size")]
    pub max_batch_size: usize,

    /// Log per-word progress during a run
    #[serde(default = "defaults::show_progress")]
    pub show_progress: bool,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            max_batch_size: defaults::max_batch_size(),
            show_progress: defaults::show_progress(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; pronfetch/0.1)".into()
    }
    pub fn timeout() -> u64 {
        10
    }
    pub fn max_batch_size() -> usize {
        100
    }
    pub fn show_progress() -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fetcher.timeout_secs, 10);
        assert_eq!(config.fetcher.max_batch_size, 100);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [fetcher]
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.fetcher.timeout_secs, 5);
        assert_eq!(config.fetcher.max_batch_size, 100);
        assert!(!config.fetcher.user_agent.is_empty());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.fetcher.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = Config::default();
        config.fetcher.user_agent = "  ".into();
        assert!(config.validate().is_err());
    }
}
