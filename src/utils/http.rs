// src/utils/http.rs

//! HTTP client construction.

use std::time::Duration;

use crate::error::Result;
use crate::models::FetcherConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_client(config: &FetcherConfig) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}
