// src/pipeline/fetch.rs

//! Batch fetch pipeline.
//!
//! Drives each word through a fixed stage sequence: build lookup URL, fetch
//! the page, parse it, extract an audio candidate, normalize it, download the
//! audio, persist it. Every per-word failure is classified into the taxonomy
//! and recorded; the batch always continues.

use std::path::PathBuf;

use chrono::Utc;
use reqwest::{Client, StatusCode};

use crate::error::{FetchError, Result};
use crate::models::{BatchOutcome, FetcherConfig, RunSummary};
use crate::sources::AudioSource;
use crate::storage::{AudioStore, LocalStore};
use crate::utils::http;

/// Pipeline instance bound to one source adapter and one output directory.
///
/// Outcome state accumulates across `run` calls on the same instance, so the
/// caller can re-submit a word list without re-fetching words already
/// processed.
pub struct AudioPipeline<S: AudioSource> {
    source: S,
    client: Client,
    store: Box<dyn AudioStore>,
    outcome: BatchOutcome,
    show_progress: bool,
}

impl<S: AudioSource> AudioPipeline<S> {
    /// Create a pipeline writing artifacts under `output_dir`.
    pub fn new(source: S, output_dir: impl Into<PathBuf>, config: &FetcherConfig) -> Result<Self> {
        let client = http::create_client(config)?;
        Ok(Self {
            source,
            client,
            store: Box::new(LocalStore::new(output_dir)),
            outcome: BatchOutcome::new(),
            show_progress: config.show_progress,
        })
    }

    /// Process a batch of words, strictly in input order, one at a time.
    ///
    /// The only error that escapes is a caller setup problem (a keyed source
    /// invoked without a credential), surfaced before any network call. Every
    /// per-word error is converted into a failure record and the loop
    /// continues.
    pub async fn run(&mut self, words: &[String], credential: Option<&str>) -> Result<RunSummary> {
        self.source.check_credential(credential)?;

        let started_at = Utc::now();
        let total = words.len();
        log::info!("Fetching {} words with {}", total, self.source.name());

        for (index, word) in words.iter().enumerate() {
            if self.outcome.is_processed(word) {
                log::debug!("Skipping already processed word: {word}");
                continue;
            }

            match self.fetch_word(word, credential).await {
                Ok(path) => {
                    log::debug!("Saved {} to {}", word, path.display());
                    self.outcome.record_done(word);
                }
                Err(error) => {
                    let kind = error.failure_kind();
                    log::debug!("Failed to fetch '{word}': {error}");
                    self.outcome.record_failure(word, kind.label());
                }
            }

            if self.show_progress {
                log::info!("[{}/{}] processed '{}'", index + 1, total, word);
            }
        }

        let summary = RunSummary {
            source: self.source.name().to_string(),
            started_at,
            finished_at: Utc::now(),
            done_count: self.outcome.done().len(),
            failed_count: self.outcome.failed().len(),
        };
        log::info!(
            "Download completed: {} successful, {} failed",
            summary.done_count,
            summary.failed_count
        );
        Ok(summary)
    }

    /// Full stage sequence for one word. Errors are classified by the caller.
    async fn fetch_word(&self, word: &str, credential: Option<&str>) -> Result<PathBuf> {
        let lookup_url = self.source.lookup_url(word, credential)?;
        let body = self.fetch_lookup(word, &lookup_url).await?;

        let audio_url = self.source.resolve_audio_url(word, &body)?;
        log::debug!("Audio found for {}: {}", word, audio_url);

        let bytes = self.fetch_audio(word, &audio_url).await?;
        self.store.save(&self.source.file_name(word), &bytes).await
    }

    /// GET the lookup page. 404 means the source has no entry for the word;
    /// any other non-2xx status is a download failure.
    async fn fetch_lookup(&self, word: &str, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .headers(self.source.headers())
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(FetchError::word_not_found(word)),
            status if !status.is_success() => Err(FetchError::download(
                word,
                format!("lookup returned status {status}"),
            )),
            _ => Ok(response.text().await?),
        }
    }

    /// GET the audio binary.
    async fn fetch_audio(&self, word: &str, url: &str) -> Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .headers(self.source.headers())
            .send()
            .await
            .map_err(|e| FetchError::download(word, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::download(
                word,
                format!("audio returned status {status}"),
            ));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::download(word, e))?;
        Ok(bytes.to_vec())
    }

    /// Outcome state accumulated so far.
    pub fn outcome(&self) -> &BatchOutcome {
        &self.outcome
    }

    /// Consume the pipeline, returning its outcome.
    pub fn into_outcome(self) -> BatchOutcome {
        self.outcome
    }

    /// The active source adapter.
    pub fn source(&self) -> &S {
        &self.source
    }
}
