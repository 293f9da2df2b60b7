// src/sources/mod.rs

//! Dictionary source adapters.
//!
//! Each adapter supplies the four source-specific hooks of the fetch
//! pipeline: building the lookup URL, parsing the response body, extracting a
//! raw audio candidate, and normalizing it into a fetchable URL. Shared
//! machinery (timeouts, downloads, outcome bookkeeping) lives in
//! [`crate::pipeline`].

mod free_dictionary;
mod merriam_webster;
mod oxford;

pub use free_dictionary::FreeDictionaryApi;
pub use merriam_webster::MerriamWebsterApi;
pub use oxford::OxfordScraper;

use reqwest::header::HeaderMap;

use crate::error::Result;

/// Contract implemented by every dictionary source.
///
/// The fixed set of implementations is dispatched through
/// [`crate::models::ProviderKind`]; the pipeline itself is generic over the
/// adapter and never downcasts.
pub trait AudioSource {
    /// Parsed form of a lookup response (a JSON value or an HTML document).
    type Parsed;

    /// Human-readable source name for logs and summaries.
    fn name(&self) -> &'static str;

    /// Extra request headers sent with every request to this source.
    fn headers(&self) -> HeaderMap {
        HeaderMap::new()
    }

    /// Verify the credential requirement before any network call is made.
    fn check_credential(&self, _credential: Option<&str>) -> Result<()> {
        Ok(())
    }

    /// Build the source-specific lookup URL for a word.
    fn lookup_url(&self, word: &str, credential: Option<&str>) -> Result<String>;

    /// Convert a raw response body into the source's structured form.
    fn parse_response(&self, body: &str) -> Result<Self::Parsed>;

    /// Search the parsed structure for a raw audio reference.
    fn extract_candidate(&self, word: &str, parsed: &Self::Parsed) -> Result<String>;

    /// Turn the raw candidate into a fully-qualified audio URL.
    fn normalize_audio_url(&self, raw: &str) -> Result<String>;

    /// Output file name for a word's audio artifact.
    fn file_name(&self, word: &str) -> String {
        format!("{word}.mp3")
    }

    /// Run parse, extract, and normalize on a lookup response body.
    fn resolve_audio_url(&self, word: &str, body: &str) -> Result<String> {
        let parsed = self.parse_response(body)?;
        let raw = self.extract_candidate(word, &parsed)?;
        self.normalize_audio_url(&raw)
    }
}
