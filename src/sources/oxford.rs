// src/sources/oxford.rs

//! Oxford Learner's Dictionaries adapter (HTML scrape).
//!
//! Scrapes the definition page for the US pronunciation sound button and
//! downloads the referenced .ogg file. Sends browser-like headers; the site
//! rejects obviously non-browser clients.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONNECTION, REFERER, USER_AGENT};
use scraper::{Html, Selector};

use crate::error::{FetchError, Result};
use crate::sources::AudioSource;
use crate::utils::url::ensure_absolute;

const SITE_URL: &str = "https://www.oxfordlearnersdictionaries.com";

/// Class signature of the node carrying the US pronunciation audio reference.
const SOUND_BUTTON: &str = "div.sound.audio_play_button.pron-us.icon-audio";
const AUDIO_ATTR: &str = "data-src-ogg";

const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0";

/// Adapter scraping the Oxford Learner's Dictionaries website.
pub struct OxfordScraper {
    base_url: String,
}

impl OxfordScraper {
    pub fn new() -> Self {
        Self {
            base_url: SITE_URL.to_string(),
        }
    }

    /// Point the scraper at a different site root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }
}

impl Default for OxfordScraper {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for OxfordScraper {
    type Parsed = Html;

    fn name(&self) -> &'static str {
        "Oxford Learner's Dictionary (scraper)"
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        headers.insert(
            REFERER,
            HeaderValue::from_static("https://www.oxfordlearnersdictionaries.com/"),
        );
        headers.insert(ACCEPT, HeaderValue::from_static("*/*"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        headers
    }

    fn lookup_url(&self, word: &str, _credential: Option<&str>) -> Result<String> {
        Ok(format!("{}/definition/english/{}", self.base_url, word))
    }

    fn parse_response(&self, body: &str) -> Result<Html> {
        Ok(Html::parse_document(body))
    }

    fn extract_candidate(&self, word: &str, parsed: &Html) -> Result<String> {
        let selector = Selector::parse(SOUND_BUTTON)
            .map_err(|e| FetchError::selector(SOUND_BUTTON, e))?;

        let button = parsed
            .select(&selector)
            .next()
            .ok_or_else(|| FetchError::audio_not_found(word))?;

        button
            .value()
            .attr(AUDIO_ATTR)
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
            .ok_or_else(|| FetchError::audio_not_found(word))
    }

    fn normalize_audio_url(&self, raw: &str) -> Result<String> {
        ensure_absolute(&self.base_url, raw)
    }

    fn file_name(&self, word: &str) -> String {
        format!("{word}_us.ogg")
    }
}
