// src/sources/free_dictionary.rs

//! Free Dictionary API adapter (keyless JSON).
//!
//! Looks words up on dictionaryapi.dev and picks the first phonetic entry
//! whose audio URL matches the accepted locale tags.

use serde_json::Value;

use crate::error::{FetchError, Result};
use crate::sources::AudioSource;

const API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// Adapter for the keyless dictionaryapi.dev JSON API.
pub struct FreeDictionaryApi {
    base_url: String,
    /// Locale tags accepted in audio URLs
    locales: Vec<&'static str>,
}

impl FreeDictionaryApi {
    pub fn new() -> Self {
        Self {
            base_url: API_URL.to_string(),
            locales: vec!["us"],
        }
    }

    /// Point the adapter at a different API root.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::new()
        }
    }

    /// Override the accepted locale tags.
    pub fn with_locales(mut self, locales: Vec<&'static str>) -> Self {
        self.locales = locales;
        self
    }

    fn accepts(&self, audio: &str) -> bool {
        let lower = audio.to_lowercase();
        self.locales.iter().any(|tag| lower.contains(tag))
    }
}

impl Default for FreeDictionaryApi {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for FreeDictionaryApi {
    type Parsed = Value;

    fn name(&self) -> &'static str {
        "Free Dictionary API"
    }

    fn lookup_url(&self, word: &str, _credential: Option<&str>) -> Result<String> {
        Ok(format!("{}/{}", self.base_url, word))
    }

    fn parse_response(&self, body: &str) -> Result<Value> {
        Ok(serde_json::from_str(body)?)
    }

    fn extract_candidate(&self, word: &str, parsed: &Value) -> Result<String> {
        let entries = parsed
            .as_array()
            .ok_or_else(|| FetchError::unsupported_shape("expected a top-level entry array"))?;

        entries
            .iter()
            .flat_map(|entry| {
                entry
                    .get("phonetics")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
            })
            .filter_map(|phonetic| phonetic.get("audio").and_then(Value::as_str))
            .find(|audio| !audio.is_empty() && self.accepts(audio))
            .map(str::to_owned)
            .ok_or_else(|| FetchError::audio_not_found(word))
    }

    fn normalize_audio_url(&self, raw: &str) -> Result<String> {
        // Audio URLs are served absolute; older entries are protocol-relative.
        if let Some(rest) = raw.strip_prefix("//") {
            return Ok(format!("https://{rest}"));
        }
        Ok(raw.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entry(audios: &[&str]) -> Value {
        json!([{
            "word": "hello",
            "phonetics": audios
                .iter()
                .map(|a| json!({ "audio": a }))
                .collect::<Vec<_>>(),
        }])
    }

    #[test]
    fn test_lookup_url() {
        let source = FreeDictionaryApi::new();
        assert_eq!(
            source.lookup_url("hello", None).unwrap(),
            "https://api.dictionaryapi.dev/api/v2/entries/en/hello"
        );
    }

    #[test]
    fn test_extracts_first_accepted_locale() {
        let source = FreeDictionaryApi::new();
        let parsed = entry(&[
            "https://api.example.com/hello-uk.mp3",
            "https://api.example.com/hello-us.mp3",
            "https://api.example.com/hello-au.mp3",
        ]);
        assert_eq!(
            source.extract_candidate("hello", &parsed).unwrap(),
            "https://api.example.com/hello-us.mp3"
        );
    }

    #[test]
    fn test_skips_empty_audio_fields() {
        let source = FreeDictionaryApi::new();
        let parsed = entry(&["", "https://api.example.com/hello-us.mp3"]);
        assert_eq!(
            source.extract_candidate("hello", &parsed).unwrap(),
            "https://api.example.com/hello-us.mp3"
        );
    }

    #[test]
    fn test_no_matching_locale_is_audio_not_found() {
        let source = FreeDictionaryApi::new();
        let parsed = entry(&["https://api.example.com/hello-uk.mp3"]);
        let err = source.extract_candidate("hello", &parsed).unwrap_err();
        assert!(matches!(err, FetchError::AudioNotFound(_)));
    }

    #[test]
    fn test_locale_allow_list_is_configurable() {
        let source = FreeDictionaryApi::new().with_locales(vec!["uk", "us"]);
        let parsed = entry(&["https://api.example.com/hello-uk.mp3"]);
        assert!(source.extract_candidate("hello", &parsed).is_ok());
    }

    #[test]
    fn test_non_array_body_is_unsupported_shape() {
        let source = FreeDictionaryApi::new();
        let parsed = json!({ "title": "No Definitions Found" });
        let err = source.extract_candidate("hello", &parsed).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedShape(_)));
    }

    #[test]
    fn test_normalize_passes_absolute_through() {
        let source = FreeDictionaryApi::new();
        assert_eq!(
            source
                .normalize_audio_url("https://api.example.com/hello-us.mp3")
                .unwrap(),
            "https://api.example.com/hello-us.mp3"
        );
    }

    #[test]
    fn test_normalize_upgrades_protocol_relative() {
        let source = FreeDictionaryApi::new();
        assert_eq!(
            source
                .normalize_audio_url("//ssl.gstatic.com/dictionary/static/sounds/hello-us.mp3")
                .unwrap(),
            "https://ssl.gstatic.com/dictionary/static/sounds/hello-us.mp3"
        );
    }

    #[test]
    fn test_default_file_name_is_mp3() {
        let source = FreeDictionaryApi::new();
        assert_eq!(source.file_name("hello"), "hello.mp3");
    }
}
