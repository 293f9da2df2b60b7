// src/sources/merriam_webster.rs

//! Merriam-Webster Learner's Dictionary adapter (keyed JSON).
//!
//! Requires an API key. Pronunciations live under the head-word info
//! (`hwi.prs`) or, for some entries, under spelling variants (`vrs[].prs`);
//! the head word is scanned first. Audio files are bucketed on the source's
//! media host by the first character of the filename.

use serde_json::Value;

use crate::error::{FetchError, Result};
use crate::sources::AudioSource;

const API_URL: &str = "https://www.dictionaryapi.com/api/v3/references/learners/json";
const MEDIA_URL: &str = "https://media.merriam-webster.com/audio/prons/en/us/mp3";

/// Adapter for the keyed Merriam-Webster Learner's Dictionary API.
pub struct MerriamWebsterApi {
    base_url: String,
    media_url: String,
}

impl MerriamWebsterApi {
    pub fn new() -> Self {
        Self {
            base_url: API_URL.to_string(),
            media_url: MEDIA_URL.to_string(),
        }
    }

    /// Point the adapter at different API and media roots.
    pub fn with_base_urls(base_url: impl Into<String>, media_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            media_url: media_url.into(),
        }
    }

    /// Scan entries for an audio filename: head-word pronunciations first,
    /// then spelling variants, in document order.
    fn find_audio(entries: &[Value]) -> Option<String> {
        for entry in entries {
            if let Some(prs) = entry.pointer("/hwi/prs").and_then(Value::as_array) {
                if let Some(audio) = Self::first_sound(prs) {
                    return Some(audio);
                }
            }
            for variant in entry.get("vrs").and_then(Value::as_array).into_iter().flatten() {
                if let Some(prs) = variant.get("prs").and_then(Value::as_array) {
                    if let Some(audio) = Self::first_sound(prs) {
                        return Some(audio);
                    }
                }
            }
        }
        None
    }

    fn first_sound(prs: &[Value]) -> Option<String> {
        prs.iter()
            .filter_map(|pr| pr.pointer("/sound/audio").and_then(Value::as_str))
            .find(|audio| !audio.is_empty())
            .map(str::to_owned)
    }

    /// Media bucket for an audio filename per the source's asset layout.
    fn bucket(file: &str) -> String {
        match file.chars().next() {
            None => "number".into(),
            Some(c) if !c.is_ascii_alphabetic() => "number".into(),
            _ if file.starts_with("gg") => "gg".into(),
            Some(c) => c.to_string(),
        }
    }

    fn require_key<'a>(&self, credential: Option<&'a str>) -> Result<&'a str> {
        credential
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or_else(|| FetchError::config("no API key provided for Merriam-Webster"))
    }
}

impl Default for MerriamWebsterApi {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSource for MerriamWebsterApi {
    type Parsed = Value;

    fn name(&self) -> &'static str {
        "Merriam-Webster API"
    }

    fn check_credential(&self, credential: Option<&str>) -> Result<()> {
        self.require_key(credential).map(|_| ())
    }

    fn lookup_url(&self, word: &str, credential: Option<&str>) -> Result<String> {
        let key = self.require_key(credential)?;
        Ok(format!("{}/{}?key={}", self.base_url, word, key))
    }

    fn parse_response(&self, body: &str) -> Result<Value> {
        Ok(serde_json::from_str(body)?)
    }

    fn extract_candidate(&self, word: &str, parsed: &Value) -> Result<String> {
        let entries = parsed
            .as_array()
            .ok_or_else(|| FetchError::unsupported_shape("expected a top-level entry array"))?;

        // An unknown word comes back as a bare list of spelling suggestions
        // ("did you mean"), not entry objects.
        if entries.iter().any(Value::is_string) {
            return Err(FetchError::unsupported_shape(
                "spelling-suggestion response carries no entry data",
            ));
        }

        Self::find_audio(entries).ok_or_else(|| FetchError::audio_not_found(word))
    }

    fn normalize_audio_url(&self, raw: &str) -> Result<String> {
        let bucket = Self::bucket(raw);
        Ok(format!("{}/{}/{}.mp3", self.media_url, bucket, raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_key_is_a_config_error() {
        let source = MerriamWebsterApi::new();
        assert!(matches!(
            source.check_credential(None).unwrap_err(),
            FetchError::Config(_)
        ));
        assert!(matches!(
            source.check_credential(Some("  ")).unwrap_err(),
            FetchError::Config(_)
        ));
        assert!(source.check_credential(Some("abc123")).is_ok());
    }

    #[test]
    fn test_lookup_url_embeds_key() {
        let source = MerriamWebsterApi::new();
        assert_eq!(
            source.lookup_url("voluminous", Some("abc123")).unwrap(),
            "https://www.dictionaryapi.com/api/v3/references/learners/json/voluminous?key=abc123"
        );
        assert!(source.lookup_url("voluminous", None).is_err());
    }

    #[test]
    fn test_head_word_audio_wins_over_variants() {
        let source = MerriamWebsterApi::new();
        let parsed = json!([{
            "hwi": { "prs": [{ "sound": { "audio": "primary01" } }] },
            "vrs": [{ "prs": [{ "sound": { "audio": "variant01" } }] }],
        }]);
        assert_eq!(
            source.extract_candidate("hello", &parsed).unwrap(),
            "primary01"
        );
    }

    #[test]
    fn test_falls_back_to_variant_audio() {
        let source = MerriamWebsterApi::new();
        let parsed = json!([{
            "hwi": { "prs": [{ "mw": "he-ˈlō" }] },
            "vrs": [{ "prs": [{ "sound": { "audio": "variant01" } }] }],
        }]);
        assert_eq!(
            source.extract_candidate("hello", &parsed).unwrap(),
            "variant01"
        );
    }

    #[test]
    fn test_no_audio_anywhere_is_audio_not_found() {
        let source = MerriamWebsterApi::new();
        let parsed = json!([{ "hwi": { "hw": "hello" } }]);
        let err = source.extract_candidate("hello", &parsed).unwrap_err();
        assert!(matches!(err, FetchError::AudioNotFound(_)));
    }

    #[test]
    fn test_did_you_mean_response_is_unsupported_shape() {
        let source = MerriamWebsterApi::new();
        let parsed = json!(["hello", "helot", "hellos"]);
        let err = source.extract_candidate("helllo", &parsed).unwrap_err();
        assert!(matches!(err, FetchError::UnsupportedShape(_)));
    }

    #[test]
    fn test_bucket_rules() {
        assert_eq!(MerriamWebsterApi::bucket("hello001"), "h");
        assert_eq!(MerriamWebsterApi::bucket("gg034"), "gg");
        assert_eq!(MerriamWebsterApi::bucket("3d000001"), "number");
        assert_eq!(MerriamWebsterApi::bucket("_score01"), "number");
    }

    #[test]
    fn test_normalize_composes_media_url() {
        let source = MerriamWebsterApi::new();
        assert_eq!(
            source.normalize_audio_url("hello001").unwrap(),
            "https://media.merriam-webster.com/audio/prons/en/us/mp3/h/hello001.mp3"
        );
        assert_eq!(
            source.normalize_audio_url("gg034").unwrap(),
            "https://media.merriam-webster.com/audio/prons/en/us/mp3/gg/gg034.mp3"
        );
    }
}
