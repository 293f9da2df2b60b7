//! Provider registry.
//!
//! The set of selectable dictionary sources is a fixed table built once at
//! startup; nothing mutates it at runtime.

use std::fmt;
use std::str::FromStr;

use crate::error::FetchError;

/// The closed set of dictionary sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    FreeDictionary,
    MerriamWebster,
    OxfordScrape,
}

/// Static description of one selectable provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderSpec {
    pub kind: ProviderKind,
    /// Human-readable display name
    pub name: &'static str,
    /// Environment variable holding the API key, if the source needs one
    pub credential_env: Option<&'static str>,
    /// Where to obtain an API key
    pub signup_url: Option<&'static str>,
}

const REGISTRY: &[ProviderSpec] = &[
    ProviderSpec {
        kind: ProviderKind::FreeDictionary,
        name: "Free Dictionary API",
        credential_env: None,
        signup_url: None,
    },
    ProviderSpec {
        kind: ProviderKind::MerriamWebster,
        name: "Merriam-Webster API",
        credential_env: Some("MW_API_KEY"),
        signup_url: Some("https://dictionaryapi.com/"),
    },
    ProviderSpec {
        kind: ProviderKind::OxfordScrape,
        name: "Oxford Learner's Dictionary (scraper)",
        credential_env: None,
        signup_url: None,
    },
];

/// The immutable provider table.
pub fn registry() -> &'static [ProviderSpec] {
    REGISTRY
}

/// Look up the spec for a provider kind.
pub fn spec_for(kind: ProviderKind) -> &'static ProviderSpec {
    REGISTRY
        .iter()
        .find(|spec| spec.kind == kind)
        .expect("every ProviderKind has a registry entry")
}

impl FromStr for ProviderKind {
    type Err = FetchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free-dictionary" | "freedict" | "free" => Ok(Self::FreeDictionary),
            "merriam-webster" | "mw" => Ok(Self::MerriamWebster),
            "oxford" | "oxford-scrape" => Ok(Self::OxfordScrape),
            _ => Err(FetchError::config(format!(
                "unknown provider '{s}' (expected free-dictionary, merriam-webster, or oxford)"
            ))),
        }
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(spec_for(*self).name)
    }
}
