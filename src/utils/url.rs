// src/utils/url.rs

//! URL normalization helpers.

use url::Url;

use crate::error::Result;

/// Expand `href` into a fully-qualified URL against `base`.
///
/// Absolute URLs pass through untouched, protocol-relative URLs get an https
/// scheme, and anything else is joined against `base`.
pub fn ensure_absolute(base: &str, href: &str) -> Result<String> {
    if href.starts_with("http://") || href.starts_with("https://") {
        return Ok(href.to_string());
    }

    if let Some(rest) = href.strip_prefix("//") {
        return Ok(format!("https://{rest}"));
    }

    let joined = Url::parse(base)?.join(href)?;
    Ok(joined.into())
}
