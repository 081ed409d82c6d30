//! Pulls structured payloads out of free-form model responses.
//!
//! Model output mixes prose with fenced code blocks. The extractors here
//! prefer fenced blocks, then fall back to scanning the raw text for a
//! recognizable payload before giving up.

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    #[error("no JSON payload found in response")]
    NoJsonPayload,
    #[error("invalid JSON payload: {0}")]
    InvalidJson(String),
    #[error("response does not contain HTML")]
    NotHtml,
}

static FENCED_JSON: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:json)?\n(.*?)\n```").unwrap()
});

static FENCED_HTML: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```(?:html)?\n(.*?)\n```").unwrap()
});

/// Extracts a JSON value from a model response.
///
/// A fenced code block (tagged `json` or untagged) wins. Otherwise the
/// span from the first `{` to the last `}` is taken, with single quotes
/// normalized to double quotes since models sometimes emit Python-style
/// dict literals.
pub fn extract_json(text: &str) -> Result<serde_json::Value, ExtractionError> {
    if let Some(caps) = FENCED_JSON.captures(text) {
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return serde_json::from_str(body.trim())
            .map_err(|e| ExtractionError::InvalidJson(e.to_string()));
    }

    let start = text.find('{').ok_or(ExtractionError::NoJsonPayload)?;
    let end = text.rfind('}').ok_or(ExtractionError::NoJsonPayload)?;
    if end < start {
        return Err(ExtractionError::NoJsonPayload);
    }
    let span = &text[start..=end];
    let normalized = span.replace('\'', "\"");
    serde_json::from_str(&normalized).map_err(|e| ExtractionError::InvalidJson(e.to_string()))
}

/// Extracts an HTML document from a model response.
///
/// A fenced block (tagged `html` or untagged) wins. Failing that, the raw
/// text is accepted verbatim when it plainly is a document already.
pub fn extract_html(text: &str) -> Result<String, ExtractionError> {
    if let Some(caps) = FENCED_HTML.captures(text) {
        let body = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
        return Ok(body.to_string());
    }

    let trimmed = text.trim_start();
    let lowered = trimmed.to_ascii_lowercase();
    if lowered.starts_with("<!doctype") || lowered.starts_with("<html") || lowered.contains("<body")
    {
        return Ok(text.to_string());
    }

    Err(ExtractionError::NotHtml)
}
