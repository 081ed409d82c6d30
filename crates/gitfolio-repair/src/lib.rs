//! Structural repair for possibly-malformed HTML documents.
//!
//! The repair pass normalizes a document into a well-formed skeleton and
//! reports every corrective action taken. It never fails: an unexpected
//! internal error downgrades to returning the input untouched with an
//! explanatory entry.

pub mod normalize;
mod repair;

pub use normalize::{ensure_description_meta, ensure_icon_font_link, ensure_theme_script};
pub use repair::{repair, RepairOutcome};

pub(crate) const FONT_AWESOME_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css";

/// Byte offset of the first case-insensitive occurrence of `needle`.
/// ASCII lowercasing keeps byte offsets stable.
pub(crate) fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    find_ci(haystack, needle).is_some()
}

/// Byte offset just past the `>` of the first `prefix...>` opening tag.
pub(crate) fn opening_tag_end(html: &str, prefix: &str) -> Option<usize> {
    let start = find_ci(html, prefix)?;
    html[start..].find('>').map(|rel| start + rel + 1)
}

/// Byte offset just past the `>` of the opening `<head>` tag, tolerating
/// attributes. `<header>` does not count.
pub(crate) fn head_open_end(html: &str) -> Option<usize> {
    let lowered = html.to_ascii_lowercase();
    let mut from = 0;
    while let Some(rel) = lowered[from..].find("<head") {
        let start = from + rel;
        let after = start + "<head".len();
        match lowered.as_bytes().get(after) {
            Some(b'>') | Some(b' ') | Some(b'\t') | Some(b'\n') | Some(b'\r') => {
                return html[start..].find('>').map(|rel| start + rel + 1);
            }
            _ => from = after,
        }
    }
    None
}

/// Where head content can be inserted: before `</head>` when present,
/// otherwise right after the opening `<head>` tag. Documents are accepted
/// without a closing head tag, so the literal `</head>` anchor alone is
/// not enough.
pub(crate) fn head_insertion_point(html: &str) -> Option<usize> {
    find_ci(html, "</head>").or_else(|| head_open_end(html))
}
