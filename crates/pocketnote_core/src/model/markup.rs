//! Plain-text projections of rich note markup.
//!
//! Stripping removes every `<...>` span and nothing else; the stored text is
//! never rewritten.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Title used when the first stripped line is blank.
pub const UNTITLED: &str = "Untitled";
/// Maximum preview length in characters.
pub const PREVIEW_MAX_CHARS: usize = 100;

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));

/// Removes all markup tag spans from `text`.
pub fn strip_html(text: &str) -> Cow<'_, str> {
    TAG_RE.replace_all(text, "")
}

/// Derives the display title: first stripped line, trimmed.
pub fn derive_title(text: &str) -> String {
    let plain = strip_html(text);
    let first_line = plain.split('\n').next().unwrap_or("").trim();
    if first_line.is_empty() {
        UNTITLED.to_string()
    } else {
        first_line.to_string()
    }
}

/// Derives the list preview: up to 100 stripped characters after the first
/// line.
pub fn derive_preview(text: &str) -> String {
    let plain = strip_html(text);
    match plain.split_once('\n') {
        Some((_, rest)) => rest.trim().chars().take(PREVIEW_MAX_CHARS).collect(),
        None => String::new(),
    }
}
