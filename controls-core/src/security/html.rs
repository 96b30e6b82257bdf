//! Cross-site scripting controls

use lazy_static::lazy_static;
use regex::Regex;

use super::{replace_in_order, Replacement};

lazy_static! {
    /// Letters, numbers, spaces, and basic punctuation
    static ref SAFE_TEXT_REGEX: Regex =
        Regex::new(r"^[a-zA-Z0-9 .,!?\-@]+$").expect("Failed to compile safe text regex");

    static ref TAG_REGEX: Regex = Regex::new(r"<[^>]*>").expect("Failed to compile tag regex");
}

/// Matched against the lowercased input.
const SCRIPT_MARKERS: &[&str] = &["<script", "</script", "javascript:", "onerror=", "onload="];

/// `&` must stay first or the entities added later get escaped again.
const HTML_ENTITIES: &[Replacement] = &[
    ("&", "&amp;"),
    ("<", "&lt;"),
    (">", "&gt;"),
    ("\"", "&quot;"),
    ("'", "&#x27;"),
    ("/", "&#x2F;"),
];

/// Reject script markers (case-insensitive) and any raw angle bracket.
/// Absent or empty input is considered safe.
pub fn is_safe_html_input(input: Option<&str>) -> bool {
    let value = match input {
        None | Some("") => return true,
        Some(value) => value,
    };

    let lower = value.to_lowercase();
    let has_marker = SCRIPT_MARKERS.iter().any(|marker| lower.contains(marker));

    !(has_marker || value.contains('<') || value.contains('>'))
}

/// Allow-list check for plain text. Absent or empty input is considered safe.
pub fn is_safe_text_pattern(input: Option<&str>) -> bool {
    match input {
        None | Some("") => true,
        Some(value) => SAFE_TEXT_REGEX.is_match(value),
    }
}

/// HTML-encode `& < > " ' /`.
pub fn sanitize_html_output(input: Option<&str>) -> Option<String> {
    input.map(|value| replace_in_order(value, HTML_ENTITIES))
}

/// Delete anything shaped like a tag, keeping the text between tags.
///
/// There is no notion of nesting: a `>` inside an attribute value ends the
/// tag early and the rest of the attribute is kept as text.
pub fn strip_html_tags(input: Option<&str>) -> Option<String> {
    input.map(|value| TAG_REGEX.replace_all(value, "").into_owned())
}
