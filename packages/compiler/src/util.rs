//! Utility Functions
//!
//! String helpers shared by the compiler and the view layer.

use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips surrounding whitespace, then single quotes, then double quotes
/// from an attribute name as handed over by the grammar.
pub fn strip_quotes(input: &str) -> &str {
    input.trim().trim_matches('\'').trim_matches('"')
}

/// Escapes text for inclusion in markup. `'` and `\` are left as they are.
pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Removes every run of whitespace. Used to compare rendered markup.
pub fn strip_whitespace(input: &str) -> String {
    WHITESPACE_RE.replace_all(input, "").into_owned()
}
