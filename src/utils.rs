//! Common utility functions shared across the codebase.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Trims the text and collapses every internal whitespace run (including
/// newlines from template formatting) into a single space.
///
/// # Examples
///
/// ```
/// use ngx_extract::utils::collapse_whitespace;
///
/// assert_eq!(collapse_whitespace("  Hello \n\t World  "), "Hello World");
/// assert_eq!(collapse_whitespace("   "), "");
/// ```
pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text.trim(), " ").into_owned()
}

/// Strips a leading UTF-8 byte order mark.
pub fn strip_bom(content: &str) -> &str {
    content.strip_prefix('\u{feff}').unwrap_or(content)
}
