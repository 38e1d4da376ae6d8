//! String validation functions
//!
//! Lengths are counted in characters, not bytes, so a Japanese name of
//! three characters satisfies `min:3`.

use regex::Regex;

/// Number of characters in `s`
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Validates minimum string length
pub fn has_min_length(s: &str, min: usize) -> bool {
    char_len(s) >= min
}

/// Validates maximum string length
pub fn has_max_length(s: &str, max: usize) -> bool {
    char_len(s) <= max
}

/// Validates exact string length
pub fn has_exact_length(s: &str, len: usize) -> bool {
    char_len(s) == len
}

/// Whether the string contains any whitespace
pub fn contains_whitespace(s: &str) -> bool {
    s.chars().any(char::is_whitespace)
}

/// URL validation
///
/// Accepts anything `url::Url` can parse as an absolute URL.
pub fn is_valid_url(url_str: &str) -> bool {
    url::Url::parse(url_str).is_ok()
}

/// Regex pattern matching against a pre-compiled pattern
///
/// Unanchored: the pattern may match anywhere in the value.
pub fn matches_pattern(value: &str, pattern: &Regex) -> bool {
    pattern.is_match(value)
}
