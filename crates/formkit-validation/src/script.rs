//! Character-class validators: kana scripts, digits, romaji
//!
//! Every predicate here accepts the empty string; emptiness is the
//! `required` rule's concern.

use once_cell::sync::Lazy;
use regex::Regex;

static KATAKANA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[ア-ヶー゠-ヿ\s]*$").unwrap());

static HIRAGANA_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[あ-んー\s]*$").unwrap());

static DIGITS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").unwrap());

static ROMAJI_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").unwrap());

/// Full-width katakana, the prolonged sound mark and whitespace only
pub fn is_katakana(s: &str) -> bool {
    KATAKANA_REGEX.is_match(s)
}

/// Hiragana, the prolonged sound mark and whitespace only
pub fn is_hiragana(s: &str) -> bool {
    HIRAGANA_REGEX.is_match(s)
}

/// Decimal digits only
pub fn is_digits(s: &str) -> bool {
    s.is_empty() || DIGITS_REGEX.is_match(s)
}

/// ASCII letters, digits, underscore and hyphen
pub fn is_romaji(s: &str) -> bool {
    s.is_empty() || ROMAJI_REGEX.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana() {
        assert!(is_katakana(""));
        assert!(is_katakana("ヤマダ タロウ"));
        assert!(is_katakana("コーヒー"));
        assert!(!is_katakana("やまだ"));
        assert!(!is_katakana("Yamada"));
    }

    #[test]
    fn test_hiragana() {
        assert!(is_hiragana(""));
        assert!(is_hiragana("やまだ たろう"));
        assert!(!is_hiragana("ヤマダ"));
        assert!(!is_hiragana("山田"));
    }

    #[test]
    fn test_digits() {
        assert!(is_digits(""));
        assert!(is_digits("0123"));
        assert!(!is_digits("12a"));
        assert!(!is_digits("-1"));
    }

    #[test]
    fn test_romaji() {
        assert!(is_romaji(""));
        assert!(is_romaji("user_name-01"));
        assert!(!is_romaji("user name"));
        assert!(!is_romaji("ユーザー"));
    }
}
