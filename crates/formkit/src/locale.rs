// File: src/locale.rs
// Purpose: Failure categories and their Japanese / English messages

use crate::value::ValueType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Message language, passed into every validation call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ja" => Ok(Locale::Ja),
            "en" => Ok(Locale::En),
            other => Err(format!("unsupported locale `{}` (expected `ja` or `en`)", other)),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Locale::Ja => "ja",
            Locale::En => "en",
        })
    }
}

/// Why a value failed, independent of language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "code", content = "param", rename_all = "snake_case")]
pub enum Issue {
    Required,
    InvalidType(ValueType),
    InvalidUnion,
    InvalidOption,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Length(usize),
    BetweenMin(usize),
    BetweenMax(usize),
    Katakana,
    Hiragana,
    Digits,
    Romaji,
    NoSpace,
    Url,
    Pattern,
    NumberInput,
    DateInput,
    MinItems(usize),
    MaxItems(usize),
}

impl Locale {
    /// Render an issue in this locale
    pub fn message(self, issue: &Issue) -> String {
        match self {
            Locale::Ja => ja(issue),
            Locale::En => en(issue),
        }
    }

    /// Label for a primitive type inside "expected X" messages
    pub fn type_label(self, ty: ValueType) -> &'static str {
        match (self, ty) {
            (Locale::Ja, ValueType::String) => "文字列",
            (Locale::Ja, ValueType::Number) => "数値",
            (Locale::Ja, ValueType::Boolean) => "真偽値",
            (Locale::Ja, ValueType::Array) => "配列",
            (Locale::Ja, ValueType::Date) => "日付",
            (Locale::Ja, ValueType::Null) => "オブジェクト",
            (Locale::En, ValueType::String) => "string",
            (Locale::En, ValueType::Number) => "number",
            (Locale::En, ValueType::Boolean) => "boolean",
            (Locale::En, ValueType::Array) => "array",
            (Locale::En, ValueType::Date) => "date",
            (Locale::En, ValueType::Null) => "object",
        }
    }
}

fn ja(issue: &Issue) -> String {
    match issue {
        Issue::Required => "必須項目です".into(),
        Issue::InvalidType(ty) => format!(
            "無効な入力です（{}が必要です）",
            Locale::Ja.type_label(*ty)
        ),
        Issue::InvalidUnion => "選択された値が無効です".into(),
        Issue::InvalidOption => "有効な選択肢を選んでください".into(),
        Issue::Email => "有効なメールアドレスを入力してください".into(),
        Issue::MinLength(n) => format!("最低{}文字で入力してください", n),
        Issue::MaxLength(n) => format!("最大{}文字で入力してください", n),
        Issue::Length(n) => format!("{}文字で入力してください", n),
        Issue::BetweenMin(n) => format!("{}文字以上で入力してください", n),
        Issue::BetweenMax(n) => format!("{}文字以下で入力してください", n),
        Issue::Katakana => "カタカナと空白のみで入力してください".into(),
        Issue::Hiragana => "ひらがなと空白のみで入力してください".into(),
        Issue::Digits => "数字のみで入力してください".into(),
        Issue::Romaji => "ローマ字、数字、アンダースコア、ハイフンのみで入力してください".into(),
        Issue::NoSpace => "空白を含まないでください".into(),
        Issue::Url => "有効なURLを入力してください".into(),
        Issue::Pattern => "入力形式が正しくありません".into(),
        Issue::NumberInput => "数値を入力してください".into(),
        Issue::DateInput => "日付を選択してください".into(),
        Issue::MinItems(n) => format!("最低{}項目を選択してください", n),
        Issue::MaxItems(n) => format!("最大{}項目まで選択できます", n),
    }
}

fn en(issue: &Issue) -> String {
    match issue {
        Issue::Required => "This field is required".into(),
        Issue::InvalidType(ty) => {
            format!("Invalid input ({} expected)", Locale::En.type_label(*ty))
        }
        Issue::InvalidUnion => "The selected value is invalid".into(),
        Issue::InvalidOption => "Please select a valid option".into(),
        Issue::Email => "Please enter a valid email address".into(),
        Issue::MinLength(n) | Issue::BetweenMin(n) => format!("Must be at least {} characters", n),
        Issue::MaxLength(n) | Issue::BetweenMax(n) => format!("Must be at most {} characters", n),
        Issue::Length(n) => format!("Must be exactly {} characters", n),
        Issue::Katakana => "Only katakana and spaces are allowed".into(),
        Issue::Hiragana => "Only hiragana and spaces are allowed".into(),
        Issue::Digits => "Only numbers are allowed".into(),
        Issue::Romaji => "Only letters, numbers, underscores, and hyphens are allowed".into(),
        Issue::NoSpace => "Spaces are not allowed".into(),
        Issue::Url => "Please enter a valid URL".into(),
        Issue::Pattern => "Invalid format".into(),
        Issue::NumberInput => "Please enter a number".into(),
        Issue::DateInput => "Please select a date".into(),
        Issue::MinItems(n) => format!("Please select at least {} items", n),
        Issue::MaxItems(n) => format!("You can select up to {} items", n),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_locale_is_japanese() {
        assert_eq!(Locale::default(), Locale::Ja);
        assert_eq!(Locale::default().message(&Issue::Required), "必須項目です");
    }

    #[test]
    fn test_parameterized_messages() {
        assert_eq!(Locale::Ja.message(&Issue::MinLength(3)), "最低3文字で入力してください");
        assert_eq!(Locale::En.message(&Issue::MaxLength(5)), "Must be at most 5 characters");
        assert_eq!(Locale::En.message(&Issue::MaxItems(10)), "You can select up to 10 items");
    }

    #[test]
    fn test_invalid_type_uses_type_label() {
        assert_eq!(
            Locale::Ja.message(&Issue::InvalidType(ValueType::String)),
            "無効な入力です（文字列が必要です）"
        );
        assert_eq!(
            Locale::En.message(&Issue::InvalidType(ValueType::Array)),
            "Invalid input (array expected)"
        );
    }

    #[test]
    fn test_locale_from_str() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!("ja".parse::<Locale>().unwrap(), Locale::Ja);
        assert!("fr".parse::<Locale>().is_err());
    }
}
