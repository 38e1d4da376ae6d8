// File: src/rules.rs
// Purpose: Rule-string grammar ("required|min:3|max:20") and typed constraints

use crate::error::{FormError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `name[:param]` segment of a rule string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRule {
    pub rule: String,
    pub param: Option<String>,
}

impl ParsedRule {
    pub fn new(rule: impl Into<String>, param: Option<&str>) -> Self {
        Self {
            rule: rule.into(),
            param: param.map(str::to_string),
        }
    }
}

/// Split a rule string into ordered `(rule, param)` pairs
///
/// Segments are separated by `|`; the first `:` separates name from
/// parameter, so `regex:^a:b$` keeps `^a:b$` whole. Empty segments are
/// skipped and an empty parameter is treated as absent.
pub fn parse_rule_string(rules: &str) -> Vec<ParsedRule> {
    rules
        .split('|')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once(':') {
            Some((name, param)) => {
                let param = param.trim();
                ParsedRule::new(name.trim(), (!param.is_empty()).then_some(param))
            }
            None => ParsedRule::new(segment, None),
        })
        .collect()
}

/// A single typed constraint
#[derive(Debug, Clone)]
pub enum Constraint {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
    Length(usize),
    Between(usize, usize),
    Katakana,
    Hiragana,
    Digits,
    Romaji,
    NoSpace,
    Url,
    Pattern(Regex),
}

const DEFAULT_MIN: usize = 1;
const DEFAULT_MAX: usize = 255;
const DEFAULT_LENGTH: usize = 1;
const DEFAULT_BETWEEN: (usize, usize) = (0, 255);

impl Constraint {
    /// Resolve a parsed rule into a constraint
    ///
    /// Returns `Ok(None)` for a `regex` rule that has no usable pattern: an
    /// uncompilable pattern is logged and dropped instead of failing the form.
    pub fn from_parsed(parsed: &ParsedRule) -> Result<Option<Constraint>> {
        let param = parsed.param.as_deref();
        let constraint = match parsed.rule.as_str() {
            "required" => Constraint::Required,
            "email" => Constraint::Email,
            "min" => Constraint::MinLength(size_param(parsed, DEFAULT_MIN)?),
            "max" => Constraint::MaxLength(size_param(parsed, DEFAULT_MAX)?),
            "length" => Constraint::Length(size_param(parsed, DEFAULT_LENGTH)?),
            "between" => {
                let (min, max) = between_param(parsed)?;
                Constraint::Between(min, max)
            }
            "katakana" => Constraint::Katakana,
            "hiragana" => Constraint::Hiragana,
            "number" => Constraint::Digits,
            "romaji" => Constraint::Romaji,
            "nospace" => Constraint::NoSpace,
            "url" => Constraint::Url,
            "regex" => {
                let Some(pattern) = param else {
                    return Ok(None);
                };
                match Regex::new(pattern) {
                    Ok(re) => Constraint::Pattern(re),
                    Err(err) => {
                        tracing::warn!("Invalid regex pattern `{}`: {}", pattern, err);
                        return Ok(None);
                    }
                }
            }
            other => {
                return Err(FormError::UnknownRule {
                    field: String::new(),
                    rule: other.to_string(),
                })
            }
        };
        Ok(Some(constraint))
    }

    /// The rule name this constraint was written as
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::Required => "required",
            Constraint::Email => "email",
            Constraint::MinLength(_) => "min",
            Constraint::MaxLength(_) => "max",
            Constraint::Length(_) => "length",
            Constraint::Between(..) => "between",
            Constraint::Katakana => "katakana",
            Constraint::Hiragana => "hiragana",
            Constraint::Digits => "number",
            Constraint::Romaji => "romaji",
            Constraint::NoSpace => "nospace",
            Constraint::Url => "url",
            Constraint::Pattern(_) => "regex",
        }
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Constraint::MinLength(a), Constraint::MinLength(b))
            | (Constraint::MaxLength(a), Constraint::MaxLength(b))
            | (Constraint::Length(a), Constraint::Length(b)) => a == b,
            (Constraint::Between(a1, a2), Constraint::Between(b1, b2)) => a1 == b1 && a2 == b2,
            (Constraint::Pattern(a), Constraint::Pattern(b)) => a.as_str() == b.as_str(),
            (a, b) => std::mem::discriminant(a) == std::mem::discriminant(b),
        }
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constraint::MinLength(n) | Constraint::MaxLength(n) | Constraint::Length(n) => {
                write!(f, "{}:{}", self.name(), n)
            }
            Constraint::Between(min, max) => write!(f, "between:{},{}", min, max),
            Constraint::Pattern(re) => write!(f, "regex:{}", re.as_str()),
            _ => f.write_str(self.name()),
        }
    }
}

pub(crate) fn size_param(parsed: &ParsedRule, default: usize) -> Result<usize> {
    match parsed.param.as_deref() {
        None => Ok(default),
        Some(raw) => parse_size(parsed, raw),
    }
}

fn between_param(parsed: &ParsedRule) -> Result<(usize, usize)> {
    let Some(raw) = parsed.param.as_deref() else {
        return Ok(DEFAULT_BETWEEN);
    };
    match raw.split_once(',') {
        Some((min, max)) => Ok((parse_size(parsed, min.trim())?, parse_size(parsed, max.trim())?)),
        None => Err(invalid_param(parsed, raw)),
    }
}

fn parse_size(parsed: &ParsedRule, raw: &str) -> Result<usize> {
    raw.parse::<usize>().map_err(|_| invalid_param(parsed, raw))
}

fn invalid_param(parsed: &ParsedRule, raw: &str) -> FormError {
    FormError::InvalidParam {
        field: String::new(),
        rule: parsed.rule.clone(),
        param: raw.to_string(),
    }
}

/// Parse a rule string straight into constraints
pub fn parse_constraints(rules: &str) -> Result<Vec<Constraint>> {
    let mut constraints = Vec::new();
    for parsed in parse_rule_string(rules) {
        if let Some(constraint) = Constraint::from_parsed(&parsed)? {
            constraints.push(constraint);
        }
    }
    Ok(constraints)
}

/// Ordered constraints for one field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleSet {
    constraints: Vec<Constraint>,
}

impl RuleSet {
    pub fn parse(rules: &str) -> Result<Self> {
        Ok(Self {
            constraints: parse_constraints(rules)?,
        })
    }

    pub fn is_required(&self) -> bool {
        self.constraints.contains(&Constraint::Required)
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_rule_string() {
        let rules = parse_rule_string("required|min:3|max:20");
        assert_eq!(
            rules,
            vec![
                ParsedRule::new("required", None),
                ParsedRule::new("min", Some("3")),
                ParsedRule::new("max", Some("20")),
            ]
        );
    }

    #[test]
    fn test_parse_trims_and_skips_empty_segments() {
        let rules = parse_rule_string(" required || between : 2, 8 |");
        assert_eq!(
            rules,
            vec![
                ParsedRule::new("required", None),
                ParsedRule::new("between", Some("2, 8")),
            ]
        );
        assert!(parse_rule_string("").is_empty());
        assert!(parse_rule_string(" | ").is_empty());
    }

    #[test]
    fn test_param_splits_on_first_colon() {
        let rules = parse_rule_string(r"regex:^\d{2}:\d{2}$");
        assert_eq!(rules, vec![ParsedRule::new("regex", Some(r"^\d{2}:\d{2}$"))]);
    }

    #[test]
    fn test_constraint_defaults() {
        let constraints = parse_constraints("min|max|length|between").unwrap();
        assert_eq!(
            constraints,
            vec![
                Constraint::MinLength(1),
                Constraint::MaxLength(255),
                Constraint::Length(1),
                Constraint::Between(0, 255),
            ]
        );
    }

    #[test]
    fn test_between_param() {
        let constraints = parse_constraints("between:2,8").unwrap();
        assert_eq!(constraints, vec![Constraint::Between(2, 8)]);
    }

    #[test]
    fn test_unknown_rule_is_rejected() {
        let err = parse_constraints("required|zipcode").unwrap_err();
        assert!(matches!(err, FormError::UnknownRule { ref rule, .. } if rule == "zipcode"));
    }

    #[test]
    fn test_invalid_param_is_rejected() {
        assert!(matches!(
            parse_constraints("min:abc").unwrap_err(),
            FormError::InvalidParam { .. }
        ));
        assert!(matches!(
            parse_constraints("between:5").unwrap_err(),
            FormError::InvalidParam { .. }
        ));
    }

    #[test]
    fn test_invalid_regex_is_skipped() {
        let constraints = parse_constraints("required|regex:([a-z|max:4").unwrap();
        // `|` splits the broken pattern, leaving `([a-z` which fails to compile
        assert_eq!(constraints, vec![Constraint::Required, Constraint::MaxLength(4)]);
    }

    #[test]
    fn test_regex_without_pattern_is_skipped() {
        assert!(parse_constraints("regex").unwrap().is_empty());
    }

    #[test]
    fn test_rule_set_required() {
        assert!(RuleSet::parse("email|required").unwrap().is_required());
        assert!(!RuleSet::parse("email").unwrap().is_required());
    }

    #[test]
    fn test_display_round_trip() {
        let constraints = parse_constraints("required|min:3|between:1,4|regex:^a").unwrap();
        let rendered: Vec<String> = constraints.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, vec!["required", "min:3", "between:1,4", "regex:^a"]);
    }
}
