// File: src/cast.rs
// Purpose: Best-effort classification of raw submitted values

use crate::value::Value;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// What a field declares about the type of its value
///
/// A hint narrows which conversions the caster may attempt. Without a hint
/// every conversion is tried in order: boolean, date, number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CastHint {
    Text,
    Number,
    Boolean,
    Date,
}

// Date, time, optional fraction, then `Z` or a numeric offset
static ISO_TIMESTAMP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(concat!(
        r"(?i)^([0-9]{4}-[0-9]{2}-[0-9]{2})T([0-9]{2}:[0-9]{2}:[0-9]{2})",
        r"(?:\.([0-9]+))?(Z|[+\-][0-9]{2}:?[0-9]{2})$",
    ))
    .unwrap()
});

/// Cast a raw value into a boolean, date, number, string or null
pub fn cast(raw: &Value, hint: Option<CastHint>) -> Value {
    match raw {
        Value::Null => Value::Null,
        Value::Bool(b) => Value::Bool(*b),
        Value::Number(n) if n.is_nan() => Value::Null,
        Value::Number(n) => Value::Number(*n),
        Value::Date(d) => Value::Date(*d),
        Value::Array(_) => Value::String(raw.to_display_string()),
        Value::String(s) => cast_str(s, hint),
    }
}

fn cast_str(raw: &str, hint: Option<CastHint>) -> Value {
    let trimmed = raw.trim();

    if matches!(hint, None | Some(CastHint::Boolean)) {
        if let Some(b) = parse_bool_word(trimmed) {
            return Value::Bool(b);
        }
    }

    match hint {
        None => {
            if let Some(date) = parse_iso_timestamp(trimmed) {
                return Value::Date(date);
            }
        }
        Some(CastHint::Date) => {
            if let Some(date) = parse_loose_date(trimmed) {
                return Value::Date(date);
            }
        }
        _ => {}
    }

    if matches!(hint, None | Some(CastHint::Number)) {
        if let Some(n) = parse_finite(trimmed) {
            return Value::Number(n);
        }
    }

    Value::String(raw.to_string())
}

/// Boolean words: `true`, `1`, `yes` and `false`, `0`, `no`, empty
pub fn parse_bool_word(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Parse a non-empty string as a finite number
pub fn parse_finite(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Browser `Number()` reading: surrounding whitespace is ignored and a
/// blank string is zero
pub fn parse_js_number(s: &str) -> Option<f64> {
    if s.trim().is_empty() {
        return Some(0.0);
    }
    parse_finite(s)
}

/// Parse an ISO-8601 timestamp with a mandatory zone designator
///
/// Fractional seconds are truncated or padded to exactly milliseconds, so
/// `05:23:41.036132Z` reads as `05:23:41.036Z`.
pub fn parse_iso_timestamp(s: &str) -> Option<DateTime<Utc>> {
    let caps = ISO_TIMESTAMP.captures(s)?;
    let date = &caps[1];
    let time = &caps[2];
    let fraction = caps.get(3).map_or("", |m| m.as_str());
    let millis: String = fraction.chars().chain(std::iter::repeat('0')).take(3).collect();
    let offset = normalize_offset(&caps[4]);

    let normalized = format!("{}T{}.{}{}", date, time, millis, offset);
    DateTime::parse_from_rfc3339(&normalized)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

fn normalize_offset(offset: &str) -> String {
    if offset.eq_ignore_ascii_case("z") {
        return "Z".to_string();
    }
    if offset.contains(':') {
        offset.to_string()
    } else {
        format!("{}:{}", &offset[..3], &offset[3..])
    }
}

/// Lenient date parsing for date-kind fields
///
/// Accepts ISO timestamps, bare `YYYY-MM-DD` dates and zone-less
/// `YYYY-MM-DDTHH:MM[:SS]` values (read as UTC), RFC 2822 and the
/// browser's `Date.toString()` form.
pub fn parse_loose_date(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Some(d) = parse_iso_timestamp(s) {
        return Some(d);
    }
    if let Ok(d) = DateTime::parse_from_rfc3339(s) {
        return Some(d.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, format) {
            return Some(dt.and_utc());
        }
    }
    parse_gmt_string(s)
}

/// Parse the GMT-bearing strings browsers produce for dates
///
/// `Thu, 05 Oct 2023 05:23:41 GMT` (RFC 2822) and
/// `Thu Oct 05 2023 14:23:41 GMT+0900 (Japan Standard Time)`.
pub fn parse_gmt_string(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(d) = DateTime::parse_from_rfc2822(s) {
        return Some(d.with_timezone(&Utc));
    }
    let without_zone_name = match s.find(" (") {
        Some(idx) => &s[..idx],
        None => s,
    };
    DateTime::parse_from_str(without_zone_name, "%a %b %d %Y %H:%M:%S GMT%z")
        .ok()
        .map(|d| d.with_timezone(&Utc))
}
