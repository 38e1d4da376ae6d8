// File: src/value.rs
// Purpose: Dynamic form values and configuration-side scalars

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A value held by form state
///
/// Inputs deliver strings, pickers deliver dates, multi-selects deliver
/// sequences. `Date` is never produced by deserialization; only the caster
/// creates it.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(untagged)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(f64),
    String(String),
    Array(Vec<Value>),
    #[serde(skip)]
    Date(DateTime<Utc>),
}

/// Primitive category of a value, used for type-mismatch messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Array,
    Date,
    Null,
}

impl Value {
    /// Null or the empty string: what an untouched input submits
    pub fn is_absent(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Bool(_) => ValueType::Boolean,
            Value::Number(_) => ValueType::Number,
            Value::String(_) => ValueType::String,
            Value::Array(_) => ValueType::Array,
            Value::Date(_) => ValueType::Date,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Browser-style string conversion
    ///
    /// Integral numbers drop the `.0`, arrays join their items with `,`
    /// and null becomes the empty string.
    pub fn to_display_string(&self) -> String {
        match self {
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => format_number(*n),
            Value::String(s) => s.clone(),
            Value::Array(arr) => arr
                .iter()
                .map(Value::to_display_string)
                .collect::<Vec<_>>()
                .join(","),
            Value::Date(d) => format_timestamp(d),
            Value::Null => String::new(),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < i64::MAX as f64 {
                    serializer.serialize_i64(*n as i64)
                } else {
                    serializer.serialize_f64(*n)
                }
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => items.serialize(serializer),
            Value::Date(d) => serializer.serialize_str(&format_timestamp(d)),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_display_string())
    }
}

/// RFC 3339 with millisecond precision and a `Z` suffix
pub fn format_timestamp(d: &DateTime<Utc>) -> String {
    d.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e21 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n as f64)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n as f64)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<Vec<Value>> for Value {
    fn from(arr: Vec<Value>) -> Self {
        Value::Array(arr)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Value::Date(d)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map(Value::Number).unwrap_or(Value::Null),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            // Objects have no form-value meaning; keep their JSON text
            other @ serde_json::Value::Object(_) => Value::String(other.to_string()),
        }
    }
}

/// A typed comparison value written in configuration
///
/// Predicate operands and select option values are scalars; their variant is
/// fixed when the configuration is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Bool(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    pub fn value_type(&self) -> ValueType {
        match self {
            Scalar::Bool(_) => ValueType::Boolean,
            Scalar::Number(_) => ValueType::Number,
            Scalar::String(_) => ValueType::String,
        }
    }
}

impl From<Scalar> for Value {
    fn from(s: Scalar) -> Self {
        match s {
            Scalar::Bool(b) => Value::Bool(b),
            Scalar::Number(n) => Value::Number(n),
            Scalar::String(s) => Value::String(s),
        }
    }
}

impl From<&Scalar> for Value {
    fn from(s: &Scalar) -> Self {
        s.clone().into()
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<i32> for Scalar {
    fn from(n: i32) -> Self {
        Scalar::Number(n as f64)
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Bool(b)
    }
}

/// One scalar or a list of scalars
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operand {
    One(Scalar),
    Many(Vec<Scalar>),
}

impl From<&Operand> for Value {
    fn from(op: &Operand) -> Self {
        match op {
            Operand::One(s) => s.into(),
            Operand::Many(items) => Value::Array(items.iter().map(Value::from).collect()),
        }
    }
}

impl From<Scalar> for Operand {
    fn from(s: Scalar) -> Self {
        Operand::One(s)
    }
}

impl From<Vec<Scalar>> for Operand {
    fn from(items: Vec<Scalar>) -> Self {
        Operand::Many(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_deserialize_untagged() {
        let v: Value = serde_json::from_value(json!(["a", 1, true, null])).unwrap();
        assert_eq!(
            v,
            Value::Array(vec![
                Value::from("a"),
                Value::Number(1.0),
                Value::Bool(true),
                Value::Null,
            ])
        );
    }

    #[test]
    fn test_serialize_numbers_and_dates() {
        let date = Utc.with_ymd_and_hms(2023, 10, 5, 5, 23, 41).unwrap();
        let v = Value::Array(vec![Value::Number(42.0), Value::Number(3.5), Value::Date(date)]);
        assert_eq!(
            serde_json::to_value(&v).unwrap(),
            json!([42, 3.5, "2023-10-05T05:23:41.000Z"])
        );
    }

    #[test]
    fn test_display_string() {
        assert_eq!(Value::Number(42.0).to_display_string(), "42");
        assert_eq!(Value::Number(0.5).to_display_string(), "0.5");
        assert_eq!(
            Value::Array(vec![Value::from("a"), Value::from(2)]).to_display_string(),
            "a,2"
        );
        assert_eq!(Value::Null.to_display_string(), "");
    }

    #[test]
    fn test_is_absent() {
        assert!(Value::Null.is_absent());
        assert!(Value::from("").is_absent());
        assert!(!Value::from(" ").is_absent());
        assert!(!Value::Bool(false).is_absent());
        assert!(!Value::Array(vec![]).is_absent());
    }

    #[test]
    fn test_operand_deserialize() {
        let one: Operand = serde_json::from_value(json!(5)).unwrap();
        assert_eq!(one, Operand::One(Scalar::Number(5.0)));
        let many: Operand = serde_json::from_value(json!(["a", true])).unwrap();
        assert_eq!(
            many,
            Operand::Many(vec![Scalar::from("a"), Scalar::Bool(true)])
        );
    }
}
