// File: src/payload.rs
// Purpose: Turn raw field states into a typed submission payload

use crate::cast::{cast, parse_gmt_string};
use crate::field::{FieldKind, FieldMap, FormValues};
use crate::value::{format_timestamp, Value};
use crate::visibility::hidden_fields;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Typed payload keyed by field name
pub type Payload = BTreeMap<String, Value>;

/// Raw state of one field as tracked by the hosting form
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldState {
    pub value: Value,
    pub touched: bool,
    pub dirty: bool,
}

impl FieldState {
    pub fn new(value: impl Into<Value>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Current values of a state map
pub fn state_values(states: &BTreeMap<String, FieldState>) -> FormValues {
    states
        .iter()
        .map(|(name, state)| (name.clone(), state.value.clone()))
        .collect()
}

/// Cast every state value using its field's kind as the hint
///
/// States without a descriptor are cast without a hint.
pub fn to_payload(states: &BTreeMap<String, FieldState>, fields: &FieldMap) -> Payload {
    states
        .iter()
        .map(|(name, state)| {
            let kind = fields.get(name).map(|f| &f.kind);
            (name.clone(), cast_state(&state.value, kind))
        })
        .collect()
}

/// Like [`to_payload`], leaving out fields hidden by their predicates
pub fn visible_payload(states: &BTreeMap<String, FieldState>, fields: &FieldMap) -> Payload {
    let hidden = hidden_fields(fields, &state_values(states));
    let mut payload = to_payload(states, fields);
    payload.retain(|name, _| !hidden.contains(name));
    payload
}

fn cast_state(raw: &Value, kind: Option<&FieldKind>) -> Value {
    let hint = kind.map(FieldKind::cast_hint);
    match (raw, kind) {
        (Value::Array(items), Some(FieldKind::MultiSelect { .. })) => Value::Array(
            items
                .iter()
                .map(|item| normalize_gmt(cast(item, hint)))
                .collect(),
        ),
        _ => normalize_gmt(cast(raw, hint)),
    }
}

// A string still carrying "GMT" is a stringified date that escaped casting
fn normalize_gmt(value: Value) -> Value {
    match value {
        Value::String(s) if s.contains("GMT") => match parse_gmt_string(&s) {
            Some(date) => Value::String(format_timestamp(&date)),
            None => {
                tracing::debug!("Leaving unparsable GMT string `{}` as text", s);
                Value::String(s)
            }
        },
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Condition, FieldDescriptor, SelectOption};
    use crate::value::Scalar;
    use pretty_assertions::assert_eq;

    fn states(pairs: Vec<(&str, Value)>) -> BTreeMap<String, FieldState> {
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), FieldState::new(v)))
            .collect()
    }

    #[test]
    fn test_to_payload_uses_field_kind() {
        let mut fields = FieldMap::new();
        fields.insert("age".into(), FieldDescriptor::new("Age", FieldKind::Number));
        fields.insert("active".into(), FieldDescriptor::new("Active", FieldKind::Boolean));

        let payload = to_payload(
            &states(vec![
                ("age", Value::from("42")),
                ("active", Value::from("true")),
                ("name", Value::from("bob")),
            ]),
            &fields,
        );

        assert_eq!(payload.get("age"), Some(&Value::Number(42.0)));
        assert_eq!(payload.get("active"), Some(&Value::Bool(true)));
        assert_eq!(payload.get("name"), Some(&Value::from("bob")));
    }

    #[test]
    fn test_text_kind_keeps_numeric_strings() {
        let mut fields = FieldMap::new();
        fields.insert("zip".into(), FieldDescriptor::text("Zip"));
        let payload = to_payload(&states(vec![("zip", Value::from("0120034"))]), &fields);
        assert_eq!(payload.get("zip"), Some(&Value::from("0120034")));
    }

    #[test]
    fn test_multi_select_cast_per_element() {
        let mut fields = FieldMap::new();
        fields.insert(
            "ids".into(),
            FieldDescriptor::new(
                "Ids",
                FieldKind::multi_select(vec![SelectOption::new("A", 1), SelectOption::new("B", 2)]),
            ),
        );
        let payload = to_payload(
            &states(vec![("ids", Value::Array(vec![Value::from("1"), Value::from("2")]))]),
            &fields,
        );
        assert_eq!(
            payload.get("ids"),
            Some(&Value::Array(vec![Value::Number(1.0), Value::Number(2.0)]))
        );
    }

    #[test]
    fn test_gmt_strings_are_normalized() {
        let payload = to_payload(
            &states(vec![
                ("a", Value::from("Thu Oct 05 2023 14:23:41 GMT+0900 (Japan Standard Time)")),
                ("b", Value::from("Thu, 05 Oct 2023 05:23:41 GMT")),
                ("c", Value::from("GMT is a time zone")),
            ]),
            &FieldMap::new(),
        );
        assert_eq!(payload.get("a"), Some(&Value::from("2023-10-05T05:23:41.000Z")));
        assert_eq!(payload.get("b"), Some(&Value::from("2023-10-05T05:23:41.000Z")));
        assert_eq!(payload.get("c"), Some(&Value::from("GMT is a time zone")));
    }

    #[test]
    fn test_visible_payload_drops_hidden() {
        let mut fields = FieldMap::new();
        fields.insert("kind".into(), FieldDescriptor::text("Kind"));
        fields.insert(
            "company".into(),
            FieldDescriptor::text("Company")
                .show_when(Condition::equals("kind", Scalar::from("corp"))),
        );

        let raw = states(vec![("kind", Value::from("person")), ("company", Value::from("Acme"))]);
        assert!(to_payload(&raw, &fields).contains_key("company"));
        assert!(!visible_payload(&raw, &fields).contains_key("company"));
    }

    #[test]
    fn test_field_state_deserialize_defaults() {
        let state: FieldState = serde_json::from_str(r#"{"value": "x"}"#).unwrap();
        assert_eq!(state, FieldState::new("x"));
        let empty: FieldState = serde_json::from_str("{}").unwrap();
        assert_eq!(empty.value, Value::Null);
    }
}
