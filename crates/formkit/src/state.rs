// File: src/state.rs
// Purpose: Form-state helpers for seeding and resetting field defaults

use crate::cast::cast;
use crate::field::{FieldMap, FormValues};
use crate::value::Value;

/// Empty value matching the type of the current one
fn empty_like(current: &Value) -> Value {
    match current {
        Value::String(_) => Value::String(String::new()),
        Value::Bool(_) => Value::Bool(false),
        Value::Array(_) => Value::Array(Vec::new()),
        Value::Number(_) | Value::Date(_) | Value::Null => Value::Null,
    }
}

/// Reset every field's default to the empty value of its current value's type
///
/// Fields without a current value get a null default.
pub fn clear(data: &FormValues, fields: &mut FieldMap) {
    for (name, field) in fields.iter_mut() {
        let current = data.get(name).unwrap_or(&Value::Null);
        field.default_value = Some(empty_like(current));
    }
}

/// Seed each field's default from `data`, cast with the field's kind
pub fn set_fields(data: &FormValues, fields: &mut FieldMap) {
    for (name, field) in fields.iter_mut() {
        let raw = data.get(name).unwrap_or(&Value::Null);
        field.default_value = Some(cast(raw, Some(field.kind.cast_hint())));
    }
    tracing::debug!(fields = fields.len(), "Seeded field defaults");
}

/// Starting values of a form: each field's default, or null
pub fn initial_values(fields: &FieldMap) -> FormValues {
    fields
        .iter()
        .map(|(name, field)| (name.clone(), field.default_value.clone().unwrap_or_default()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{FieldDescriptor, FieldKind};
    use pretty_assertions::assert_eq;

    fn form() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("name".into(), FieldDescriptor::text("Name").with_default("Taro"));
        fields.insert("age".into(), FieldDescriptor::new("Age", FieldKind::Number));
        fields.insert("agree".into(), FieldDescriptor::new("Agree", FieldKind::Boolean));
        fields.insert("tags".into(), FieldDescriptor::new("Tags", FieldKind::multi_select(vec![])));
        fields
    }

    #[test]
    fn test_clear_uses_current_value_types() {
        let mut fields = form();
        let data: FormValues = [
            ("name".to_string(), Value::from("Taro")),
            ("age".to_string(), Value::Number(30.0)),
            ("agree".to_string(), Value::Bool(true)),
            ("tags".to_string(), Value::Array(vec![Value::from("a")])),
        ]
        .into_iter()
        .collect();

        clear(&data, &mut fields);

        let values = initial_values(&fields);
        assert_eq!(values["name"], Value::from(""));
        assert_eq!(values["age"], Value::Null);
        assert_eq!(values["agree"], Value::Bool(false));
        assert_eq!(values["tags"], Value::Array(vec![]));
    }

    #[test]
    fn test_set_fields_casts_by_kind() {
        let mut fields = form();
        let data: FormValues = [
            ("name".to_string(), Value::from("007")),
            ("age".to_string(), Value::from("30")),
            ("agree".to_string(), Value::from("true")),
        ]
        .into_iter()
        .collect();

        set_fields(&data, &mut fields);

        assert_eq!(fields["name"].default_value, Some(Value::from("007")));
        assert_eq!(fields["age"].default_value, Some(Value::Number(30.0)));
        assert_eq!(fields["agree"].default_value, Some(Value::Bool(true)));
        assert_eq!(fields["tags"].default_value, Some(Value::Null));
    }

    #[test]
    fn test_initial_values_defaults_to_null() {
        let values = initial_values(&form());
        assert_eq!(values["name"], Value::from("Taro"));
        assert_eq!(values["age"], Value::Null);
    }
}
