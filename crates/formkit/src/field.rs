// File: src/field.rs
// Purpose: Field descriptors - static configuration for each form field

use crate::cast::CastHint;
use crate::error::{FormError, Result};
use crate::rules::RuleSet;
use crate::value::{Operand, Scalar, Value, ValueType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field descriptors keyed by field name
pub type FieldMap = BTreeMap<String, FieldDescriptor>;

/// Current form values keyed by field name
pub type FormValues = BTreeMap<String, Value>;

/// Static configuration for one form field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    #[serde(default)]
    pub label: String,

    #[serde(flatten)]
    pub kind: FieldKind,

    /// Explicit required flag, independent of the rule string
    #[serde(default)]
    pub required: bool,

    /// Pipe-delimited rule string, e.g. `required|min:3|max:20`
    #[serde(default, alias = "schema", skip_serializing_if = "Option::is_none")]
    pub rules: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_when: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hide_when: Option<Condition>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

/// Input kind; options only exist on the select-like kinds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    /// Single checkbox
    Boolean,
    Date,
    /// Single choice: dropdown or radio group
    Select {
        #[serde(default)]
        options: Vec<SelectOption>,
        #[serde(default = "default_value_key", rename = "optionValueKey")]
        option_value_key: String,
    },
    /// Multiple choice: multi-select or checkbox group
    MultiSelect {
        #[serde(default)]
        options: Vec<SelectOption>,
        #[serde(default = "default_value_key", rename = "optionValueKey")]
        option_value_key: String,
    },
}

fn default_value_key() -> String {
    "value".to_string()
}

/// One `{label, value}` choice of a select-like field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectOption {
    #[serde(default)]
    pub label: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Scalar>,

    /// Any other attributes, addressable through `optionValueKey`
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// `showWhen` / `hideWhen` predicate on another field's current value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,

    #[serde(flatten)]
    pub test: Comparison,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Comparison {
    Equals(Operand),
    Includes(Operand),
}

impl SelectOption {
    pub fn new(label: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
            extra: BTreeMap::new(),
        }
    }

    /// The attribute named by `optionValueKey`, if the option has it
    pub fn key(&self, name: &str) -> Option<Scalar> {
        match name {
            "value" => self.value.clone(),
            "label" => Some(Scalar::String(self.label.clone())),
            other => self.extra.get(other).and_then(json_scalar),
        }
    }
}

fn json_scalar(json: &serde_json::Value) -> Option<Scalar> {
    match json {
        serde_json::Value::Bool(b) => Some(Scalar::Bool(*b)),
        serde_json::Value::Number(n) => n.as_f64().map(Scalar::Number),
        serde_json::Value::String(s) => Some(Scalar::String(s.clone())),
        _ => None,
    }
}

impl FieldKind {
    pub fn select(options: Vec<SelectOption>) -> Self {
        FieldKind::Select {
            options,
            option_value_key: default_value_key(),
        }
    }

    pub fn multi_select(options: Vec<SelectOption>) -> Self {
        FieldKind::MultiSelect {
            options,
            option_value_key: default_value_key(),
        }
    }

    /// Permitted comparison values of a select-like kind, in option order
    pub fn option_values(&self) -> Vec<Scalar> {
        match self {
            FieldKind::Select {
                options,
                option_value_key,
            }
            | FieldKind::MultiSelect {
                options,
                option_value_key,
            } => options
                .iter()
                .filter_map(|opt| opt.key(option_value_key))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Casting hint used when building a payload
    ///
    /// Select kinds take the type shared by all their option values and fall
    /// back to text when the options mix types.
    pub fn cast_hint(&self) -> CastHint {
        match self {
            FieldKind::Text => CastHint::Text,
            FieldKind::Number => CastHint::Number,
            FieldKind::Boolean => CastHint::Boolean,
            FieldKind::Date => CastHint::Date,
            FieldKind::Select { .. } | FieldKind::MultiSelect { .. } => {
                match homogeneous_type(&self.option_values()) {
                    Some(ValueType::Number) => CastHint::Number,
                    Some(ValueType::Boolean) => CastHint::Boolean,
                    _ => CastHint::Text,
                }
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Select { .. } => "select",
            FieldKind::MultiSelect { .. } => "multi_select",
        }
    }
}

/// The single type shared by every scalar, if there is one
pub fn homogeneous_type(values: &[Scalar]) -> Option<ValueType> {
    let first = values.first()?.value_type();
    values
        .iter()
        .all(|v| v.value_type() == first)
        .then_some(first)
}

impl Condition {
    pub fn equals(field: impl Into<String>, operand: impl Into<Operand>) -> Self {
        Self {
            field: field.into(),
            test: Comparison::Equals(operand.into()),
        }
    }

    pub fn includes(field: impl Into<String>, operand: impl Into<Operand>) -> Self {
        Self {
            field: field.into(),
            test: Comparison::Includes(operand.into()),
        }
    }
}

impl FieldDescriptor {
    pub fn new(label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            label: label.into(),
            kind,
            required: false,
            rules: None,
            show_when: None,
            hide_when: None,
            default_value: None,
        }
    }

    pub fn text(label: impl Into<String>) -> Self {
        Self::new(label, FieldKind::Text)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_rules(mut self, rules: impl Into<String>) -> Self {
        self.rules = Some(rules.into());
        self
    }

    pub fn show_when(mut self, condition: Condition) -> Self {
        self.show_when = Some(condition);
        self
    }

    pub fn hide_when(mut self, condition: Condition) -> Self {
        self.hide_when = Some(condition);
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Parsed constraints of the rule string (empty when there is none)
    pub fn rule_set(&self) -> Result<RuleSet> {
        match self.rules.as_deref() {
            Some(rules) => RuleSet::parse(rules),
            None => Ok(RuleSet::default()),
        }
    }

    /// Required flag or a `required` rule
    pub fn is_required(&self) -> Result<bool> {
        Ok(self.required || self.rule_set()?.is_required())
    }

    pub fn has_condition(&self) -> bool {
        self.show_when.is_some() || self.hide_when.is_some()
    }
}

/// Check a field map before use
///
/// Rule strings must parse. Predicates that reference a field missing from
/// the map are allowed but logged: they evaluate against null and never match.
pub fn check_field_map(fields: &FieldMap) -> Result<()> {
    for (name, field) in fields {
        field.rule_set().map_err(|e| e.in_field(name))?;

        for condition in [&field.show_when, &field.hide_when].into_iter().flatten() {
            if condition.field.is_empty() {
                return Err(FormError::Config(format!(
                    "field `{}`: condition has an empty `field`",
                    name
                )));
            }
            if !fields.contains_key(&condition.field) {
                tracing::warn!(
                    "Field `{}` has a condition on unknown field `{}`",
                    name,
                    condition.field
                );
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_deserialize_text_field() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "label": "Email",
            "kind": "text",
            "schema": "required|email",
            "showWhen": { "field": "contact", "equals": "email" },
            "placeholder": "ignored"
        }))
        .unwrap();

        assert_eq!(field.kind, FieldKind::Text);
        assert_eq!(field.rules.as_deref(), Some("required|email"));
        assert_eq!(field.show_when, Some(Condition::equals("contact", Scalar::from("email"))));
        assert!(field.is_required().unwrap());
    }

    #[test]
    fn test_deserialize_select_field() {
        let field: FieldDescriptor = serde_json::from_value(json!({
            "label": "Plan",
            "kind": "select",
            "options": [
                { "label": "A", "value": 1, "code": "a" },
                { "label": "B", "value": 2, "code": "b" }
            ],
            "optionValueKey": "code",
            "hideWhen": { "field": "tags", "includes": ["x", "y"] }
        }))
        .unwrap();

        assert_eq!(field.kind.option_values(), vec![Scalar::from("a"), Scalar::from("b")]);
        assert_eq!(field.kind.cast_hint(), CastHint::Text);
        assert_eq!(
            field.hide_when,
            Some(Condition::includes(
                "tags",
                vec![Scalar::from("x"), Scalar::from("y")]
            ))
        );
    }

    #[test]
    fn test_option_value_key_defaults_to_value() {
        let kind = FieldKind::select(vec![SelectOption::new("A", 1), SelectOption::new("B", 2)]);
        assert_eq!(kind.option_values(), vec![Scalar::Number(1.0), Scalar::Number(2.0)]);
        assert_eq!(kind.cast_hint(), CastHint::Number);
    }

    #[test]
    fn test_mixed_options_hint_text() {
        let kind = FieldKind::multi_select(vec![
            SelectOption::new("One", 1),
            SelectOption::new("Yes", true),
        ]);
        assert_eq!(kind.cast_hint(), CastHint::Text);
    }

    #[test]
    fn test_check_field_map_reports_rule_errors_with_field() {
        let mut fields = FieldMap::new();
        fields.insert("name".into(), FieldDescriptor::text("Name").with_rules("required|bogus"));
        let err = check_field_map(&fields).unwrap_err();
        assert_eq!(err.to_string(), "field `name`: unknown rule `bogus`");
    }

    #[test]
    fn test_check_field_map_allows_dangling_reference() {
        let mut fields = FieldMap::new();
        fields.insert(
            "phone".into(),
            FieldDescriptor::text("Phone")
                .show_when(Condition::equals("missing", Scalar::from("x"))),
        );
        assert!(check_field_map(&fields).is_ok());
    }
}
