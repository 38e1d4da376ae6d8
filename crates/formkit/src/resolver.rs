// File: src/resolver.rs
// Purpose: Visibility-aware validation entry point for a hosting form

use crate::error::Result;
use crate::field::{check_field_map, FieldMap, FormValues};
use crate::locale::Locale;
use crate::payload::{state_values, visible_payload, FieldState, Payload};
use crate::schema::FormSchema;
use crate::validation::ValidationResult;
use crate::visibility::{hidden_fields, is_visible};
use std::collections::BTreeMap;

/// Validates current values against a field map, skipping hidden fields
///
/// Holds no per-call state: each pass recomputes visibility from the values
/// it is given.
#[derive(Debug, Clone)]
pub struct Resolver {
    fields: FieldMap,
    schema: FormSchema,
}

impl Resolver {
    /// Check the field map and compile its rules
    pub fn new(fields: FieldMap) -> Result<Self> {
        check_field_map(&fields)?;
        let schema = FormSchema::build(&fields, &Default::default())?;
        Ok(Self { fields, schema })
    }

    pub fn fields(&self) -> &FieldMap {
        &self.fields
    }

    /// Validate all fields, or only `field` when given
    ///
    /// A named field that is hidden, or not configured, always passes.
    pub fn resolve(
        &self,
        values: &FormValues,
        field: Option<&str>,
        locale: Locale,
    ) -> ValidationResult {
        let hidden = hidden_fields(&self.fields, values);
        if !hidden.is_empty() {
            tracing::debug!(?hidden, "Skipping hidden fields");
        }

        let schema = self.schema.hide(&hidden);
        let result = match field {
            Some(name) => schema.validate_field(name, values, locale),
            None => schema.validate(values, locale),
        };
        result.with_hidden(hidden)
    }

    /// Current visibility of every field
    pub fn visibility(&self, values: &FormValues) -> BTreeMap<String, bool> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), is_visible(field, values)))
            .collect()
    }

    /// Validate the raw states and, when they pass, build the payload of
    /// visible fields
    pub fn submit(
        &self,
        states: &BTreeMap<String, FieldState>,
        locale: Locale,
    ) -> std::result::Result<Payload, ValidationResult> {
        let result = self.resolve(&state_values(states), None, locale);
        if !result.is_valid {
            tracing::debug!(errors = result.errors.len(), "Submission rejected");
            return Err(result);
        }
        Ok(visible_payload(states, &self.fields))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Condition, FieldDescriptor, FieldKind};
    use crate::locale::Issue;
    use crate::value::{Scalar, Value};
    use pretty_assertions::assert_eq;

    fn contact_form() -> FieldMap {
        let mut fields = FieldMap::new();
        fields.insert("name".into(), FieldDescriptor::text("Name").with_rules("required"));
        fields.insert(
            "email".into(),
            FieldDescriptor::text("Email")
                .with_rules("required|email")
                .show_when(Condition::equals("contact", Scalar::from("email"))),
        );
        fields.insert("contact".into(), FieldDescriptor::text("Contact"));
        fields
    }

    fn values(pairs: &[(&str, &str)]) -> FormValues {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), Value::from(*v)))
            .collect()
    }

    #[test]
    fn test_new_rejects_bad_rules() {
        let mut fields = FieldMap::new();
        fields.insert("age".into(), FieldDescriptor::text("Age").with_rules("min:x"));
        let err = Resolver::new(fields).unwrap_err();
        assert_eq!(err.to_string(), "field `age`: rule `min` has invalid parameter `x`");
    }

    #[test]
    fn test_hidden_required_field_passes() {
        let resolver = Resolver::new(contact_form()).unwrap();
        let result = resolver.resolve(
            &values(&[("name", "Taro"), ("contact", "phone")]),
            None,
            Locale::En,
        );
        assert!(result.is_valid);
        assert!(result.is_hidden("email"));
    }

    #[test]
    fn test_shown_field_is_validated() {
        let resolver = Resolver::new(contact_form()).unwrap();
        let result = resolver.resolve(
            &values(&[("name", "Taro"), ("contact", "email"), ("email", "bad")]),
            None,
            Locale::En,
        );
        assert!(!result.is_valid);
        assert_eq!(result.get_issue("email"), Some(Issue::Email));
        assert!(!result.is_hidden("email"));
    }

    #[test]
    fn test_resolve_single_field() {
        let resolver = Resolver::new(contact_form()).unwrap();
        let result = resolver.resolve(&FormValues::new(), Some("name"), Locale::Ja);
        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.get_issue("name"), Some(Issue::Required));

        let unknown = resolver.resolve(&FormValues::new(), Some("nope"), Locale::Ja);
        assert!(unknown.is_valid);
    }

    #[test]
    fn test_visibility_map() {
        let resolver = Resolver::new(contact_form()).unwrap();
        let shown = resolver.visibility(&values(&[("contact", "email")]));
        assert_eq!(shown.get("email"), Some(&true));
        assert_eq!(shown.get("name"), Some(&true));
        assert_eq!(resolver.visibility(&FormValues::new()).get("email"), Some(&false));
    }

    #[test]
    fn test_submit_drops_hidden_fields() {
        let mut fields = contact_form();
        fields.insert("age".into(), FieldDescriptor::new("Age", FieldKind::Number));
        let resolver = Resolver::new(fields).unwrap();

        let states: BTreeMap<String, FieldState> = [
            ("name", "Taro"),
            ("contact", "phone"),
            ("email", "ignored"),
            ("age", "30"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), FieldState::new(v)))
        .collect();

        let payload = resolver.submit(&states, Locale::En).unwrap();
        assert_eq!(payload.get("age"), Some(&Value::Number(30.0)));
        assert!(!payload.contains_key("email"));
    }

    #[test]
    fn test_submit_returns_errors() {
        let resolver = Resolver::new(contact_form()).unwrap();
        let err = resolver.submit(&BTreeMap::new(), Locale::En).unwrap_err();
        assert_eq!(err.get_error("name"), Some("This field is required"));
    }
}
