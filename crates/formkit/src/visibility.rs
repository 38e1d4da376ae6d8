// File: src/visibility.rs
// Purpose: Reference-driven coercion and showWhen / hideWhen evaluation
//
// Form values usually arrive as strings while configured comparison values
// are typed, so coercion always follows the type of the current value (the
// reference), never the shape of the raw side.

use crate::cast::{parse_finite, parse_js_number};
use crate::field::{Comparison, Condition, FieldDescriptor, FieldMap, FormValues};
use crate::value::Value;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Boolean,
    Number,
    Other,
}

fn target_of(reference: &Value) -> Target {
    let sample = match reference {
        // An empty sequence compares as strings
        Value::Array(items) => match items.first() {
            Some(first) => first,
            None => return Target::Other,
        },
        other => other,
    };
    match sample {
        Value::Bool(_) => Target::Boolean,
        Value::Number(_) => Target::Number,
        _ => Target::Other,
    }
}

/// Coerce `raw` to the runtime type of `reference`
///
/// Non-string raw values are returned unchanged, as are strings that do not
/// parse as the target number type.
pub fn coerce_to_type_of(reference: &Value, raw: &Value) -> Value {
    let Value::String(s) = raw else {
        return raw.clone();
    };
    match target_of(reference) {
        Target::Boolean => {
            if s.eq_ignore_ascii_case("true") {
                Value::Bool(true)
            } else if s.eq_ignore_ascii_case("false") {
                Value::Bool(false)
            } else if s == "1" {
                Value::Bool(true)
            } else if s == "0" {
                Value::Bool(false)
            } else {
                Value::Bool(!s.is_empty())
            }
        }
        Target::Number => parse_js_number(s).map_or_else(|| raw.clone(), Value::Number),
        Target::Other => raw.clone(),
    }
}

fn contains(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| item == needle)
}

// Strict equality, widened so a string form value equals a typed scalar
// with the same text ("5" and 5, "true" and true)
fn same(left: &Value, right: &Value) -> bool {
    if left == right {
        return true;
    }
    match (left, right) {
        (Value::String(text), Value::Number(n)) | (Value::Number(n), Value::String(text)) => {
            parse_finite(text) == Some(*n)
        }
        (Value::String(text), Value::Bool(b)) | (Value::Bool(b), Value::String(text)) => {
            text.trim().eq_ignore_ascii_case(if *b { "true" } else { "false" })
        }
        _ => false,
    }
}

fn contains_same(haystack: &[Value], needle: &Value) -> bool {
    haystack.iter().any(|item| same(item, needle))
}

/// Equality after coercing the right side to the left side's type
///
/// Sequences on either side turn the comparison into membership; two
/// sequences match when they overlap. A string on the left equals a typed
/// number or boolean on the right with the same text, so the comparison is
/// symmetric for scalars.
pub fn equals(left: &Value, right: &Value) -> bool {
    if let Value::Array(rights) = right {
        let rights: Vec<Value> = rights.iter().map(|r| coerce_to_type_of(left, r)).collect();
        return match left {
            Value::Array(lefts) => lefts.iter().any(|l| contains_same(&rights, l)),
            _ => contains_same(&rights, left),
        };
    }
    if let Value::Array(lefts) = left {
        return contains_same(lefts, &coerce_to_type_of(left, right));
    }
    same(left, &coerce_to_type_of(left, right))
}

/// Inclusion test used by `includes` predicates
///
/// A sequence on the left must contain one of the right values; a string on
/// the left must contain one of them as a trimmed, case-insensitive
/// substring; anything else falls back to strict equality.
pub fn includes_match(left: &Value, right: &Value) -> bool {
    let rights: Vec<&Value> = match right {
        Value::Array(items) => items.iter().collect(),
        single => vec![single],
    };

    match left {
        Value::Array(lefts) => rights
            .iter()
            .any(|r| contains(lefts, &coerce_to_type_of(left, r))),
        Value::String(l) => {
            let haystack = l.trim().to_lowercase();
            rights.iter().any(|r| match coerce_to_type_of(left, r) {
                Value::String(needle) => haystack.contains(&needle.trim().to_lowercase()),
                other => *left == other,
            })
        }
        _ => rights.iter().any(|r| *left == coerce_to_type_of(left, r)),
    }
}

impl Condition {
    /// Evaluate against current values
    ///
    /// A referenced field with no current value is compared as null, which
    /// never equals or includes a configured scalar.
    pub fn matches(&self, values: &FormValues) -> bool {
        let current = values.get(&self.field).unwrap_or(&Value::Null);
        match &self.test {
            Comparison::Equals(operand) => equals(current, &Value::from(operand)),
            Comparison::Includes(operand) => includes_match(current, &Value::from(operand)),
        }
    }
}

/// Whether a field is currently shown
///
/// `showWhen` decides first; a matching `hideWhen` always hides.
pub fn is_visible(field: &FieldDescriptor, values: &FormValues) -> bool {
    let mut visible = true;
    if let Some(show) = &field.show_when {
        visible = show.matches(values);
    }
    if let Some(hide) = &field.hide_when {
        if hide.matches(values) {
            visible = false;
        }
    }
    visible
}

/// Names of all fields hidden by their predicates
pub fn hidden_fields(fields: &FieldMap, values: &FormValues) -> BTreeSet<String> {
    fields
        .iter()
        .filter(|(_, field)| field.has_condition() && !is_visible(field, values))
        .map(|(name, _)| name.clone())
        .collect()
}
