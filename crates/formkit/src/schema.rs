// File: src/schema.rs
// Purpose: Per-field validation shapes derived from field descriptors

use crate::cast::{parse_js_number, parse_loose_date};
use crate::error::Result;
use crate::field::{homogeneous_type, FieldDescriptor, FieldKind, FieldMap, FormValues};
use crate::locale::{Issue, Locale};
use crate::rules::{parse_rule_string, size_param, Constraint};
use crate::validation::{FieldError, ValidationResult};
use crate::value::{Value, ValueType};
use crate::visibility::{coerce_to_type_of, equals};
use formkit_validation as v;
use std::collections::{BTreeMap, BTreeSet};

const DEFAULT_MIN_ITEMS: usize = 1;
const DEFAULT_MAX_ITEMS: usize = 10;

/// Validation shape of one field
#[derive(Debug, Clone, PartialEq)]
pub enum FieldSchema {
    /// Hidden field: every value is accepted
    Passthrough,
    Text {
        required: bool,
        constraints: Vec<Constraint>,
    },
    Number {
        required: bool,
    },
    /// Checkbox; only a `required` rule demands a checked box
    Boolean {
        required: bool,
        must_be_true: bool,
    },
    Date {
        required: bool,
    },
    /// Multi-select or checkbox group
    List {
        required: bool,
        checks: Vec<ListCheck>,
    },
    /// Single select or radio group
    Choice {
        required: bool,
        allowed: Membership,
    },
}

/// Item-count check on a list field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCheck {
    NonEmpty,
    MinItems(usize),
    MaxItems(usize),
}

/// Closed set of permitted choice values
#[derive(Debug, Clone, PartialEq)]
pub enum Membership {
    /// No options configured: any non-empty string
    AnyNonEmpty,
    /// All options share one type: coerce the value once, then compare exactly
    Exact(Vec<Value>),
    /// Options of mixed types: coerce the value against each option
    Coercing(Vec<Value>),
}

impl Membership {
    pub fn from_options(values: Vec<Value>, homogeneous: bool) -> Self {
        if values.is_empty() {
            Membership::AnyNonEmpty
        } else if homogeneous {
            Membership::Exact(values)
        } else {
            Membership::Coercing(values)
        }
    }

    fn check(&self, value: &Value) -> std::result::Result<(), Issue> {
        match self {
            Membership::AnyNonEmpty => match value {
                Value::String(_) => Ok(()),
                _ => Err(Issue::InvalidType(ValueType::String)),
            },
            Membership::Exact(allowed) => {
                let candidate = match allowed.first() {
                    Some(reference) => coerce_to_type_of(reference, value),
                    None => value.clone(),
                };
                if allowed.contains(&candidate) {
                    Ok(())
                } else {
                    Err(Issue::InvalidOption)
                }
            }
            Membership::Coercing(allowed) => {
                if allowed.iter().any(|option| equals(option, value)) {
                    Ok(())
                } else {
                    Err(Issue::InvalidUnion)
                }
            }
        }
    }
}

impl FieldSchema {
    /// Derive the shape for a visible field
    pub fn compile(field: &FieldDescriptor) -> Result<Self> {
        let rule_set = field.rule_set()?;
        let required = field.required || rule_set.is_required();

        let schema = match &field.kind {
            FieldKind::Number => FieldSchema::Number { required },
            FieldKind::Boolean => FieldSchema::Boolean {
                required,
                must_be_true: rule_set.is_required(),
            },
            FieldKind::Date => FieldSchema::Date { required },
            FieldKind::MultiSelect { .. } => FieldSchema::List {
                required,
                checks: if required {
                    list_checks(field.rules.as_deref().unwrap_or_default())?
                } else {
                    Vec::new()
                },
            },
            FieldKind::Select { .. } => {
                let options = field.kind.option_values();
                let homogeneous = homogeneous_type(&options).is_some();
                FieldSchema::Choice {
                    required,
                    allowed: Membership::from_options(
                        options.into_iter().map(Value::from).collect(),
                        homogeneous,
                    ),
                }
            }
            FieldKind::Text => FieldSchema::Text {
                required,
                // Optional fields never run their rules
                constraints: if required {
                    rule_set.constraints().to_vec()
                } else {
                    Vec::new()
                },
            },
        };
        Ok(schema)
    }

    pub fn is_required(&self) -> bool {
        match self {
            FieldSchema::Passthrough => false,
            FieldSchema::Text { required, .. }
            | FieldSchema::Number { required }
            | FieldSchema::Boolean { required, .. }
            | FieldSchema::Date { required }
            | FieldSchema::List { required, .. }
            | FieldSchema::Choice { required, .. } => *required,
        }
    }

    /// Validate a value, reporting the first failing check
    pub fn check(&self, value: &Value) -> std::result::Result<(), Issue> {
        match self {
            FieldSchema::Passthrough => Ok(()),
            FieldSchema::Text {
                required,
                constraints,
            } => check_text(value, *required, constraints),
            FieldSchema::Number { required } => check_number(value, *required),
            FieldSchema::Boolean { must_be_true, .. } => {
                if *must_be_true && !coerce_checkbox(value) {
                    Err(Issue::Required)
                } else {
                    Ok(())
                }
            }
            FieldSchema::Date { required } => check_date(value, *required),
            FieldSchema::List { required, checks } => check_list(value, *required, checks),
            FieldSchema::Choice { required, allowed } => {
                if !*required {
                    return Ok(());
                }
                if value.is_absent() {
                    return Err(Issue::Required);
                }
                allowed.check(value)
            }
        }
    }
}

fn list_checks(rules: &str) -> Result<Vec<ListCheck>> {
    let mut checks = Vec::new();
    for parsed in parse_rule_string(rules) {
        match parsed.rule.as_str() {
            "required" => checks.push(ListCheck::NonEmpty),
            "min" => checks.push(ListCheck::MinItems(size_param(&parsed, DEFAULT_MIN_ITEMS)?)),
            "max" => checks.push(ListCheck::MaxItems(size_param(&parsed, DEFAULT_MAX_ITEMS)?)),
            other => tracing::debug!("Rule `{}` does not apply to list fields", other),
        }
    }
    Ok(checks)
}

fn check_text(
    value: &Value,
    required: bool,
    constraints: &[Constraint],
) -> std::result::Result<(), Issue> {
    let text = match value {
        Value::String(s) => s.as_str(),
        Value::Null if required => return Err(Issue::Required),
        Value::Null => return Ok(()),
        _ => return Err(Issue::InvalidType(ValueType::String)),
    };

    if !required {
        return Ok(());
    }
    if text.is_empty() {
        return Err(Issue::Required);
    }

    for constraint in constraints {
        check_constraint(text, constraint)?;
    }
    Ok(())
}

fn check_constraint(text: &str, constraint: &Constraint) -> std::result::Result<(), Issue> {
    let ok = match constraint {
        Constraint::Required => !text.is_empty(),
        Constraint::Email => v::is_valid_email(text),
        Constraint::MinLength(n) => v::has_min_length(text, *n),
        Constraint::MaxLength(n) => v::has_max_length(text, *n),
        Constraint::Length(n) => v::has_exact_length(text, *n),
        Constraint::Between(min, max) => {
            if !v::has_min_length(text, *min) {
                return Err(Issue::BetweenMin(*min));
            }
            v::has_max_length(text, *max)
        }
        Constraint::Katakana => v::is_katakana(text),
        Constraint::Hiragana => v::is_hiragana(text),
        Constraint::Digits => v::is_digits(text),
        Constraint::Romaji => v::is_romaji(text),
        Constraint::NoSpace => !v::contains_whitespace(text),
        Constraint::Url => text.is_empty() || v::is_valid_url(text),
        Constraint::Pattern(re) => text.is_empty() || v::matches_pattern(text, re),
    };
    if ok {
        return Ok(());
    }
    Err(match constraint {
        Constraint::Required => Issue::Required,
        Constraint::Email => Issue::Email,
        Constraint::MinLength(n) => Issue::MinLength(*n),
        Constraint::MaxLength(n) => Issue::MaxLength(*n),
        Constraint::Length(n) => Issue::Length(*n),
        Constraint::Between(_, max) => Issue::BetweenMax(*max),
        Constraint::Katakana => Issue::Katakana,
        Constraint::Hiragana => Issue::Hiragana,
        Constraint::Digits => Issue::Digits,
        Constraint::Romaji => Issue::Romaji,
        Constraint::NoSpace => Issue::NoSpace,
        Constraint::Url => Issue::Url,
        Constraint::Pattern(_) => Issue::Pattern,
    })
}

fn check_number(value: &Value, required: bool) -> std::result::Result<(), Issue> {
    let present = match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(parse_js_number(s).ok_or(Issue::NumberInput)?),
        Value::Number(n) if n.is_finite() => Some(*n),
        _ => return Err(Issue::NumberInput),
    };
    match present {
        None if required => Err(Issue::Required),
        _ => Ok(()),
    }
}

/// Checkbox reading: booleans, `"true"` / `"false"` strings, else false
pub fn coerce_checkbox(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    }
}

fn check_date(value: &Value, required: bool) -> std::result::Result<(), Issue> {
    match value {
        _ if value.is_absent() => {
            if required {
                Err(Issue::Required)
            } else {
                Ok(())
            }
        }
        Value::Date(_) => Ok(()),
        Value::String(s) => parse_loose_date(s).map(|_| ()).ok_or(Issue::DateInput),
        _ => Err(Issue::DateInput),
    }
}

fn check_list(
    value: &Value,
    required: bool,
    checks: &[ListCheck],
) -> std::result::Result<(), Issue> {
    let items: &[Value] = match value {
        Value::Array(items) => items,
        _ if value.is_absent() && required => return Err(Issue::Required),
        _ if value.is_absent() => return Ok(()),
        _ => return Err(Issue::InvalidType(ValueType::Array)),
    };
    for check in checks {
        match *check {
            ListCheck::NonEmpty if items.is_empty() => return Err(Issue::Required),
            ListCheck::MinItems(n) if items.len() < n => return Err(Issue::MinItems(n)),
            ListCheck::MaxItems(n) if items.len() > n => return Err(Issue::MaxItems(n)),
            _ => {}
        }
    }
    Ok(())
}

/// Validation shapes for a whole form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormSchema {
    fields: BTreeMap<String, FieldSchema>,
}

impl FormSchema {
    /// Build shapes for every field, hidden ones as passthrough
    pub fn build(fields: &FieldMap, hidden: &BTreeSet<String>) -> Result<Self> {
        let mut shapes = BTreeMap::new();
        for (name, field) in fields {
            let shape = if hidden.contains(name) {
                FieldSchema::Passthrough
            } else {
                FieldSchema::compile(field).map_err(|e| e.in_field(name))?
            };
            shapes.insert(name.clone(), shape);
        }
        tracing::debug!(fields = shapes.len(), hidden = hidden.len(), "Built form schema");
        Ok(Self { fields: shapes })
    }

    /// A copy with the given fields turned into passthrough shapes
    pub fn hide(&self, hidden: &BTreeSet<String>) -> Self {
        let fields = self
            .fields
            .iter()
            .map(|(name, shape)| {
                let shape = if hidden.contains(name) {
                    FieldSchema::Passthrough
                } else {
                    shape.clone()
                };
                (name.clone(), shape)
            })
            .collect();
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }

    /// Validate every field; a missing value is read as null
    pub fn validate(&self, values: &FormValues, locale: Locale) -> ValidationResult {
        let errors = self
            .fields
            .iter()
            .filter_map(|(name, shape)| {
                check_one(name, shape, values, locale).map(|err| (name.clone(), err))
            })
            .collect();
        ValidationResult::from_errors(errors)
    }

    /// Validate a single field; unknown names pass
    pub fn validate_field(
        &self,
        name: &str,
        values: &FormValues,
        locale: Locale,
    ) -> ValidationResult {
        let errors = self
            .fields
            .get(name)
            .and_then(|shape| check_one(name, shape, values, locale))
            .map(|err| BTreeMap::from([(name.to_string(), err)]))
            .unwrap_or_default();
        ValidationResult::from_errors(errors)
    }
}

fn check_one(
    name: &str,
    shape: &FieldSchema,
    values: &FormValues,
    locale: Locale,
) -> Option<FieldError> {
    let value = values.get(name).unwrap_or(&Value::Null);
    match shape.check(value) {
        Ok(()) => None,
        Err(issue) => {
            tracing::trace!(field = name, ?issue, "Field failed validation");
            Some(FieldError::new(issue, locale))
        }
    }
}
