// Formkit - declarative form validation
// Rule strings, conditional visibility and typed submission payloads

pub mod value;
pub mod error;
pub mod locale;

// Field configuration
pub mod rules;
pub mod field;
pub mod config;
pub mod dynamic;

// Evaluation
pub mod cast;
pub mod visibility;
pub mod schema;
pub mod validation;
pub mod resolver;
pub mod payload;
pub mod state;

// Re-export core types
pub use value::{Operand, Scalar, Value, ValueType};
pub use error::{FormError, Result};
pub use locale::{Issue, Locale};

pub use rules::{parse_rule_string, Constraint, ParsedRule, RuleSet};
pub use field::{
    check_field_map, Comparison, Condition, FieldDescriptor, FieldKind, FieldMap, FormValues,
    SelectOption,
};
pub use config::FormConfig;
pub use dynamic::{set_dynamic_fields, Column};

pub use cast::{cast, CastHint};
pub use visibility::{coerce_to_type_of, equals, hidden_fields, includes_match, is_visible};
pub use schema::{FieldSchema, FormSchema};
pub use validation::{FieldError, ValidationResult};
pub use resolver::Resolver;
pub use payload::{to_payload, visible_payload, FieldState, Payload};
pub use state::{clear, initial_values, set_fields};
