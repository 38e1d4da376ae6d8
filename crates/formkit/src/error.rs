// File: src/error.rs
// Purpose: Configuration errors raised while loading form definitions

use thiserror::Error;

/// Errors detected before any value is validated
///
/// Validation failures are not errors; they are reported per field in
/// [`crate::ValidationResult`].
#[derive(Debug, Error)]
pub enum FormError {
    #[error("field `{field}`: unknown rule `{rule}`")]
    UnknownRule { field: String, rule: String },

    #[error("field `{field}`: rule `{rule}` has invalid parameter `{param}`")]
    InvalidParam {
        field: String,
        rule: String,
        param: String,
    },

    #[error("invalid form configuration: {0}")]
    Config(String),

    #[error("failed to read form definition: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse form definition: {0}")]
    Parse(String),
}

impl FormError {
    /// Attach the owning field name to a rule error raised without one
    pub fn in_field(self, name: &str) -> Self {
        match self {
            FormError::UnknownRule { rule, .. } => FormError::UnknownRule {
                field: name.to_string(),
                rule,
            },
            FormError::InvalidParam { rule, param, .. } => FormError::InvalidParam {
                field: name.to_string(),
                rule,
                param,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormError>;
