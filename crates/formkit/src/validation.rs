// File: src/validation.rs
// Purpose: Validation outcome returned to the hosting form

use crate::locale::{Issue, Locale};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// First failing check of one field, with its localized message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub issue: Issue,
    pub message: String,
}

impl FieldError {
    pub fn new(issue: Issue, locale: Locale) -> Self {
        Self {
            message: locale.message(&issue),
            issue,
        }
    }
}

/// Result of one validation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: BTreeMap<String, FieldError>,
    /// Fields skipped because their predicates hide them
    #[serde(default)]
    pub hidden: BTreeSet<String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: BTreeMap::new(),
            hidden: BTreeSet::new(),
        }
    }

    /// Build from collected per-field errors
    pub fn from_errors(errors: BTreeMap<String, FieldError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            hidden: BTreeSet::new(),
        }
    }

    pub fn with_hidden(mut self, hidden: BTreeSet<String>) -> Self {
        self.hidden = hidden;
        self
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Message for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|e| e.message.as_str())
    }

    /// Failure category for a specific field
    pub fn get_issue(&self, field: &str) -> Option<Issue> {
        self.errors.get(field).map(|e| e.issue)
    }

    pub fn is_hidden(&self, field: &str) -> bool {
        self.hidden.contains(field)
    }
}
