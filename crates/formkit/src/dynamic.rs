// File: src/dynamic.rs
// Purpose: Build field maps from server-provided column records

use crate::error::{FormError, Result};
use crate::field::{Condition, FieldDescriptor, FieldKind, FieldMap, SelectOption};
use crate::value::Value;
use serde::Deserialize;
use std::collections::BTreeMap;

/// One column record: the field key plus per-key component settings
#[derive(Debug, Clone, Deserialize)]
pub struct Column {
    pub key: String,
    #[serde(default)]
    pub extra_data: BTreeMap<String, serde_json::Value>,
}

/// Component settings stored under `extra_data[key]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ComponentConfig {
    /// Component name, e.g. `InputText`, `Select`, `DatePicker`
    #[serde(rename = "as")]
    pub component: Option<String>,
    #[serde(rename = "type")]
    pub data_type: Option<String>,
    pub label: String,
    pub schema: Option<String>,
    pub required: bool,
    pub options: Option<Vec<SelectOption>>,
    pub option_value_key: Option<String>,
    pub show_when: Option<Condition>,
    pub hide_when: Option<Condition>,
    pub default_value: Option<Value>,
}

impl ComponentConfig {
    fn is(&self, component: &str) -> bool {
        self.component.as_deref() == Some(component)
    }

    fn is_type(&self, data_type: &str) -> bool {
        self.data_type.as_deref() == Some(data_type)
    }

    /// Field kind implied by component name, declared type, default and options
    pub fn kind(&self) -> FieldKind {
        let options = self.options.clone().unwrap_or_default();
        let option_value_key = self
            .option_value_key
            .clone()
            .unwrap_or_else(|| "value".to_string());

        if self.is_type("number") || self.is("InputNumber") {
            FieldKind::Number
        } else if self.is("Checkbox") {
            FieldKind::Boolean
        } else if self.is("DatePicker") {
            FieldKind::Date
        } else if self.is_type("array")
            || self.is("MultiSelect")
            || self.is("CheckboxGroup")
            || matches!(self.default_value, Some(Value::Array(_)))
        {
            FieldKind::MultiSelect {
                options,
                option_value_key,
            }
        } else if self.is("Select") || self.is("RadioButton") || self.options.is_some() {
            FieldKind::Select {
                options,
                option_value_key,
            }
        } else {
            FieldKind::Text
        }
    }

    pub fn into_descriptor(self) -> FieldDescriptor {
        let kind = self.kind();
        FieldDescriptor {
            label: self.label,
            kind,
            required: self.required,
            rules: self.schema.filter(|rules| !rules.trim().is_empty()),
            show_when: self.show_when,
            hide_when: self.hide_when,
            default_value: self.default_value,
        }
    }
}

/// Convert column records into a field map keyed by column key
///
/// A column with no settings under its own key becomes a plain text field.
pub fn set_dynamic_fields(columns: &[Column]) -> Result<FieldMap> {
    let mut fields = FieldMap::new();
    for column in columns {
        let config = match column.extra_data.get(&column.key) {
            Some(raw) => ComponentConfig::deserialize(raw).map_err(|e| {
                FormError::Parse(format!("column `{}`: {}", column.key, e))
            })?,
            None => ComponentConfig::default(),
        };
        tracing::trace!(key = %column.key, component = ?config.component, "Imported column");
        fields.insert(column.key.clone(), config.into_descriptor());
    }
    Ok(fields)
}
