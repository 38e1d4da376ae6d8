// File: src/config.rs
// Purpose: Form definitions loaded from TOML or JSON files

use crate::error::Result as FormResult;
use crate::field::FieldMap;
use crate::locale::Locale;
use crate::resolver::Resolver;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A form definition: message locale plus its fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormConfig {
    #[serde(default)]
    pub locale: Locale,

    #[serde(default)]
    pub fields: FieldMap,
}

impl FormConfig {
    /// Load a form definition from a `.toml` or `.json` file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // If file doesn't exist or is empty, return default config
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read form file: {:?}", path))?;

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            other => bail!("Unsupported form file extension {:?}: {:?}", other, path),
        }
        .with_context(|| format!("Failed to parse form file: {:?}", path))?;

        tracing::debug!(
            fields = config.fields.len(),
            locale = %config.locale,
            "Loaded form definition"
        );
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Check the fields and build a resolver for them
    pub fn into_resolver(self) -> FormResult<Resolver> {
        Resolver::new(self.fields)
    }
}
