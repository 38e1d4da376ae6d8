pub mod payload;
pub mod validate;
pub mod visibility;

use anyhow::{bail, Context, Result};
use formkit::FormConfig;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a form definition, refusing a path that does not exist
pub fn load_form(path: &Path) -> Result<FormConfig> {
    if !path.exists() {
        bail!("Form definition not found: {:?}", path);
    }
    FormConfig::load(path)
}

/// Read a JSON document from disk
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("Failed to parse JSON in {:?}", path))
}
