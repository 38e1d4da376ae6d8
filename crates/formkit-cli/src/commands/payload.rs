use super::{load_form, read_json};
use anyhow::Result;
use formkit::{to_payload, visible_payload, FieldState};
use std::collections::BTreeMap;
use std::path::Path;

pub fn execute(form: &Path, states: &Path, visible_only: bool) -> Result<()> {
    let config = load_form(form)?;
    let states: BTreeMap<String, FieldState> = read_json(states)?;

    let payload = if visible_only {
        visible_payload(&states, &config.fields)
    } else {
        to_payload(&states, &config.fields)
    };

    println!("{}", serde_json::to_string_pretty(&payload)?);
    Ok(())
}
