use super::{load_form, read_json};
use anyhow::Result;
use colored::Colorize;
use formkit::FormValues;
use std::path::Path;

pub fn execute(form: &Path, values: &Path) -> Result<()> {
    let resolver = load_form(form)?.into_resolver()?;
    let values: FormValues = read_json(values)?;

    for (name, visible) in resolver.visibility(&values) {
        if visible {
            println!("{} {}", "shown ".green(), name);
        } else {
            println!("{} {}", "hidden".yellow(), name.dimmed());
        }
    }

    Ok(())
}
