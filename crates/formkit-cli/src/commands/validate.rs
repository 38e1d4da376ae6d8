use super::{load_form, read_json};
use anyhow::Result;
use colored::Colorize;
use formkit::{FormValues, Locale};
use std::path::Path;

/// Validate values against a form; returns whether they passed
pub fn execute(
    form: &Path,
    values: &Path,
    field: Option<&str>,
    locale: Option<Locale>,
    json: bool,
) -> Result<bool> {
    let config = load_form(form)?;
    let locale = locale.unwrap_or(config.locale);
    let resolver = config.into_resolver()?;
    let values: FormValues = read_json(values)?;

    let result = resolver.resolve(&values, field, locale);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(result.is_valid);
    }

    for name in &result.hidden {
        println!("{} {}", "-".dimmed(), format!("{} (hidden)", name).dimmed());
    }
    for (name, error) in &result.errors {
        println!("{} {}: {}", "✗".red(), name.bold(), error.message);
    }

    if result.is_valid {
        println!("{}", "✓ Values are valid".green().bold());
    } else {
        println!();
        println!(
            "{}",
            format!("{} field(s) failed validation", result.errors.len())
                .red()
                .bold()
        );
    }

    Ok(result.is_valid)
}
