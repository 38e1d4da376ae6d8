mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use formkit::Locale;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "formkit")]
#[command(version, about = "Formkit CLI - validate values against form definitions")]
#[command(long_about = None)]
struct Cli {
    /// Log visibility and schema decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a values file against a form definition
    Validate {
        /// Form definition (.toml or .json)
        #[arg(short, long)]
        form: PathBuf,

        /// JSON object of current field values
        #[arg(long)]
        values: PathBuf,

        /// Validate only this field
        #[arg(long)]
        field: Option<String>,

        /// Message language: ja or en (defaults to the form's locale)
        #[arg(short, long)]
        locale: Option<Locale>,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show which fields are visible for the given values
    Visibility {
        /// Form definition (.toml or .json)
        #[arg(short, long)]
        form: PathBuf,

        /// JSON object of current field values
        #[arg(long)]
        values: PathBuf,
    },

    /// Cast raw field states into a typed payload
    Payload {
        /// Form definition (.toml or .json)
        #[arg(short, long)]
        form: PathBuf,

        /// JSON object of field states (`{"age": {"value": "42"}}`)
        #[arg(short, long)]
        states: PathBuf,

        /// Leave out fields hidden by their predicates
        #[arg(long)]
        visible_only: bool,
    },
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Execute command
    let passed = match cli.command {
        Commands::Validate {
            form,
            values,
            field,
            locale,
            json,
        } => commands::validate::execute(&form, &values, field.as_deref(), locale, json)?,
        Commands::Visibility { form, values } => {
            commands::visibility::execute(&form, &values)?;
            true
        }
        Commands::Payload {
            form,
            states,
            visible_only,
        } => {
            commands::payload::execute(&form, &states, visible_only)?;
            true
        }
    };

    if !passed {
        std::process::exit(1);
    }
    Ok(())
}
