//! # validate-enums entry point
//!
//! Parses arguments, initializes tracing from the verbosity flag, and
//! dispatches to the validate handler.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use valuesets_cli::validate::{run_validate, ValidateArgs};

/// Validate ontology mappings in LinkML enum definitions.
///
/// Every permissible value with a `meaning` CURIE is checked against the
/// ontology label for that term. Labels that match the value name, title,
/// or any alias pass; mismatches are warnings (errors with `--strict`).
#[derive(Parser, Debug)]
#[command(name = "validate-enums", version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    args: ValidateArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.args.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::new("error")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run_validate(&cli.args) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(1)
        }
    }
}
