//! Command-line interface for the engine.

use std::io::Read;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use console::style;
use thiserror::Error;

use crate::grammar::parse_parcel_input;
use crate::types::{Jurisdiction, ParseResult};

/// Operational CLI failures, kept separate from per-line parse errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Jurisdiction code outside the supported set.
    #[error("Unknown jurisdiction '{0}'. Expected one of NSW, QLD, SA, VIC")]
    UnknownJurisdiction(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parcelmap engine - Normalize Australian land-title references.
#[derive(Parser)]
#[command(name = "parcelmap-engine")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse raw parcel identifiers for a jurisdiction.
    Parse {
        /// Jurisdiction code (NSW, QLD, SA or VIC)
        jurisdiction: String,

        /// Raw identifier text; read from stdin when omitted
        text: Option<String>,

        /// Read input from a file instead of the command line
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Emit the full result as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse {
            jurisdiction,
            text,
            file,
            json,
        } => parse_command(&jurisdiction, text.as_deref(), file.as_deref(), json),
    }
}

/// Execute the parse command.
fn parse_command(
    code: &str,
    text: Option<&str>,
    file: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let jurisdiction = Jurisdiction::from_code(code)
        .ok_or_else(|| CliError::UnknownJurisdiction(code.to_string()))?;

    let raw_text = match (file, text) {
        (Some(path), _) => std::fs::read_to_string(path)?,
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let result = parse_parcel_input(jurisdiction, &raw_text);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_summary(jurisdiction, &result);
    Ok(())
}

/// Print a human-readable summary of a parse result.
fn print_summary(jurisdiction: Jurisdiction, result: &ParseResult) {
    let malformed_count = if result.malformed.is_empty() {
        style(result.malformed.len()).green()
    } else {
        style(result.malformed.len()).yellow().bold()
    };

    println!(
        "{} {} identifiers parsed, {} malformed",
        style(jurisdiction.as_str()).bold(),
        style(result.valid.len()).green(),
        malformed_count,
    );

    for canonical_id in result.canonical_ids() {
        println!("  {canonical_id}");
    }

    if !result.malformed.is_empty() {
        println!();
        for entry in &result.malformed {
            println!(
                "  {} '{}': {}",
                style("rejected").red(),
                entry.raw_input,
                entry.error_message
            );
        }
    }
}
