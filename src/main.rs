//! clozer - A CLI for building and checking cloze exercises
//!
//! clozer provides:
//! - Building: markers to anchors, blanks linked to highlights
//! - Linting of authoring mistakes
//! - Completeness checks over graded blanks
//! - Unified output format (jsonl/json/md/raw)

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // --verbose enables DEBUG level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let outcome = cli::run(cli)?;
    if outcome != cli::Outcome::Success {
        std::process::exit(outcome.exit_code());
    }

    Ok(())
}
