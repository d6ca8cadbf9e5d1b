//! # ncocc Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! This file is the main entry point for the ncocc CLI, a wrapper around
//! Nextcloud's `occ` administration tool. It handles:
//! - Command-line argument parsing using Clap
//! - Setting up the logging system based on verbosity flags
//! - Routing execution to the command handlers
//! - Mapping failures to a process exit code
//!
//! ## Exit codes
//!
//! - `0`: occ ran and exited successfully
//! - occ's own exit code (1..=255) when occ ran and failed
//! - `1`: any other failure (configuration, missing occ, identity switch, ...)
//!
//! ## Examples
//!
//! ```bash
//! # Get help
//! ncocc --help
//!
//! # Run occ with debug logging (shows identity switch and command line)
//! ncocc -vv run --nextcloud-path /var/www/nextcloud --line "status"
//! ```
//!
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod commands; // Subcommand handlers (run, split)
mod common; // Process, tokenizer and identity helpers
mod core; // Configuration and error types
mod occ; // The occ runner itself

use crate::core::error::OccError;

/// Defines the top-level command-line arguments structure using Clap's derive macros.
#[derive(Parser, Debug)]
#[command(
    name = "ncocc",
    about = "Run Nextcloud's occ tool as the installation owner",
    long_about = "Runs occ with --no-ansi as the user owning the Nextcloud installation\n\
                  and reports its known failure messages as distinct errors.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

/// Enum defining all available top-level commands.
#[derive(Subcommand, Debug)]
enum Commands {
    #[command(alias = "r")]
    Run(commands::run::RunArgs),
    Split(commands::split::SplitArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Run(args) => commands::run::handle_run(args),
        Commands::Split(args) => commands::split::handle_split(args),
    };

    if let Err(e) = command_result {
        tracing::debug!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(exit_code_for(&e));
    }

    Ok(())
}

/// occ's exit code when the error came from a finished occ run, 1 otherwise.
fn exit_code_for(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<OccError>()
        .and_then(OccError::failure)
        .map(|failure| failure.result.exit_code)
        .filter(|code| (1..=255).contains(code))
        .unwrap_or(1)
}
