//! # ncocc Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types used throughout ncocc.
//!
//! ## Architecture
//!
//! The error system consists of three parts:
//! - `OccError`: typed failures of a single `occ` invocation. Callers match on
//!   the variant to tell "occ rejected the command" apart from "occ could not
//!   be run at all".
//! - `NcoccError`: application-level errors (configuration, arguments).
//! - `Result<T>`: a type alias for `anyhow::Result<T>` used by handlers.
//!
//! Every variant produced from occ's own output carries an [`OccFailure`]: the
//! full command line that was executed and the raw captured result.
//!
//! ## Examples
//!
//! ```rust
//! match occ::run_occ(&config, command) {
//!     Ok(output) => println!("{}", output.stdout),
//!     Err(OccError::NoCommandsDefined(failure)) => {
//!         eprintln!("occ does not know '{}'", failure.command_line());
//!     }
//!     Err(e) => return Err(e.into()),
//! }
//! ```
//!
use crate::common::{process::ExecutionResult, shell::SplitError};
use std::{fmt, io, path::PathBuf};
use thiserror::Error;

/// Application-level errors raised outside of an occ invocation.
#[derive(Error, Debug)]
pub enum NcoccError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Argument parsing error: {0}")]
    ArgumentParsing(String),
}

/// Command line and captured result of an occ run that failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccFailure {
    /// Full argument vector, interpreter first.
    pub command: Vec<String>,
    pub result: ExecutionResult,
}

impl OccFailure {
    pub fn new(command: Vec<String>, result: ExecutionResult) -> Self {
        OccFailure { command, result }
    }

    /// The command joined with spaces, for messages.
    pub fn command_line(&self) -> String {
        self.command.join(" ")
    }

    /// First non-blank line of occ's output, if any.
    pub fn message(&self) -> Option<&str> {
        self.result.output().trim().lines().next().map(str::trim_end)
    }
}

impl fmt::Display for OccFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' exited with code {}",
            self.command_line(),
            self.result.exit_code
        )?;
        match self.message() {
            Some(message) => write!(f, ": {}", message),
            None => Ok(()),
        }
    }
}

/// Failure of a single occ invocation.
#[derive(Error, Debug)]
pub enum OccError {
    #[error("occ not found at '{}'", .path.display())]
    FileNotFound { path: PathBuf },

    #[error("Failed to inspect '{}': {source}", .path.display())]
    Inspect {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Insufficient permissions to switch to user id {uid}.")]
    Authentication {
        uid: u32,
        gid: u32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to switch to user id {uid} (group {gid}): {source}")]
    IdentitySwitch {
        uid: u32,
        gid: u32,
        #[source]
        source: io::Error,
    },

    #[error("Failed to tokenize occ command: {0}")]
    Tokenize(#[from] SplitError),

    #[error("Failed to launch '{}': {source}", .command.join(" "))]
    Spawn {
        command: Vec<String>,
        #[source]
        source: io::Error,
    },

    #[error("occ command is not defined: {0}")]
    NoCommandsDefined(OccFailure),

    #[error("Not enough arguments for occ command: {0}")]
    NotEnoughArguments(OccFailure),

    #[error("Unknown option for occ command: {0}")]
    OptionNotDefined(OccFailure),

    #[error("occ option requires a value: {0}")]
    OptionRequiresValue(OccFailure),

    #[error("occ command failed: {0}")]
    ExecutionFailed(OccFailure),
}

impl OccError {
    /// Command line and captured output, for variants produced after occ ran.
    pub fn failure(&self) -> Option<&OccFailure> {
        match self {
            OccError::NoCommandsDefined(failure)
            | OccError::NotEnoughArguments(failure)
            | OccError::OptionNotDefined(failure)
            | OccError::OptionRequiresValue(failure)
            | OccError::ExecutionFailed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Type alias for Result using anyhow::Error for application-level code.
pub type Result<T> = anyhow::Result<T>;
