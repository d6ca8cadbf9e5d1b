//! # ncocc occ Runner (`occ`)
//!
//! File: cli/src/occ/mod.rs
//!
//! ## Overview
//!
//! Runs Nextcloud's `occ` administration tool and turns its outcome into either
//! an [`OccOutput`] or a typed [`OccError`].
//!
//! ## Architecture
//!
//! `run_occ` is linear, with no loops and no retries:
//! 1. Resolve `<nextcloud_path>/occ` and stat it (`FileNotFound` if missing).
//! 2. If the process user differs from the file owner, switch identity to the
//!    owner (`Authentication` if not permitted, `IdentitySwitch` for any other
//!    errno). See [`system::switch_identity`].
//! 3. Build `<php_runtime> <nextcloud_path>/occ --no-ansi <tokens...>`.
//! 4. Run it to completion, capturing exit code, stdout and stderr.
//! 5. Log maintenance-mode / not-installed warnings from stderr.
//! 6. Classify a non-zero exit (see [`classify`]) or return the output.
//!
//! ## Concurrency
//!
//! Step 2 changes the identity of the whole process and cannot be undone.
//! Do not call `run_occ` from several threads at once, and do not expect the
//! process to keep its original user afterwards.
//!
//! ## Usage
//!
//! ```rust
//! use crate::occ::{self, OccCommand};
//!
//! let output = occ::run_occ(&config, OccCommand::from("status --output=json"))?;
//! if output.maintenance_mode {
//!     println!("Nextcloud is in maintenance mode");
//! }
//! ```
//!
pub mod classify;

pub use crate::common::shell::OccCommand;

use crate::common::{process, system};
use crate::core::{config::OccConfig, error::OccError};
use std::{fs, io, path::PathBuf};
use tracing::debug;

/// Name of the administration script inside a Nextcloud installation.
pub const OCC_SCRIPT: &str = "occ";
/// Flag prepended to every command so output carries no ANSI colour codes.
pub const NO_ANSI_FLAG: &str = "--no-ansi";

/// Successful occ run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccOutput {
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
    /// occ reported that Nextcloud is in maintenance mode.
    pub maintenance_mode: bool,
}

/// Path of the occ script for an installation directory.
pub fn occ_path(config: &OccConfig) -> PathBuf {
    config.nextcloud_path.join(OCC_SCRIPT)
}

/// Full argument vector for an occ run, interpreter first.
pub fn build_command_line(config: &OccConfig, tokens: Vec<String>) -> Vec<String> {
    let mut argv = Vec::with_capacity(tokens.len() + 3);
    argv.push(config.php_runtime.clone());
    argv.push(occ_path(config).to_string_lossy().into_owned());
    argv.push(NO_ANSI_FLAG.to_string());
    argv.extend(tokens);
    argv
}

/// Runs occ as the owner of the installation. See the module docs for the steps.
///
/// The command is tokenized only after the ownership checks, so a missing occ
/// script is reported before a malformed command line.
pub fn run_occ(
    config: &OccConfig,
    command: impl Into<OccCommand>,
) -> Result<OccOutput, OccError> {
    let script = occ_path(config);
    let metadata = fs::metadata(&script).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => OccError::FileNotFound {
            path: script.clone(),
        },
        _ => OccError::Inspect {
            path: script.clone(),
            source,
        },
    })?;

    let owner = system::FileOwner::from(&metadata);
    if system::current_uid() != owner.uid {
        system::switch_identity(owner).map_err(|source| identity_error(owner, source))?;
    }

    let command: OccCommand = command.into();
    let tokens = command.into_tokens()?;
    let argv = build_command_line(config, tokens);

    debug!("Running command '{:?}'.", argv);
    let result = process::run_capture(&argv).map_err(|source| OccError::Spawn {
        command: argv.clone(),
        source,
    })?;

    let maintenance_mode = classify::inspect_stderr(&result.stderr);

    if !result.success() {
        return Err(classify::classify_failure(argv, result));
    }

    Ok(OccOutput {
        exit_code: result.exit_code,
        stdout: result.stdout,
        stderr: result.stderr,
        maintenance_mode,
    })
}

// Only a refused switch is an authentication failure; other errnos are reported as-is.
fn identity_error(owner: system::FileOwner, source: io::Error) -> OccError {
    if source.kind() == io::ErrorKind::PermissionDenied {
        OccError::Authentication {
            uid: owner.uid,
            gid: owner.gid,
            source,
        }
    } else {
        OccError::IdentitySwitch {
            uid: owner.uid,
            gid: owner.gid,
            source,
        }
    }
}
