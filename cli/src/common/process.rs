//! # ncocc Process Execution (`common::process`)
//!
//! File: cli/src/common/process.rs
//!
//! ## Overview
//!
//! Blocking execution of an external program with captured output. This is
//! the only place where ncocc launches a child process; `occ::run_occ` uses it
//! after it has resolved the command line and settled the process identity.
//!
//! ## Architecture
//!
//! - **`ExecutionResult`**: exit code plus the decoded stdout/stderr text.
//! - **`run_capture`**: wraps `std::process::Command::output`, closing stdin and
//!   waiting for the child without a timeout.
//!
//! Output is decoded lossily: invalid UTF-8 sequences become U+FFFD rather
//! than failing the whole invocation.
//!
use std::{
    io,
    os::unix::process::ExitStatusExt,
    process::{Command, ExitStatus, Stdio},
};
use tracing::debug;

/// Captured outcome of one child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionResult {
    /// Exit code. A child terminated by a signal reports the negated signal number.
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl ExecutionResult {
    /// `true` when the child exited with code 0.
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// stderr when it is non-empty, stdout otherwise.
    pub fn output(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Runs `argv[0]` with the remaining words as arguments and waits for it.
///
/// ## Errors
///
/// Returns the I/O error from the operating system when the program cannot be
/// launched (missing binary, permission denied). A launched program that
/// exits non-zero is **not** an error here; callers inspect `exit_code`.
pub fn run_capture(argv: &[String]) -> io::Result<ExecutionResult> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "empty command line"))?;

    debug!("Spawning {:?}", argv);
    let output = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .output()?;

    let result = ExecutionResult {
        exit_code: exit_code(output.status),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };
    debug!("'{}' exited with code {}", program, result.exit_code);
    Ok(result)
}

fn exit_code(status: ExitStatus) -> i32 {
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}
