//! # ncocc CLI Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`. Each `.rs` file
//! in this directory (other than this module) is compiled as a separate test
//! crate that runs the compiled `ncocc` binary.
//!
//! Fake Nextcloud installations are temporary directories whose `occ` is a
//! shell script; tests run it with `--php-runtime sh`. The script is created
//! by the test process, so its owner matches and no identity switch happens.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

/// # Get ncocc Command (`ncocc_cmd`)
///
/// Creates an `assert_cmd::Command` for the `ncocc` binary built for this test
/// run, with `NEXTCLOUD_PATH`/`PHP_RUNTIME` cleared so the host environment
/// cannot leak into assertions.
pub fn ncocc_cmd() -> Command {
    let mut cmd = Command::cargo_bin("ncocc").expect("Failed to find ncocc binary for testing");
    cmd.env_remove("NEXTCLOUD_PATH").env_remove("PHP_RUNTIME");
    cmd
}

/// Creates a temporary installation whose `occ` runs `script` under `sh`.
pub fn fake_install(script: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    fs::write(dir.path().join("occ"), script).expect("Failed to write fake occ");
    dir
}

/// `ncocc run` against `install`, before the occ command is appended.
pub fn run_against(install: &TempDir) -> Command {
    let mut cmd = ncocc_cmd();
    cmd.arg("run")
        .arg("--nextcloud-path")
        .arg(install.path())
        .args(["--php-runtime", "sh"]);
    cmd
}
