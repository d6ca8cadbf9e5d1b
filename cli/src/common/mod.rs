//! # ncocc Common Utilities (`common`)
//!
//! File: cli/src/common/mod.rs
//!
//! ## Overview
//!
//! Shared, domain-neutral helpers used by the occ runner:
//!
//! - **`process`**: Blocking execution of a child process with captured output.
//! - **`shell`**: Tokenizing a command line into argument words.
//! - **`system`**: Reading file ownership and switching the process identity.
//!
//! Nothing here knows about Nextcloud; the `occ` module composes these pieces.
//!

/// Blocking child-process execution with captured stdout/stderr.
pub mod process;
/// Quote-aware splitting of command lines into words.
pub mod shell;
/// File ownership and irreversible process identity changes.
pub mod system;
