//! # ncocc Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the subcommands of the ncocc CLI and exposes their
//! argument structs and handlers to `main.rs`.
//!
//! ## Commands
//!
//! - `run`: Run an occ command as the owner of the Nextcloud installation
//! - `split`: Show how a command line is tokenized before it reaches occ
//!
//! Each module defines a clap `Parser` struct and a `handle_*` function
//! returning `crate::core::error::Result<()>`.
//!

/// Runs occ and echoes its output. Holds `RunArgs` and `handle_run`.
pub mod run;
/// Prints the tokens of a command line. Holds `SplitArgs` and `handle_split`.
pub mod split;
