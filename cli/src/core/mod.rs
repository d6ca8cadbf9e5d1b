//! # ncocc Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by the
//! occ runner and the command handlers.
//!
//! ## Architecture
//!
//! - `config`: Configuration loading, merging, and validation
//! - `error`: Typed occ failures, application errors, and the `Result` alias
//!
//! ```rust
//! use crate::core::config; // For resolving nextcloud_path / php_runtime
//! use crate::core::error::{OccError, Result}; // For error handling
//! ```
//!
pub mod config;
pub mod error;
