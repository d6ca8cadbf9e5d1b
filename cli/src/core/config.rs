//! # ncocc Configuration System
//!
//! File: cli/src/core/config.rs
//!
//! ## Overview
//!
//! This module resolves the two settings an occ invocation needs:
//! - `nextcloud_path` (required): the Nextcloud installation directory holding `occ`.
//!   Also accepted as `path`, `nc_path` or `nc_dir`.
//! - `php_runtime` (default `"php"`): the interpreter used to run `occ`.
//!   Also accepted as `php`.
//!
//! ## Architecture
//!
//! Settings are layered, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. User-specific `config.toml` in the platform config directory (e.g. `~/.config/ncocc/`)
//! 3. Project-specific `.ncocc.toml` in the current directory or ancestors
//! 4. A file named explicitly with `--config`
//! 5. Command-line flags (which clap also fills from `NEXTCLOUD_PATH` / `PHP_RUNTIME`)
//!
//! Each file layer is a [`ConfigFile`] whose keys are all optional. After merging,
//! `~` is expanded in the Nextcloud path and the result is validated into an
//! [`OccConfig`].
//!
//! ## Examples
//!
//! ```toml
//! # ~/.config/ncocc/config.toml
//! nc_path = "~/nextcloud"
//! php = "php8.2"
//! ```
//!
//! ```rust
//! let cfg = config::load_config(ConfigOverrides::default())?;
//! let output = occ::run_occ(&cfg, "status")?;
//! ```
//!
use crate::core::error::{NcoccError, Result};
use anyhow::{anyhow, Context};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

const PROJECT_CONFIG_FILENAME: &str = ".ncocc.toml";
const USER_CONFIG_FILENAME: &str = "config.toml";

/// Settings for running occ against one installation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccConfig {
    /// Nextcloud installation directory; `occ` lives directly inside it.
    pub nextcloud_path: PathBuf,
    /// Interpreter executable used to run `occ`.
    pub php_runtime: String,
}

impl OccConfig {
    pub fn new(nextcloud_path: impl Into<PathBuf>, php_runtime: impl Into<String>) -> Self {
        OccConfig {
            nextcloud_path: nextcloud_path.into(),
            php_runtime: php_runtime.into(),
        }
    }
}

/// One layer of configuration as read from TOML. Unset keys defer to lower layers.
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(default, alias = "path", alias = "nc_path", alias = "nc_dir")]
    pub nextcloud_path: Option<String>,
    #[serde(default, alias = "php")]
    pub php_runtime: Option<String>,
}

/// Values supplied on the command line.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    /// Extra configuration file, applied above the user and project files.
    pub config_file: Option<PathBuf>,
    pub nextcloud_path: Option<String>,
    pub php_runtime: Option<String>,
}

fn default_php_runtime() -> String {
    "php".to_string()
}

/// Loads, merges and validates configuration from every source.
pub fn load_config(overrides: ConfigOverrides) -> Result<OccConfig> {
    let mut merged = ConfigFile::default();

    if let Some(user) = load_user_config()? {
        merged = merge_configs(merged, user);
    }
    if let Some(project) = load_project_config()? {
        merged = merge_configs(merged, project);
    }
    if let Some(path) = &overrides.config_file {
        info!("Loading configuration from: {}", path.display());
        merged = merge_configs(merged, load_config_from_path(path)?);
    }
    merged = merge_configs(
        merged,
        ConfigFile {
            nextcloud_path: overrides.nextcloud_path,
            php_runtime: overrides.php_runtime,
        },
    );

    let config = finalize_config(merged).context("Configuration validation failed")?;
    debug!("Final loaded configuration: {:?}", config);
    Ok(config)
}

fn load_user_config() -> Result<Option<ConfigFile>> {
    if let Some(proj_dirs) = ProjectDirs::from("org", "ncocc", "ncocc") {
        let config_path = proj_dirs.config_dir().join(USER_CONFIG_FILENAME);
        if config_path.is_file() {
            info!("Loading user configuration from: {}", config_path.display());
            load_config_from_path(&config_path).map(Some)
        } else {
            debug!(
                "User configuration file not found at {}",
                config_path.display()
            );
            Ok(None)
        }
    } else {
        warn!("Could not determine user config directory.");
        Ok(None)
    }
}

fn load_project_config() -> Result<Option<ConfigFile>> {
    let current_dir = std::env::current_dir().context("Failed to get current directory")?;
    match find_project_config_path(&current_dir) {
        Some(path) => {
            info!("Loading project configuration from: {}", path.display());
            load_config_from_path(&path).map(Some)
        }
        None => {
            debug!("No {} found in current directory or ancestors.", PROJECT_CONFIG_FILENAME);
            Ok(None)
        }
    }
}

/// Walks up from `start` looking for `.ncocc.toml`, stopping at a git root.
fn find_project_config_path(start: &Path) -> Option<PathBuf> {
    for dir in start.ancestors() {
        let candidate = dir.join(PROJECT_CONFIG_FILENAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if dir.join(".git").is_dir() {
            debug!(
                "Found .git directory at {}, stopping project config search.",
                dir.display()
            );
            return None;
        }
    }
    None
}

fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML from file: {}", path.display()))
}

/// Overlays `higher` on `lower`, key by key.
fn merge_configs(lower: ConfigFile, higher: ConfigFile) -> ConfigFile {
    ConfigFile {
        nextcloud_path: higher.nextcloud_path.or(lower.nextcloud_path),
        php_runtime: higher.php_runtime.or(lower.php_runtime),
    }
}

fn finalize_config(merged: ConfigFile) -> Result<OccConfig> {
    let raw_path = merged.nextcloud_path.ok_or_else(|| {
        anyhow!(NcoccError::Config(
            "nextcloud_path is not set. Pass --nextcloud-path, set NEXTCLOUD_PATH \
             or add it to a config file."
                .to_string()
        ))
    })?;
    if raw_path.trim().is_empty() {
        return Err(anyhow!(NcoccError::Config(
            "nextcloud_path cannot be empty.".to_string()
        )));
    }

    let php_runtime = merged.php_runtime.unwrap_or_else(default_php_runtime);
    if php_runtime.trim().is_empty() {
        return Err(anyhow!(NcoccError::Config(
            "php_runtime cannot be empty.".to_string()
        )));
    }

    let nextcloud_path = PathBuf::from(shellexpand::tilde(&raw_path).into_owned());
    debug!("Expanded Nextcloud path: {}", nextcloud_path.display());
    if !nextcloud_path.is_dir() {
        warn!(
            "Configured Nextcloud path '{}' is not a directory.",
            nextcloud_path.display()
        );
    }

    Ok(OccConfig::new(nextcloud_path, php_runtime))
}
