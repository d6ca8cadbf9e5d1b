//! # ncocc Run Command
//!
//! File: cli/src/commands/run.rs
//!
//! ## Overview
//!
//! Implements `ncocc run`, which executes an occ command against a Nextcloud
//! installation and echoes occ's stdout and stderr unchanged.
//!
//! ## Architecture
//!
//! 1. Resolve `nextcloud_path` / `php_runtime` from config files, flags and
//!    environment (`core::config::load_config`).
//! 2. Build the command: `--line` is tokenized, trailing arguments after `--`
//!    are passed through as-is.
//! 3. Call `occ::run_occ`, which may switch the process to the owner of `occ`.
//! 4. Echo the captured output. On a classified failure the output is echoed
//!    before the error is returned, so `main` can print it and exit with occ's
//!    exit code.
//!
//! ## Examples
//!
//! ```bash
//! # Raw command line, tokenized by ncocc
//! ncocc run --nextcloud-path /var/www/nextcloud --line "user:list --output=json"
//!
//! # Pre-split words, passed through untouched
//! NEXTCLOUD_PATH=/var/www/nextcloud ncocc run -- config:system:get trusted_domains
//! ```
//!
use crate::core::config::{self, ConfigOverrides};
use crate::core::error::{NcoccError, Result};
use crate::occ::{self, OccCommand};
use anyhow::anyhow;
use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// # Run Arguments (`RunArgs`)
#[derive(Parser, Debug)]
#[command(
    about = "Run an occ command as the owner of the Nextcloud installation",
    long_about = "Runs `<php_runtime> <nextcloud_path>/occ --no-ansi <command...>`.\n\
                  If ncocc runs as a different user than the owner of occ, it switches\n\
                  to that user first (this requires root)."
)]
pub struct RunArgs {
    /// Additional TOML configuration file, applied above user and project files.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Nextcloud installation directory containing `occ`.
    #[arg(long, env = "NEXTCLOUD_PATH", value_name = "DIR", visible_alias = "nc-path")]
    pub nextcloud_path: Option<String>,

    /// Interpreter used to run `occ` [default: php].
    #[arg(long, env = "PHP_RUNTIME", value_name = "BIN", visible_alias = "php")]
    pub php_runtime: Option<String>,

    /// occ command as a single string, split into words by ncocc.
    #[arg(short, long, value_name = "COMMAND", conflicts_with = "args")]
    pub line: Option<String>,

    /// occ command words, given after `--` and passed through unchanged.
    #[arg(last = true, value_name = "ARGS")]
    pub args: Vec<String>,
}

impl RunArgs {
    fn occ_command(&mut self) -> Result<OccCommand> {
        if let Some(line) = self.line.take() {
            return Ok(OccCommand::Line(line));
        }
        if self.args.is_empty() {
            return Err(anyhow!(NcoccError::ArgumentParsing(
                "No occ command given. Use --line \"<command>\" or `-- <words...>`.".to_string()
            )));
        }
        Ok(OccCommand::Tokens(std::mem::take(&mut self.args)))
    }
}

/// Handles `ncocc run`.
pub fn handle_run(mut args: RunArgs) -> Result<()> {
    let command = args.occ_command()?;
    let config = config::load_config(ConfigOverrides {
        config_file: args.config,
        nextcloud_path: args.nextcloud_path,
        php_runtime: args.php_runtime,
    })?;

    match occ::run_occ(&config, command) {
        Ok(output) => {
            print!("{}", output.stdout);
            eprint!("{}", output.stderr);
            if output.maintenance_mode {
                info!("occ finished while Nextcloud is in maintenance mode.");
            }
            Ok(())
        }
        Err(e) => {
            if let Some(failure) = e.failure() {
                print!("{}", failure.result.stdout);
                eprint!("{}", failure.result.stderr);
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_line() {
        let mut args = RunArgs::try_parse_from([
            "run",
            "--nextcloud-path",
            "/srv/nextcloud",
            "--line",
            "status --output=json",
        ])
        .unwrap();
        assert_eq!(args.nextcloud_path.as_deref(), Some("/srv/nextcloud"));
        assert_eq!(
            args.occ_command().unwrap(),
            OccCommand::Line("status --output=json".into())
        );
    }

    #[test]
    fn test_parses_trailing_words() {
        let mut args = RunArgs::try_parse_from([
            "run",
            "--php",
            "php8.2",
            "--",
            "user:add",
            "--display-name",
            "Jane Doe",
        ])
        .unwrap();
        assert_eq!(args.php_runtime.as_deref(), Some("php8.2"));
        assert_eq!(
            args.occ_command().unwrap(),
            OccCommand::Tokens(vec![
                "user:add".into(),
                "--display-name".into(),
                "Jane Doe".into()
            ])
        );
    }

    #[test]
    fn test_line_conflicts_with_words() {
        let result = RunArgs::try_parse_from(["run", "--line", "status", "--", "status"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_command_is_rejected() {
        let mut args = RunArgs::try_parse_from(["run"]).unwrap();
        let err = args.occ_command().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<NcoccError>(),
            Some(NcoccError::ArgumentParsing(_))
        ));
    }
}
