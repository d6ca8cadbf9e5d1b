//! # ncocc Split Command
//!
//! File: cli/src/commands/split.rs
//!
//! ## Overview
//!
//! Implements `ncocc split`, which prints the words a command line is broken
//! into before being passed to occ, one per line. Useful for checking how
//! quotes are handled without touching the installation.
//!
//! ```bash
//! $ ncocc split "user:add --display-name 'Jane Doe' jane"
//! user:add
//! --display-name
//! 'Jane Doe'
//! jane
//! ```
//!
use crate::common::shell;
use crate::core::error::Result;
use anyhow::Context;
use clap::Parser;

/// # Split Arguments (`SplitArgs`)
#[derive(Parser, Debug)]
#[command(about = "Print the words a command line is split into, one per line")]
pub struct SplitArgs {
    /// The command line to tokenize. Quote it as a single shell argument.
    #[arg(value_name = "LINE")]
    pub line: String,
}

/// Tokenizes `args.line` and prints each word on its own line.
pub fn handle_split(args: SplitArgs) -> Result<()> {
    let words = shell::split(&args.line)
        .with_context(|| format!("Failed to tokenize '{}'", args.line))?;
    for word in words {
        println!("{}", word);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_split_line() {
        let args = SplitArgs::try_parse_from(["split", "app:enable files"]).unwrap();
        assert_eq!(args.line, "app:enable files");
    }

    #[test]
    fn test_handle_split_reports_unclosed_quote() {
        let err = handle_split(SplitArgs {
            line: "app:enable 'files".into(),
        })
        .unwrap_err();
        assert!(err.to_string().contains("Failed to tokenize"));
        assert!(err.downcast_ref::<shell::SplitError>().is_some());
    }
}
