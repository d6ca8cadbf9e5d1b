//! # occ Output Classification (`occ::classify`)
//!
//! File: cli/src/occ/classify.rs
//!
//! ## Overview
//!
//! Inspects what occ printed and decides what it means:
//!
//! - `inspect_stderr` looks for administrative states occ reports on stderr
//!   (maintenance mode, not installed). These are warnings, never errors.
//! - `classify_failure` maps a non-zero exit to an [`OccError`] variant by
//!   matching the first output line against known Symfony console messages.
//!
//! A signature matches when **every** one of its words appears as a whole token
//! of the line, in any order. Plain substring search is not used: `defined.`
//! must be its own token, so `undefined.` does not count.
//!
use crate::common::{process::ExecutionResult, shell};
use crate::core::error::{OccError, OccFailure};
use tracing::warn;

const MAINTENANCE_MARKER: &str = "is in maintenance mode";
const NOT_INSTALLED_MARKER: &str = "is not installed";

/// Known occ failure messages, checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NoCommandsDefined,
    NotEnoughArguments,
    OptionNotDefined,
    OptionRequiresValue,
}

impl FailureKind {
    pub const ALL: [FailureKind; 4] = [
        FailureKind::NoCommandsDefined,
        FailureKind::NotEnoughArguments,
        FailureKind::OptionNotDefined,
        FailureKind::OptionRequiresValue,
    ];

    /// Words that must all be present in the first output line.
    pub fn signature(self) -> &'static [&'static str] {
        match self {
            FailureKind::NoCommandsDefined => &["Command", "is", "not", "defined."],
            FailureKind::NotEnoughArguments => &["Not", "enough", "arguments"],
            FailureKind::OptionNotDefined => &["option", "does", "not", "exist."],
            FailureKind::OptionRequiresValue => &["option", "requires", "value."],
        }
    }

    fn matches(self, tokens: &[String]) -> bool {
        self.signature()
            .iter()
            .all(|word| tokens.iter().any(|token| token == word))
    }

    fn into_error(self, failure: OccFailure) -> OccError {
        match self {
            FailureKind::NoCommandsDefined => OccError::NoCommandsDefined(failure),
            FailureKind::NotEnoughArguments => OccError::NotEnoughArguments(failure),
            FailureKind::OptionNotDefined => OccError::OptionNotDefined(failure),
            FailureKind::OptionRequiresValue => OccError::OptionRequiresValue(failure),
        }
    }

    /// First kind whose signature is fully present in `line`.
    ///
    /// A line that cannot be tokenized (stray quote) matches nothing.
    pub fn detect(line: &str) -> Option<FailureKind> {
        let tokens = shell::split(line).ok()?;
        FailureKind::ALL
            .into_iter()
            .find(|kind| kind.matches(&tokens))
    }
}

/// Logs occ's administrative warnings and reports whether maintenance mode is on.
pub fn inspect_stderr(stderr: &str) -> bool {
    let first_line = stderr.lines().next().unwrap_or_default();

    let maintenance = stderr.contains(MAINTENANCE_MARKER);
    if maintenance {
        warn!("{}", first_line);
    }
    if stderr.contains(NOT_INSTALLED_MARKER) {
        warn!("{}", first_line);
    }
    maintenance
}

/// Builds the error for a run that exited non-zero.
pub fn classify_failure(command: Vec<String>, result: ExecutionResult) -> OccError {
    let kind = result
        .output()
        .trim()
        .lines()
        .next()
        .and_then(FailureKind::detect);
    let failure = OccFailure::new(command, result);
    match kind {
        Some(kind) => kind.into_error(failure),
        None => OccError::ExecutionFailed(failure),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(stdout: &str, stderr: &str) -> OccError {
        classify_failure(
            vec!["php".into(), "/srv/nextcloud/occ".into(), "--no-ansi".into()],
            ExecutionResult {
                exit_code: 1,
                stdout: stdout.into(),
                stderr: stderr.into(),
            },
        )
    }

    #[test]
    fn test_detects_unknown_command() {
        let err = failed("", "Command \"foo\" is not defined.\n\nDid you mean one of these?\n");
        assert!(matches!(err, OccError::NoCommandsDefined(_)));
    }

    #[test]
    fn test_detects_missing_arguments() {
        let err = failed("", "Not enough arguments (missing: \"uid\").\n");
        assert!(matches!(err, OccError::NotEnoughArguments(_)));
    }

    #[test]
    fn test_detects_unknown_option() {
        let err = failed("", "The \"--frobnicate\" option does not exist.\n");
        assert!(matches!(err, OccError::OptionNotDefined(_)));
    }

    #[test]
    fn test_detects_option_without_value() {
        let err = failed("", "The \"--output\" option requires a value.\n");
        assert!(matches!(err, OccError::OptionRequiresValue(_)));
    }

    #[test]
    fn test_only_first_line_is_considered() {
        let err = failed("", "Something broke\nCommand \"foo\" is not defined.\n");
        assert!(matches!(err, OccError::ExecutionFailed(_)));
    }

    #[test]
    fn test_leading_blank_lines_are_skipped() {
        let err = failed("", "\n\n   Not enough arguments (missing: \"app\").  \n");
        assert!(matches!(err, OccError::NotEnoughArguments(_)));
    }

    #[test]
    fn test_words_match_in_any_order() {
        assert_eq!(
            FailureKind::detect("defined. not is Command"),
            Some(FailureKind::NoCommandsDefined)
        );
    }

    #[test]
    fn test_substrings_do_not_match() {
        // "undefined." contains "defined." but is a different token.
        assert_eq!(FailureKind::detect("Command foo is not undefined."), None);
        assert_eq!(FailureKind::detect("Command is not defined"), None);
    }

    #[test]
    fn test_untokenizable_line_is_generic() {
        let err = failed("", "Command \"foo is not defined.\n");
        assert!(matches!(err, OccError::ExecutionFailed(_)));
    }

    #[test]
    fn test_stdout_used_when_stderr_empty() {
        let err = failed("The \"--foo\" option does not exist.\n", "");
        assert!(matches!(err, OccError::OptionNotDefined(_)));
    }

    #[test]
    fn test_empty_output_is_generic_and_keeps_context() {
        let err = failed("", "");
        match err {
            OccError::ExecutionFailed(failure) => {
                assert_eq!(failure.command[0], "php");
                assert_eq!(failure.result.exit_code, 1);
                assert!(failure.message().is_none());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_inspect_stderr_flags_maintenance() {
        assert!(inspect_stderr(
            "Nextcloud is in maintenance mode, no apps are loaded.\n\
             Commands provided by apps are unavailable.\n"
        ));
        assert!(!inspect_stderr(
            "Nextcloud is not installed - only a limited number of commands are available\n"
        ));
        assert!(!inspect_stderr(""));
    }
}
