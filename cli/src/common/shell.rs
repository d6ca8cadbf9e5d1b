//! # ncocc Command Tokenizer (`common::shell`)
//!
//! File: cli/src/common/shell.rs
//!
//! ## Overview
//!
//! Splits a shell-like command line into the argument words handed to `occ`.
//! This is deliberately **not** a POSIX shell parser:
//!
//! - Words are separated by space, tab, carriage return and newline.
//! - Single and double quotes group words. A quoted section that opens a word
//!   ends that word at its closing quote, so `"a b"c` becomes two words.
//! - A quote character in the middle of an unquoted word is kept literally.
//! - There is no comment character and no escape character; `\` is literal.
//! - A word containing a space keeps its surrounding quotes. Any other word has
//!   all leading and trailing `"`/`'` characters stripped.
//!
//! The last rule means `--name "Jane Doe"` yields `--name` and `"Jane Doe"`
//! (quotes kept), while `--name 'jane'` yields `--name` and `jane`.
//!
//! ## Usage
//!
//! ```rust
//! use crate::common::shell::{self, OccCommand};
//!
//! let words = shell::split("config:system:get trusted_domains")?;
//! let tokens = OccCommand::Line("status --output=json".into()).into_tokens()?;
//! ```
//!
use thiserror::Error;

const QUOTES: [char; 2] = ['"', '\''];

/// Error raised when a command line cannot be tokenized.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    #[error("No closing quotation ({quote}) for the word starting at byte {offset}")]
    UnclosedQuote { quote: char, offset: usize },
}

/// A command for `occ`, either already split into words or still a raw line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccCommand {
    /// Words passed through as-is.
    Tokens(Vec<String>),
    /// A raw line, tokenized with [`split`] before use.
    Line(String),
}

impl OccCommand {
    /// Resolves the command into its final word list.
    pub fn into_tokens(self) -> Result<Vec<String>, SplitError> {
        match self {
            OccCommand::Tokens(tokens) => Ok(tokens),
            OccCommand::Line(line) => split(&line),
        }
    }
}

impl From<&str> for OccCommand {
    fn from(line: &str) -> Self {
        OccCommand::Line(line.to_string())
    }
}

impl From<String> for OccCommand {
    fn from(line: String) -> Self {
        OccCommand::Line(line)
    }
}

impl From<Vec<String>> for OccCommand {
    fn from(tokens: Vec<String>) -> Self {
        OccCommand::Tokens(tokens)
    }
}

#[derive(Clone, Copy)]
enum State {
    Between,
    Word,
    Quoted { quote: char, offset: usize },
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

/// Splits `line` into words following the rules in the module documentation.
pub fn split(line: &str) -> Result<Vec<String>, SplitError> {
    let mut raw_words = Vec::new();
    let mut word = String::new();
    let mut state = State::Between;

    for (offset, c) in line.char_indices() {
        state = match state {
            State::Between if is_separator(c) => State::Between,
            State::Between => {
                word.push(c);
                if QUOTES.contains(&c) {
                    State::Quoted { quote: c, offset }
                } else {
                    State::Word
                }
            }
            State::Word if is_separator(c) => {
                raw_words.push(std::mem::take(&mut word));
                State::Between
            }
            State::Word => {
                word.push(c);
                State::Word
            }
            State::Quoted { quote, offset: start } => {
                word.push(c);
                if c == quote {
                    raw_words.push(std::mem::take(&mut word));
                    State::Between
                } else {
                    State::Quoted {
                        quote,
                        offset: start,
                    }
                }
            }
        };
    }

    match state {
        State::Quoted { quote, offset } => {
            return Err(SplitError::UnclosedQuote { quote, offset });
        }
        State::Word => raw_words.push(word),
        State::Between => {}
    }

    Ok(raw_words.into_iter().map(unquote).collect())
}

// Words containing a space keep their quotes.
fn unquote(word: String) -> String {
    if word.contains(' ') {
        word
    } else {
        word.trim_matches(|c: char| QUOTES.contains(&c)).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        split(line).expect("line should tokenize")
    }

    #[test]
    fn test_split_plain_words() {
        assert_eq!(
            words("  config:system:get\ttrusted_domains\n"),
            vec!["config:system:get", "trusted_domains"]
        );
    }

    #[test]
    fn test_split_mixed_quotes() {
        // The double-quoted group contains a space, so its quotes survive.
        assert_eq!(
            words(r#"foo "bar baz" 'qux'"#),
            vec!["foo", "\"bar baz\"", "qux"]
        );
    }

    #[test]
    fn test_split_strips_quotes_from_single_words() {
        assert_eq!(
            words(r#"user:add "alice" --display-name='Alice'"#),
            vec!["user:add", "alice", "--display-name='Alice"]
        );
    }

    #[test]
    fn test_quoted_group_ends_word() {
        assert_eq!(words(r#""a b"c"#), vec!["\"a b\"", "c"]);
    }

    #[test]
    fn test_backslash_is_literal() {
        assert_eq!(
            words(r"files:scan C:\data\x"),
            vec!["files:scan", r"C:\data\x"]
        );
        assert_eq!(words(r#""a\" b"#), vec!["a\\", "b"]);
    }

    #[test]
    fn test_hash_is_not_a_comment() {
        assert_eq!(words("app:enable #files"), vec!["app:enable", "#files"]);
    }

    #[test]
    fn test_empty_quotes_yield_empty_word() {
        assert_eq!(
            words(r#"config:app:set x --value """#),
            vec!["config:app:set", "x", "--value", ""]
        );
    }

    #[test]
    fn test_empty_line() {
        assert!(words("").is_empty());
        assert!(words(" \t ").is_empty());
    }

    #[test]
    fn test_unclosed_quote_fails() {
        let err = split(r#"foo "bar baz"#).unwrap_err();
        assert_eq!(
            err,
            SplitError::UnclosedQuote {
                quote: '"',
                offset: 4
            }
        );
        assert!(split("it's").is_ok(), "mid-word quotes are literal");
        assert!(split("'open").is_err());
    }

    #[test]
    fn test_tokens_pass_through_unchanged() {
        let tokens = vec!["'quoted'".to_string(), "a b".to_string()];
        assert_eq!(
            OccCommand::Tokens(tokens.clone()).into_tokens().unwrap(),
            tokens
        );
    }

    #[test]
    fn test_line_is_tokenized() {
        assert_eq!(
            OccCommand::from("maintenance:mode --on").into_tokens().unwrap(),
            vec!["maintenance:mode", "--on"]
        );
    }
}
