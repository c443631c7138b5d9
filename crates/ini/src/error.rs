//! Error types for parsing, substitution and I/O.
//!
//! Responsibilities:
//! - Define the syntax error raised by the line parser.
//! - Define the substitution error raised by the explicit template pass.
//! - Provide the umbrella `IniError` returned by loading entry points.
//!
//! Does NOT handle:
//! - Typed getter misses (`get_int`/`get_bool` return `None`, see `lookup.rs`).
//!
//! Invariants:
//! - I/O errors are passed through unchanged, never re-wrapped with context.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use thiserror::Error;

/// A line that matched none of the recognised shapes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid INI syntax on line {line}: {text}")]
pub struct SyntaxError {
    /// 1-based physical line number, counting blank and comment lines.
    pub line: usize,
    /// The offending line without leading or trailing whitespace.
    pub text: String,
}

/// A stored value that the template engine could not expand.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to substitute {}: {message}", describe_location(.section, .key, .index))]
pub struct SubstitutionError {
    pub section: String,
    pub key: String,
    /// Element position when the failing value belongs to an array.
    pub index: Option<usize>,
    pub message: String,
}

impl SubstitutionError {
    /// Human readable location such as `[db] hosts[2]`.
    pub fn location(&self) -> String {
        describe_location(&self.section, &self.key, &self.index)
    }
}

fn describe_location(section: &str, key: &str, index: &Option<usize>) -> String {
    match index {
        Some(index) => format!("[{section}] {key}[{index}]"),
        None => format!("[{section}] {key}"),
    }
}

/// Errors surfaced by loading, substitution and dotenv handling.
#[derive(Error, Debug)]
pub enum IniError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    Substitution(#[from] SubstitutionError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_message_includes_line_and_text() {
        let err = SyntaxError {
            line: 6,
            text: "wut?".to_string(),
        };
        assert_eq!(err.to_string(), "invalid INI syntax on line 6: wut?");
    }

    #[test]
    fn test_substitution_error_location_with_and_without_index() {
        let scalar = SubstitutionError {
            section: "db".to_string(),
            key: "host".to_string(),
            index: None,
            message: "boom".to_string(),
        };
        assert_eq!(scalar.location(), "[db] host");
        assert_eq!(scalar.to_string(), "failed to substitute [db] host: boom");

        let element = SubstitutionError {
            index: Some(2),
            ..scalar
        };
        assert_eq!(element.location(), "[db] host[2]");
    }

    #[test]
    fn test_io_error_is_transparent() {
        let io = std::io::Error::new(ErrorKind::NotFound, "no such file");
        let err = IniError::from(io);
        assert_eq!(err.to_string(), "no such file");
        assert!(matches!(err, IniError::Io(ref e) if e.kind() == ErrorKind::NotFound));
    }
}
