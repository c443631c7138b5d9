//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Define the command-level errors that are not library errors.
//! - Map error chains onto exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-5 are reserved for specific error categories.
//! - Mapping inspects the whole anyhow chain, so added context never changes the code.

use std::path::PathBuf;

use envini::IniError;
use thiserror::Error;

/// Structured exit codes for envini.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure, including `fmt --check`
    /// finding a non-canonical file.
    GeneralError = 1,

    /// The INI file contains a line with invalid syntax.
    SyntaxError = 2,

    /// The requested key has no value (or not one of the requested kind).
    NotFound = 3,

    /// A stored value failed template substitution.
    SubstitutionFailed = 4,

    /// Reading or writing a file failed.
    IoError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

/// Failures raised by command handlers themselves.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("no {kind} value for '{key}' in section [{section}]")]
    KeyNotFound {
        section: String,
        key: String,
        kind: &'static str,
    },

    #[error("'{value}' is not a valid {kind}")]
    InvalidValue { value: String, kind: &'static str },

    #[error("multiple values require --kind array")]
    MultipleValues,

    #[error("{} is not in canonical form (run `envini fmt` to rewrite it)", .0.display())]
    NotCanonical(PathBuf),
}

impl From<&anyhow::Error> for ExitCode {
    fn from(err: &anyhow::Error) -> Self {
        for cause in err.chain() {
            if let Some(ini) = cause.downcast_ref::<IniError>() {
                return match ini {
                    IniError::Syntax(_) => ExitCode::SyntaxError,
                    IniError::Substitution(_) => ExitCode::SubstitutionFailed,
                    IniError::Io(_) => ExitCode::IoError,
                    IniError::DotenvParse { .. }
                    | IniError::DotenvIo { .. }
                    | IniError::DotenvUnknown => ExitCode::GeneralError,
                };
            }
            if cause.is::<envini::SyntaxError>() {
                return ExitCode::SyntaxError;
            }
            if cause.is::<envini::SubstitutionError>() {
                return ExitCode::SubstitutionFailed;
            }
            if let Some(cmd) = cause.downcast_ref::<CommandError>() {
                return match cmd {
                    CommandError::KeyNotFound { .. } => ExitCode::NotFound,
                    _ => ExitCode::GeneralError,
                };
            }
            if cause.is::<std::io::Error>() {
                return ExitCode::IoError;
            }
        }
        ExitCode::GeneralError
    }
}
