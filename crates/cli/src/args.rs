//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment variables.
//! - Provide config path resolution helpers.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envini")]
#[command(about = "Read and edit INI configuration with environment overrides", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envini -f app.ini get db host\n  envini -f app.ini --env-prefix APP get db replicas --kind array\n  envini -f app.ini set db port 5432 --kind int\n  envini -f app.ini --substitute show --format json\n  envini -f app.ini fmt --check\n"
)]
pub struct Cli {
    /// INI file to operate on (defaults to the per-user config directory)
    #[arg(short, long, global = true, env = "ENVINI_FILE", value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Enable environment overrides named PREFIX_SECTION_KEY
    #[arg(long, global = true, env = "ENVINI_ENV_PREFIX", value_name = "PREFIX")]
    pub env_prefix: Option<String>,

    /// Expand `{{ Env.NAME }}` templates in stored values after loading
    #[arg(long, global = true)]
    pub substitute: bool,

    /// Emit logs as JSON on stderr
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the effective value of a key
    Get {
        /// Section name (use "" for the global section)
        section: String,
        /// Option name
        key: String,
        /// How to interpret the value
        #[arg(long, value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Store a value and write the file back
    Set {
        /// Section name (use "" for the global section)
        section: String,
        /// Option name
        key: String,
        /// Value to store; several values are allowed with `--kind array`
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,
        /// How to store the value
        #[arg(long, value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,
    },

    /// Remove a key, or a whole section when no key is given
    Remove {
        /// Section name (use "" for the global section)
        section: String,
        /// Option name; omit to remove the section
        key: Option<String>,
    },

    /// List section names in sorted order
    Sections {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Print the stored document
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Ini)]
        format: OutputFormat,
    },

    /// Rewrite the file in canonical order
    Fmt {
        /// Only check; exit non-zero if the file is not canonical
        #[arg(long)]
        check: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    Bool,
    Array,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Ini,
    Json,
}

/// Returns the default path to the configuration file.
///
/// - Linux: `~/.config/envini/config.ini`
/// - macOS: `~/Library/Application Support/envini/config.ini`
/// - Windows: `%AppData%\envini\config\config.ini`
pub fn default_config_path() -> anyhow::Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("", "", "envini")
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join("config.ini"))
}

impl Cli {
    /// The file given on the command line, or the default location.
    ///
    /// Blank values fall back to the default.
    pub fn resolve_file(&self) -> anyhow::Result<PathBuf> {
        match &self.file {
            Some(path) if !path.to_string_lossy().trim().is_empty() => Ok(path.clone()),
            _ => default_config_path(),
        }
    }
}
