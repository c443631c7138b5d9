//! Command dispatch logic.
//!
//! Responsibilities:
//! - Resolve the target file and load it.
//! - Apply the reading options (`--env-prefix`, `--substitute`).
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code selection (see `error` module).
//!
//! Invariants:
//! - Commands that write the file load it without substitution, so templates
//!   are preserved on disk.
//! - Only `set` may operate on a file that does not exist yet.

use anyhow::{Context, Result};
use std::io::Write;
use std::path::Path;

use envini::{IniError, IniFile};

use crate::args::{Cli, Commands};
use crate::commands;

/// How a command wants the document prepared before it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadMode {
    /// Overrides and substitution as requested on the command line.
    Effective,
    /// Stored values only; the file must exist.
    Stored,
    /// Stored values only; a missing file starts empty.
    StoredOrEmpty,
}

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let path = cli.resolve_file()?;

    match &cli.command {
        Commands::Get { section, key, kind } => {
            let mut file = load(cli, &path, LoadMode::Effective)?;
            commands::get::run(&mut file, section, key, *kind, out)?;
        }
        Commands::Set {
            section,
            key,
            values,
            kind,
        } => {
            let mut file = load(cli, &path, LoadMode::StoredOrEmpty)?;
            commands::set::run(&mut file, &path, section, key, values, *kind)?;
        }
        Commands::Remove { section, key } => {
            let mut file = load(cli, &path, LoadMode::Stored)?;
            commands::remove::run(&mut file, &path, section, key.as_deref())?;
        }
        Commands::Sections { format } => {
            let file = load(cli, &path, LoadMode::Stored)?;
            commands::sections::run(&file, *format, out)?;
        }
        Commands::Show { format } => {
            let file = load(cli, &path, LoadMode::Effective)?;
            commands::show::run(&file, *format, out)?;
        }
        Commands::Fmt { check } => {
            let file = load(cli, &path, LoadMode::Stored)?;
            commands::fmt::run(&file, &path, *check)?;
        }
    }

    Ok(())
}

fn load(cli: &Cli, path: &Path, mode: LoadMode) -> Result<IniFile> {
    let mut file = match IniFile::load_path(path) {
        Ok(file) => file,
        Err(IniError::Io(e))
            if mode == LoadMode::StoredOrEmpty && e.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::debug!(path = %path.display(), "File does not exist yet; starting empty");
            IniFile::new()
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load {}", path.display()));
        }
    };

    if mode != LoadMode::Effective {
        return Ok(file);
    }

    if let Some(prefix) = cli.env_prefix.as_deref() {
        file.enable_env_overrides(prefix);
    }
    if cli.substitute {
        file.substitute_env()
            .map_err(IniError::from)
            .with_context(|| format!("Failed to expand templates in {}", path.display()))?;
    }
    Ok(file)
}
