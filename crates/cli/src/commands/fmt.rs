//! Fmt command implementation.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

use envini::IniFile;

use crate::error::CommandError;

/// Rewrite `path` in canonical form, or with `check` only report whether it
/// already is.
pub fn run(file: &IniFile, path: &Path, check: bool) -> Result<()> {
    let current = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let canonical = file.to_ini_string();

    if current == canonical {
        info!(path = %path.display(), "Already canonical");
        return Ok(());
    }
    if check {
        return Err(CommandError::NotCanonical(path.to_path_buf()).into());
    }

    super::save(file, path)?;
    info!(path = %path.display(), "Rewrote file");
    Ok(())
}
