//! CLI command implementations.
//!
//! Each handler receives an already-loaded `IniFile` and writes its result
//! to stdout. Handlers that modify the document also write it back.

pub mod fmt;
pub mod get;
pub mod remove;
pub mod sections;
pub mod set;
pub mod show;

use anyhow::{Context, Result};
use std::path::Path;

use envini::IniFile;

/// Write `file` back to `path` in canonical form.
pub(crate) fn save(file: &IniFile, path: &Path) -> Result<()> {
    file.write_path(path)
        .with_context(|| format!("Failed to write {}", path.display()))
}
