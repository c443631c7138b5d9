//! Remove command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use envini::IniFile;

/// Remove `key` from `section`, or the whole section when `key` is `None`,
/// and save the file.
pub fn run(file: &mut IniFile, path: &Path, section: &str, key: Option<&str>) -> Result<()> {
    match key {
        Some(key) => {
            file.remove(section, key);
            info!(path = %path.display(), section, key, "Removed key");
        }
        None => {
            file.remove_section(section);
            info!(path = %path.display(), section, "Removed section");
        }
    }
    super::save(file, path)
}
