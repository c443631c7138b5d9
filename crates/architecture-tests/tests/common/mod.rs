//! Source discovery shared by the architecture tests.
//!
//! Invariants:
//! - Paths are resolved from this crate's manifest, never from the current directory.
//! - `target/` and this crate's own sources are never scanned, since they
//!   contain the very patterns the checks look for.

use std::path::{Path, PathBuf};

/// The workspace root (two levels above this crate).
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("architecture-tests lives at crates/architecture-tests")
        .to_path_buf()
}

/// Every `.rs` file under `crates/`, sorted for stable reporting.
pub fn rust_sources() -> Vec<PathBuf> {
    let crates_dir = workspace_root().join("crates");
    assert!(
        crates_dir.is_dir(),
        "crates/ directory not found at {}",
        crates_dir.display()
    );

    let mut files: Vec<PathBuf> = walkdir::WalkDir::new(&crates_dir)
        .into_iter()
        .filter_entry(|e| {
            let name = e.file_name();
            name != "target" && name != "architecture-tests"
        })
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|p| p.extension().is_some_and(|ext| ext == "rs"))
        .collect();
    files.sort();
    files
}

/// `path` relative to the workspace root, for messages.
pub fn display_relative(path: &Path) -> String {
    let root = workspace_root();
    path.strip_prefix(&root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
