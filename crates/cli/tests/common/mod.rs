//! Shared test utilities for envini integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory that prevents dotenv loading.
//! - Provide a helper that writes a fixture INI file into a temp directory.
//!
//! Invariants / Assumptions:
//! - All integration tests using this helper will be hermetic by default.
//! - `ENVINI_*` variables from the host never reach the command.

use assert_cmd::Command;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a hermetic `envini` command for integration testing.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `ENVINI_FILE` and `ENVINI_ENV_PREFIX` are cleared.
pub fn envini_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envini");

    // Hermeticity: prevent loading local .env
    cmd.env("DOTENV_DISABLED", "1");

    // Clear potential host leakage
    cmd.env_remove("ENVINI_FILE")
        .env_remove("ENVINI_ENV_PREFIX")
        .env_remove("RUST_LOG");

    cmd
}

/// Writes `contents` to `app.ini` inside a fresh temp directory.
///
/// The directory is returned so it outlives the test body.
#[allow(dead_code)]
pub fn fixture(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("app.ini");
    std::fs::write(&path, contents).expect("write fixture");
    (dir, path)
}

/// A document exercising every value shape.
#[allow(dead_code)]
pub const SAMPLE: &str = "\
; sample configuration
name = demo

[db]
host = localhost
port = 5432
ssl = yes
replica[] = r1
replica[] = r2

[paths]
home = \"{{ Env.ENVINI_TEST_HOME }}\"
";
