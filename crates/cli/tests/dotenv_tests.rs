//! Integration tests for `.env` handling in the CLI.
//!
//! Responsibilities:
//! - Prove that `.env` values reach both clap defaults and overrides.
//! - Prove that invalid `.env` files cause the CLI to fail at startup.
//! - Ensure DOTENV_DISABLED=1 allows the CLI to skip a malformed `.env`.
//!
//! Invariants:
//! - Tests must explicitly clear `DOTENV_DISABLED` to enable dotenv loading.
//! - Tests use temp directories and set current_dir to isolate `.env` file effects.

mod common;

use common::{SAMPLE, envini_cmd};
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn workspace_with(dotenv: &str) -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.ini"), SAMPLE).unwrap();
    fs::write(dir.path().join(".env"), dotenv).unwrap();
    dir
}

#[test]
fn test_dotenv_supplies_prefix_and_override() {
    let dir = workspace_with("ENVINI_ENV_PREFIX=APP\nAPP_DB_HOST=from-dotenv\n");

    envini_cmd()
        .current_dir(dir.path())
        .env_remove("DOTENV_DISABLED")
        .env_remove("APP_DB_HOST")
        .args(["-f", "app.ini", "get", "db", "host"])
        .assert()
        .success()
        .stdout("from-dotenv\n");
}

#[test]
fn test_invalid_dotenv_causes_cli_failure() {
    let dir = workspace_with("INVALID_LINE_WITHOUT_EQUALS");

    envini_cmd()
        .current_dir(dir.path())
        .env_remove("DOTENV_DISABLED")
        .args(["-f", "app.ini", "sections"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(".env"));
}

#[test]
fn test_dotenv_disabled_skips_malformed_file() {
    let dir = workspace_with("INVALID_LINE_WITHOUT_EQUALS");

    envini_cmd()
        .current_dir(dir.path())
        .args(["-f", "app.ini", "sections"])
        .assert()
        .success();
}
