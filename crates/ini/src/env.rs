//! Environment access for overrides and template substitution.
//!
//! Responsibilities:
//! - Define the `EnvSource` seam used by the resolver and the substitution pass.
//! - Provide the process-environment and in-memory implementations.
//! - Build override variable names from section and key.
//! - Load an optional `.env` file into the process environment.
//!
//! Does NOT handle:
//! - Deciding which value wins (see `resolver.rs`).
//!
//! Invariants:
//! - The resolver and substitution pass never read `std::env` directly.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

use std::collections::HashMap;

use crate::error::IniError;

/// A read-only view over named string variables.
pub trait EnvSource: std::fmt::Debug + Send + Sync {
    /// Value of `name`, or `None` when it is unset.
    fn lookup(&self, name: &str) -> Option<String>;

    /// Every variable currently visible.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }

    /// Variables whose name or value is not valid Unicode are skipped.
    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }
}

/// A fixed set of variables, for tests and embedding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.insert(name.into(), value.into());
        self
    }
}

impl<K, V> FromIterator<(K, V)> for MapEnv
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            vars: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl EnvSource for MapEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        self.vars.get(name).cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Name of the variable that overrides `key` in `section`.
///
/// Joins the prefix (if any), the upper-cased section name (omitted for the
/// global section) and the upper-cased key with `_`:
/// `("APP", "db", "host")` becomes `APP_DB_HOST`.
pub fn binding_name(prefix: &str, section: &str, key: &str) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(3);
    if !prefix.is_empty() {
        parts.push(prefix.to_string());
    }
    if !section.is_empty() {
        parts.push(section.to_uppercase());
    }
    parts.push(key.to_uppercase());
    parts.join("_")
}

/// Check if dotenv loading is disabled via environment variable.
fn dotenv_disabled() -> bool {
    matches!(
        std::env::var("DOTENV_DISABLED").ok().as_deref(),
        Some("true") | Some("1")
    )
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load a `.env` file from the current directory (or its parents) into the
/// process environment so overrides can see it.
///
/// If `DOTENV_DISABLED` is "true" or "1", nothing is loaded. A missing file
/// is not an error.
///
/// # Errors
///
/// Returns an error if the `.env` file exists but cannot be read or parsed.
pub fn load_dotenv() -> Result<(), IniError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(IniError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(IniError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(IniError::DotenvUnknown),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_binding_name_with_prefix_and_section() {
        assert_eq!(binding_name("APP", "db", "host"), "APP_DB_HOST");
    }

    #[test]
    fn test_binding_name_omits_empty_segments() {
        assert_eq!(binding_name("APP", "", "global1"), "APP_GLOBAL1");
        assert_eq!(binding_name("", "db", "host"), "DB_HOST");
        assert_eq!(binding_name("", "", "host"), "HOST");
    }

    #[test]
    fn test_binding_name_keeps_prefix_case() {
        assert_eq!(binding_name("Go_Ini", "test2", "value_int"), "Go_Ini_TEST2_VALUE_INT");
    }

    #[test]
    fn test_map_env_lookup_and_vars() {
        let env: MapEnv = [("A", "1"), ("B", "2")].into_iter().collect();
        assert_eq!(env.lookup("A").as_deref(), Some("1"));
        assert_eq!(env.lookup("C"), None);

        let mut vars = env.vars();
        vars.sort();
        assert_eq!(
            vars,
            vec![
                ("A".to_string(), "1".to_string()),
                ("B".to_string(), "2".to_string())
            ]
        );
    }

    #[test]
    #[serial]
    fn test_process_env_reads_live_environment() {
        let key = "_ENVINI_TEST_PROCESS_ENV";
        temp_env::with_vars([(key, Some("live"))], || {
            assert_eq!(ProcessEnv.lookup(key).as_deref(), Some("live"));
            assert!(ProcessEnv.vars().iter().any(|(k, v)| k == key && v == "live"));
        });
        temp_env::with_vars([(key, None::<&str>)], || {
            assert_eq!(ProcessEnv.lookup(key), None);
        });
    }

    #[test]
    #[serial]
    fn test_load_dotenv_respects_disable_flag() {
        temp_env::with_vars([("DOTENV_DISABLED", Some("1"))], || {
            assert!(load_dotenv().is_ok());
        });
        temp_env::with_vars([("DOTENV_DISABLED", Some("true"))], || {
            assert!(load_dotenv().is_ok());
        });
    }
}
