//! The in-memory configuration store.
//!
//! Responsibilities:
//! - Own every section and materialize sections on first reference.
//! - Expose section-qualified getters and setters.
//! - Route reads through the override resolver when overrides are enabled.
//!
//! Does NOT handle:
//! - Text parsing (see `parser.rs`) or rendering (see `serializer.rs`).
//! - Template expansion (see `template.rs`).
//!
//! Invariants:
//! - Every accessor goes through `section_mut`, so any referenced section exists.
//! - Overrides are off until `enable_env_overrides` is called.
//! - Equality compares sections only, not override settings or environment.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::env::{EnvSource, ProcessEnv};
use crate::lookup::{Lookup, parse_bool, parse_int};
use crate::resolver::OverrideResolver;
use crate::section::Section;

/// A parsed INI document plus its override settings.
#[derive(Clone)]
pub struct IniFile {
    sections: HashMap<String, Section>,
    override_prefix: Option<String>,
    env: Arc<dyn EnvSource>,
    pub(crate) snapshot: Option<Cursor<Vec<u8>>>,
}

impl Default for IniFile {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for IniFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IniFile")
            .field("sections", &self.sections)
            .field("override_prefix", &self.override_prefix)
            .field("env", &self.env)
            .finish_non_exhaustive()
    }
}

impl PartialEq for IniFile {
    fn eq(&self, other: &Self) -> bool {
        self.sections == other.sections
    }
}

impl Eq for IniFile {}

impl IniFile {
    /// An empty file reading overrides from the process environment.
    pub fn new() -> Self {
        Self::with_env(ProcessEnv)
    }

    /// An empty file reading overrides and substitutions from `env`.
    pub fn with_env(env: impl EnvSource + 'static) -> Self {
        Self {
            sections: HashMap::new(),
            override_prefix: None,
            env: Arc::new(env),
            snapshot: None,
        }
    }

    /// Swap the environment used by overrides and substitution.
    pub fn set_env(&mut self, env: impl EnvSource + 'static) {
        self.env = Arc::new(env);
    }

    pub fn env(&self) -> &dyn EnvSource {
        self.env.as_ref()
    }

    /// Make environment variables named `PREFIX_SECTION_KEY` take precedence
    /// over stored values. An empty prefix drops the leading segment.
    pub fn enable_env_overrides(&mut self, prefix: impl Into<String>) {
        let prefix = prefix.into();
        tracing::debug!(prefix = %prefix, "Environment overrides enabled");
        self.override_prefix = Some(prefix);
    }

    pub fn disable_env_overrides(&mut self) {
        self.override_prefix = None;
    }

    pub fn env_overrides_enabled(&self) -> bool {
        self.override_prefix.is_some()
    }

    pub fn env_override_prefix(&self) -> Option<&str> {
        self.override_prefix.as_deref()
    }

    fn resolver(&self) -> Option<OverrideResolver<'_>> {
        self.override_prefix
            .as_deref()
            .map(|prefix| OverrideResolver::new(prefix, self.env.as_ref()))
    }

    /// Get or create the named section.
    pub fn section_mut(&mut self, name: &str) -> &mut Section {
        self.sections.entry(name.to_string()).or_default()
    }

    /// The named section's stored values, creating it if needed.
    ///
    /// Overrides are not applied here; use the getters for effective values.
    pub fn section_values(&mut self, name: &str) -> &Section {
        self.section_mut(name)
    }

    /// Look at a section without materializing it.
    pub fn get_section(&self, name: &str) -> Option<&Section> {
        self.sections.get(name)
    }

    /// Names of every materialized section, unordered.
    pub fn sections(&self) -> Vec<String> {
        self.sections.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Effective scalar for `key`: the override when one is set, else the
    /// stored value.
    pub fn get(&mut self, section: &str, key: &str) -> Option<String> {
        self.section_mut(section);
        if let Some(value) = self.resolver().and_then(|r| r.scalar(section, key)) {
            return Some(value);
        }
        self.sections
            .get(section)
            .and_then(|s| s.get(key))
            .map(str::to_owned)
    }

    /// Effective scalar parsed as an integer. `None` when absent or unparseable.
    pub fn get_int(&mut self, section: &str, key: &str) -> Option<i64> {
        self.lookup_int(section, key).ok()
    }

    /// Effective scalar parsed as a boolean. `None` when absent or unparseable.
    pub fn get_bool(&mut self, section: &str, key: &str) -> Option<bool> {
        self.lookup_bool(section, key).ok()
    }

    pub fn lookup_int(&mut self, section: &str, key: &str) -> Lookup<i64> {
        Lookup::from_raw(self.get(section, key), parse_int)
    }

    pub fn lookup_bool(&mut self, section: &str, key: &str) -> Lookup<bool> {
        Lookup::from_raw(self.get(section, key), parse_bool)
    }

    /// Effective array for `key`: an environment override when one is set,
    /// else the stored array.
    pub fn get_arr(&mut self, section: &str, key: &str) -> Option<Vec<String>> {
        self.section_mut(section);
        if let Some(values) = self.resolver().and_then(|r| r.array(section, key)) {
            return Some(values);
        }
        self.sections
            .get(section)
            .and_then(|s| s.get_arr(key))
            .map(<[String]>::to_vec)
    }

    pub fn set(&mut self, section: &str, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.section_mut(section).set(key, value)
    }

    pub fn set_int(&mut self, section: &str, key: impl Into<String>, value: i64) -> bool {
        self.section_mut(section).set_int(key, value)
    }

    pub fn set_bool(&mut self, section: &str, key: impl Into<String>, value: bool) -> bool {
        self.section_mut(section).set_bool(key, value)
    }

    pub fn set_arr<I, S>(&mut self, section: &str, key: impl Into<String>, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.section_mut(section).set_arr(key, values)
    }

    /// Delete `key` from both namespaces of `section`.
    pub fn remove(&mut self, section: &str, key: &str) {
        self.section_mut(section).remove(key);
    }

    /// Delete a whole section. No-op when it does not exist.
    pub fn remove_section(&mut self, section: &str) {
        self.sections.remove(section);
    }

    /// Sections sorted by name.
    pub(crate) fn sorted_sections(&self) -> Vec<(&str, &Section)> {
        let mut entries: Vec<_> = self
            .sections
            .iter()
            .map(|(name, section)| (name.as_str(), section))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub(crate) fn sections_mut(&mut self) -> &mut HashMap<String, Section> {
        &mut self.sections
    }
}

impl Serialize for IniFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections = self.sorted_sections();
        let mut map = serializer.serialize_map(Some(sections.len()))?;
        for (name, section) in sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}
