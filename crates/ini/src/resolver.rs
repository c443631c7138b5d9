//! Environment-variable overrides for stored values.
//!
//! Responsibilities:
//! - Resolve the effective scalar or array for a key against an `EnvSource`.
//!
//! Does NOT handle:
//! - Rewriting stored values (see `template.rs`); resolution is read-only.
//!
//! Invariants:
//! - A set scalar override wins outright, stored value or not.
//! - An array override is atomic: the `[]` sentinel or an indexed run replaces
//!   the stored array, it is never merged with it.
//! - Indexed runs start at `_0`, or at `_1` when `_0` is unset, and stop at the
//!   first unset index.

use crate::env::{EnvSource, binding_name};

/// Literal value that overrides an array to empty.
pub const EMPTY_ARRAY_SENTINEL: &str = "[]";

/// Resolves overrides for one prefix against one environment.
#[derive(Debug, Clone, Copy)]
pub struct OverrideResolver<'a> {
    prefix: &'a str,
    env: &'a dyn EnvSource,
}

impl<'a> OverrideResolver<'a> {
    pub fn new(prefix: &'a str, env: &'a dyn EnvSource) -> Self {
        Self { prefix, env }
    }

    /// Override for a scalar, if its variable is set.
    pub fn scalar(&self, section: &str, key: &str) -> Option<String> {
        let name = binding_name(self.prefix, section, key);
        let value = self.env.lookup(&name)?;
        tracing::debug!(var = %name, section, key, "Environment override applied");
        Some(value)
    }

    /// Override for an array, if the sentinel or an indexed run is set.
    pub fn array(&self, section: &str, key: &str) -> Option<Vec<String>> {
        let base = binding_name(self.prefix, section, key);

        if self.env.lookup(&base).as_deref() == Some(EMPTY_ARRAY_SENTINEL) {
            tracing::debug!(var = %base, section, key, "Array overridden to empty");
            return Some(Vec::new());
        }

        let start = [0usize, 1]
            .into_iter()
            .find(|i| self.env.lookup(&indexed_name(&base, *i)).is_some())?;

        let values: Vec<String> = (start..)
            .map_while(|i| self.env.lookup(&indexed_name(&base, i)))
            .collect();
        tracing::debug!(
            var = %base,
            section,
            key,
            count = values.len(),
            "Array overridden from indexed variables"
        );
        Some(values)
    }
}

fn indexed_name(base: &str, index: usize) -> String {
    format!("{base}_{index}")
}
