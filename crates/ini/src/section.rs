//! A single named group of options.
//!
//! Responsibilities:
//! - Store scalar and array values in two independent namespaces.
//! - Provide raw typed accessors over the stored values.
//!
//! Does NOT handle:
//! - Environment overrides (see `resolver.rs`); these accessors only ever see
//!   what was parsed or set.
//!
//! Invariants:
//! - A key may hold a scalar and an array at the same time.
//! - `set_*` replaces an entry wholesale; only `push_arr` appends.

use std::collections::{BTreeMap, HashMap};

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::lookup::{Lookup, format_bool, parse_bool, parse_int};

/// Scalar and array values belonging to one section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    scalars: HashMap<String, String>,
    arrays: HashMap<String, Vec<String>>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    /// All scalar values, unordered.
    pub fn scalars(&self) -> &HashMap<String, String> {
        &self.scalars
    }

    /// All array values, unordered by key; elements keep their stored order.
    pub fn arrays(&self) -> &HashMap<String, Vec<String>> {
        &self.arrays
    }

    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty() && self.arrays.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.scalars.get(key).map(String::as_str)
    }

    pub fn get_int(&self, key: &str) -> Option<i64> {
        self.lookup_int(key).ok()
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.lookup_bool(key).ok()
    }

    pub fn lookup_int(&self, key: &str) -> Lookup<i64> {
        Lookup::from_raw(self.get(key).map(str::to_owned), parse_int)
    }

    pub fn lookup_bool(&self, key: &str) -> Lookup<bool> {
        Lookup::from_raw(self.get(key).map(str::to_owned), parse_bool)
    }

    pub fn get_arr(&self, key: &str) -> Option<&[String]> {
        self.arrays.get(key).map(Vec::as_slice)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> bool {
        self.scalars.insert(key.into(), value.into());
        true
    }

    pub fn set_int(&mut self, key: impl Into<String>, value: i64) -> bool {
        self.set(key, value.to_string())
    }

    pub fn set_bool(&mut self, key: impl Into<String>, value: bool) -> bool {
        self.set(key, format_bool(value))
    }

    /// Replace the whole array stored under `key`.
    pub fn set_arr<I, S>(&mut self, key: impl Into<String>, values: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.arrays
            .insert(key.into(), values.into_iter().map(Into::into).collect());
        true
    }

    /// Append one element, creating the array if needed.
    pub(crate) fn push_arr(&mut self, key: String, value: String) {
        self.arrays.entry(key).or_default().push(value);
    }

    /// Remove `key` from both namespaces.
    pub fn remove(&mut self, key: &str) {
        self.scalars.remove(key);
        self.arrays.remove(key);
    }

    pub(crate) fn scalars_mut(&mut self) -> &mut HashMap<String, String> {
        &mut self.scalars
    }

    pub(crate) fn arrays_mut(&mut self) -> &mut HashMap<String, Vec<String>> {
        &mut self.arrays
    }

    pub(crate) fn sorted_scalars(&self) -> Vec<(&str, &str)> {
        let mut entries: Vec<_> = self
            .scalars
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }

    pub(crate) fn sorted_arrays(&self) -> Vec<(&str, &[String])> {
        let mut entries: Vec<_> = self
            .arrays
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let scalars: BTreeMap<_, _> = self.scalars.iter().collect();
        let arrays: BTreeMap<_, _> = self.arrays.iter().collect();
        let mut state = serializer.serialize_struct("Section", 2)?;
        state.serialize_field("values", &scalars)?;
        state.serialize_field("arrays", &arrays)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_and_array_namespaces_are_independent() {
        let mut section = Section::new();
        section.set("foo", "baz");
        section.push_arr("foo".to_string(), "fox".to_string());
        section.push_arr("foo".to_string(), "bar".to_string());

        assert_eq!(section.get("foo"), Some("baz"));
        assert_eq!(
            section.get_arr("foo"),
            Some(&["fox".to_string(), "bar".to_string()][..])
        );
    }

    #[test]
    fn test_set_arr_replaces_instead_of_appending() {
        let mut section = Section::new();
        section.push_arr("hosts".to_string(), "a".to_string());
        assert!(section.set_arr("hosts", ["b", "c"]));
        assert_eq!(
            section.get_arr("hosts"),
            Some(&["b".to_string(), "c".to_string()][..])
        );
    }

    #[test]
    fn test_typed_setters_store_canonical_strings() {
        let mut section = Section::new();
        assert!(section.set_int("port", -8080));
        assert!(section.set_bool("tls", true));
        assert!(section.set_bool("debug", false));

        assert_eq!(section.get("port"), Some("-8080"));
        assert_eq!(section.get("tls"), Some("true"));
        assert_eq!(section.get("debug"), Some("false"));
        assert_eq!(section.get_int("port"), Some(-8080));
        assert_eq!(section.get_bool("tls"), Some(true));
    }

    #[test]
    fn test_remove_clears_both_namespaces_and_tolerates_absence() {
        let mut section = Section::new();
        section.set("foo", "1");
        section.set_arr("foo", ["x"]);
        section.remove("foo");
        section.remove("never-set");

        assert_eq!(section.get("foo"), None);
        assert_eq!(section.get_arr("foo"), None);
        assert!(section.is_empty());
    }

    #[test]
    fn test_sorted_views_order_keys_but_not_elements() {
        let mut section = Section::new();
        section.set("z", "1");
        section.set("a", "2");
        section.set_arr("list", ["z", "a", "m"]);

        assert_eq!(section.sorted_scalars(), vec![("a", "2"), ("z", "1")]);
        let arrays = section.sorted_arrays();
        assert_eq!(arrays[0].1, &["z", "a", "m"]);
    }

    #[test]
    fn test_serializes_with_sorted_keys() {
        let mut section = Section::new();
        section.set("b", "2");
        section.set("a", "1");
        section.set_arr("list", ["y", "x"]);

        let json = serde_json::to_string(&section).unwrap();
        assert_eq!(
            json,
            r#"{"values":{"a":"1","b":"2"},"arrays":{"list":["y","x"]}}"#
        );
    }
}
