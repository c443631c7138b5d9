//! Typed conversions for scalar values.
//!
//! `get_int`/`get_bool` collapse "absent" and "present but unparseable" into
//! `None`. [`Lookup`] keeps the two apart for callers that need to tell them
//! apart without a second `get` call.

/// Outcome of a typed lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    /// No scalar is stored (or overridden) for the key.
    Absent,
    /// A scalar exists but does not parse as the requested type.
    Unparseable(String),
    /// The scalar parsed successfully.
    Found(T),
}

impl<T> Lookup<T> {
    /// Collapse to the `Option` returned by the plain typed getters.
    pub fn ok(self) -> Option<T> {
        match self {
            Lookup::Found(value) => Some(value),
            Lookup::Absent | Lookup::Unparseable(_) => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Lookup::Absent)
    }

    pub(crate) fn from_raw(raw: Option<String>, parse: impl FnOnce(&str) -> Option<T>) -> Self {
        match raw {
            None => Lookup::Absent,
            Some(raw) => match parse(&raw) {
                Some(value) => Lookup::Found(value),
                None => Lookup::Unparseable(raw),
            },
        }
    }
}

/// Parse a boolean the way INI files spell them.
///
/// Case-insensitive: `""`, `0`, `false`, `no` are false; `1`, `true`, `yes`
/// are true. Anything else is rejected.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "" | "0" | "false" | "no" => Some(false),
        "1" | "true" | "yes" => Some(true),
        _ => None,
    }
}

/// Parse a signed decimal integer. Leading zeros and an explicit sign are
/// accepted; hex, separators and fractions are not.
pub fn parse_int(raw: &str) -> Option<i64> {
    raw.parse().ok()
}

pub(crate) fn format_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}
