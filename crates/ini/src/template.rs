//! Explicit template substitution over stored values.
//!
//! Responsibilities:
//! - Expand every stored scalar and array element with the template engine,
//!   binding the environment as `Env` (for example `{{ Env.HOME }}`).
//!
//! Does NOT handle:
//! - Live overrides at read time (see `resolver.rs`).
//!
//! Invariants:
//! - The pass is fail-fast and atomic: on the first failure nothing is
//!   rewritten and the error names the failing value.
//! - Values are visited in sorted order so the reported failure is stable.
//! - Only `{{ ... }}` expressions are rendered. Everything else, including
//!   `{%` and `{#`, is copied verbatim.
//! - Expanded text is not rendered again within the same pass. A later pass
//!   will expand any expression an environment value brought in.

use std::collections::BTreeMap;

use tera::{Context, Tera};

use crate::error::SubstitutionError;
use crate::file::IniFile;

/// Name the environment table is bound to inside templates.
pub const ENV_BINDING: &str = "Env";

const EXPR_OPEN: &str = "{{";
const EXPR_CLOSE: &str = "}}";

enum Target {
    Scalar,
    Element(usize),
}

struct Rewrite {
    section: String,
    key: String,
    target: Target,
    value: String,
}

impl IniFile {
    /// Rewrite stored values by expanding templates against the environment.
    ///
    /// Returns how many values changed. Overrides are not consulted; only
    /// stored values are rewritten.
    ///
    /// # Errors
    ///
    /// Returns a [`SubstitutionError`] for the first value that fails to
    /// expand. The store is left untouched in that case.
    pub fn substitute_env(&mut self) -> Result<usize, SubstitutionError> {
        let env: BTreeMap<String, String> = self.env().vars().into_iter().collect();
        let mut context = Context::new();
        context.insert(ENV_BINDING, &env);

        let mut rewrites = Vec::new();
        for (name, section) in self.sorted_sections() {
            for (key, value) in section.sorted_scalars() {
                if let Some(expanded) = expand(value, &context).map_err(|message| {
                    SubstitutionError {
                        section: name.to_string(),
                        key: key.to_string(),
                        index: None,
                        message,
                    }
                })? {
                    rewrites.push(Rewrite {
                        section: name.to_string(),
                        key: key.to_string(),
                        target: Target::Scalar,
                        value: expanded,
                    });
                }
            }
            for (key, values) in section.sorted_arrays() {
                for (index, value) in values.iter().enumerate() {
                    if let Some(expanded) = expand(value, &context).map_err(|message| {
                        SubstitutionError {
                            section: name.to_string(),
                            key: key.to_string(),
                            index: Some(index),
                            message,
                        }
                    })? {
                        rewrites.push(Rewrite {
                            section: name.to_string(),
                            key: key.to_string(),
                            target: Target::Element(index),
                            value: expanded,
                        });
                    }
                }
            }
        }

        let changed = rewrites.len();
        let sections = self.sections_mut();
        for rewrite in rewrites {
            let Some(section) = sections.get_mut(&rewrite.section) else {
                continue;
            };
            match rewrite.target {
                Target::Scalar => {
                    section.scalars_mut().insert(rewrite.key, rewrite.value);
                }
                Target::Element(index) => {
                    if let Some(slot) = section
                        .arrays_mut()
                        .get_mut(&rewrite.key)
                        .and_then(|values| values.get_mut(index))
                    {
                        *slot = rewrite.value;
                    }
                }
            }
        }

        tracing::info!(changed, "Template substitution complete");
        Ok(changed)
    }
}

/// Expand one value. `Ok(None)` means the value is unchanged.
///
/// Only `{{ ... }}` expressions are rendered; the text between them is copied
/// verbatim, so stray `{%` or `{#` never reach the engine.
fn expand(value: &str, context: &Context) -> Result<Option<String>, String> {
    if !value.contains(EXPR_OPEN) {
        return Ok(None);
    }

    let mut rendered = String::with_capacity(value.len());
    let mut rest = value;
    while let Some(start) = rest.find(EXPR_OPEN) {
        rendered.push_str(&rest[..start]);
        let expr = &rest[start..];
        // An unclosed expression is handed over whole so the engine reports it.
        let len = expr[EXPR_OPEN.len()..]
            .find(EXPR_CLOSE)
            .map_or(expr.len(), |end| EXPR_OPEN.len() + end + EXPR_CLOSE.len());
        rendered.push_str(&Tera::one_off(&expr[..len], context, false).map_err(|e| describe(&e))?);
        rest = &expr[len..];
    }
    rendered.push_str(rest);

    Ok((rendered != value).then_some(rendered))
}

/// Flatten the engine's error chain into one line.
fn describe(err: &tera::Error) -> String {
    let mut message = err.to_string();
    let mut source = std::error::Error::source(err);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
