//! Set command implementation.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use envini::IniFile;
use envini::lookup::{parse_bool, parse_int};

use crate::args::ValueKind;
use crate::error::CommandError;

/// Store `values` under `key` according to `kind` and save the file.
pub fn run(
    file: &mut IniFile,
    path: &Path,
    section: &str,
    key: &str,
    values: &[String],
    kind: ValueKind,
) -> Result<()> {
    apply(file, section, key, values, kind)?;
    super::save(file, path)?;
    info!(path = %path.display(), section, key, "Stored value");
    Ok(())
}

fn apply(
    file: &mut IniFile,
    section: &str,
    key: &str,
    values: &[String],
    kind: ValueKind,
) -> Result<(), CommandError> {
    let single = || match values {
        [value] => Ok(value),
        _ => Err(CommandError::MultipleValues),
    };

    match kind {
        ValueKind::Array => {
            file.set_arr(section, key, values.iter().cloned());
        }
        ValueKind::String => {
            file.set(section, key, single()?.clone());
        }
        ValueKind::Int => {
            let value = single()?;
            let parsed = parse_int(value).ok_or_else(|| CommandError::InvalidValue {
                value: value.clone(),
                kind: "integer",
            })?;
            file.set_int(section, key, parsed);
        }
        ValueKind::Bool => {
            let value = single()?;
            let parsed = parse_bool(value).ok_or_else(|| CommandError::InvalidValue {
                value: value.clone(),
                kind: "boolean",
            })?;
            file.set_bool(section, key, parsed);
        }
    }
    Ok(())
}
