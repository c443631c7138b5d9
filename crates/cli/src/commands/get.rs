//! Get command implementation.

use anyhow::Result;
use std::io::Write;

use envini::{IniFile, Lookup};

use crate::args::ValueKind;
use crate::error::CommandError;

pub fn run(
    file: &mut IniFile,
    section: &str,
    key: &str,
    kind: ValueKind,
    out: &mut impl Write,
) -> Result<()> {
    match kind {
        ValueKind::String => {
            let value = file
                .get(section, key)
                .ok_or_else(|| not_found(section, key, "string"))?;
            writeln!(out, "{value}")?;
        }
        ValueKind::Int => match file.lookup_int(section, key) {
            Lookup::Found(value) => writeln!(out, "{value}")?,
            Lookup::Unparseable(raw) => {
                return Err(CommandError::InvalidValue {
                    value: raw,
                    kind: "integer",
                }
                .into());
            }
            Lookup::Absent => return Err(not_found(section, key, "integer").into()),
        },
        ValueKind::Bool => match file.lookup_bool(section, key) {
            Lookup::Found(value) => writeln!(out, "{value}")?,
            Lookup::Unparseable(raw) => {
                return Err(CommandError::InvalidValue {
                    value: raw,
                    kind: "boolean",
                }
                .into());
            }
            Lookup::Absent => return Err(not_found(section, key, "boolean").into()),
        },
        ValueKind::Array => {
            let values = file
                .get_arr(section, key)
                .ok_or_else(|| not_found(section, key, "array"))?;
            for value in values {
                writeln!(out, "{value}")?;
            }
        }
    }
    Ok(())
}

fn not_found(section: &str, key: &str, kind: &'static str) -> CommandError {
    CommandError::KeyNotFound {
        section: section.to_string(),
        key: key.to_string(),
        kind,
    }
}
