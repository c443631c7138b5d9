//! Sections command implementation.

use anyhow::Result;
use std::io::Write;

use envini::IniFile;

use crate::args::OutputFormat;

/// Display name used for the global section in text output.
pub const GLOBAL_LABEL: &str = "(global)";

pub fn run(file: &IniFile, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    let mut names = file.sections();
    names.sort_unstable();

    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(&names)?)?;
        }
        OutputFormat::Text | OutputFormat::Ini => {
            for name in &names {
                let label = if name.is_empty() { GLOBAL_LABEL } else { name };
                writeln!(out, "{label}")?;
            }
        }
    }
    Ok(())
}
