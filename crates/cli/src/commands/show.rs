//! Show command implementation.

use anyhow::Result;
use std::io::Write;

use envini::IniFile;

use crate::args::OutputFormat;

/// Print the stored document. Environment overrides never appear here.
pub fn run(file: &IniFile, format: OutputFormat, out: &mut impl Write) -> Result<()> {
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(file)?)?;
        }
        OutputFormat::Ini | OutputFormat::Text => {
            file.write_to(out)?;
        }
    }
    Ok(())
}
