//! Line-oriented INI parser.
//!
//! Responsibilities:
//! - Classify each line as a section header, scalar assignment or array
//!   assignment, skipping blanks and comments.
//! - Fold the resulting events into an `IniFile`.
//!
//! Does NOT handle:
//! - Opening files (see `IniFile::load_path`).
//!
//! Invariants:
//! - Shapes are tried in order: array assignment, scalar assignment, header.
//! - Line numbers are 1-based and count every physical line.
//! - The first unrecognised line stops the parse; earlier lines stay applied.

use std::borrow::Cow;
use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{IniError, SyntaxError};
use crate::file::IniFile;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[(.*)\]$").expect("section pattern is valid"));
static ARRAY_ASSIGN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([^=\[\]]+)\[\][^=]*=(.*)$").expect("array pattern is valid")
});
static ASSIGN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^=]+)=(.*)$").expect("assignment pattern is valid"));
static QUOTED_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"^(['"])(.*)(['"])$"#).expect("quote pattern is valid"));

/// What a single line means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// Blank or comment line.
    Skip,
    Section(String),
    Scalar { key: String, value: String },
    Array { key: String, value: String },
}

/// Classify one raw line. Returns `None` when the line has no valid shape.
pub fn classify_line(raw: &str) -> Option<LineEvent> {
    let line = raw.trim();
    if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
        return Some(LineEvent::Skip);
    }

    if let Some(caps) = ARRAY_ASSIGN_RE.captures(line) {
        return Some(LineEvent::Array {
            key: caps[1].trim().to_string(),
            value: unquote(&caps[2]).to_string(),
        });
    }
    if let Some(caps) = ASSIGN_RE.captures(line) {
        return Some(LineEvent::Scalar {
            key: caps[1].trim().to_string(),
            value: unquote(&caps[2]).to_string(),
        });
    }
    if let Some(caps) = SECTION_RE.captures(line) {
        return Some(LineEvent::Section(caps[1].trim().to_string()));
    }
    None
}

/// Trim a value and drop one pair of matching outer quotes.
pub fn unquote(raw: &str) -> &str {
    let trimmed = raw.trim();
    match QUOTED_RE.captures(trimmed) {
        Some(caps) if caps[1] == caps[3] => caps.get(2).map_or(trimmed, |m| m.as_str()),
        _ => trimmed,
    }
}

/// Parse every line of `reader` into `file`.
///
/// Values land in the global section until the first header. Read errors
/// are returned unchanged. Bytes that are not valid UTF-8 are decoded
/// lossily, so they never fail the read.
pub(crate) fn parse_into<R: BufRead>(mut reader: R, file: &mut IniFile) -> Result<(), IniError> {
    let mut section = String::new();
    let mut parsed_lines = 0usize;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = decode_line(&buf);
        parsed_lines += 1;
        let line_number = parsed_lines;

        match classify_line(&line) {
            Some(LineEvent::Skip) => {}
            Some(LineEvent::Array { key, value }) => {
                file.section_mut(&section).push_arr(key, value);
            }
            Some(LineEvent::Scalar { key, value }) => {
                file.section_mut(&section).set(key, value);
            }
            Some(LineEvent::Section(name)) => {
                file.section_mut(&name);
                tracing::debug!(line = line_number, section = %name, "Entered section");
                section = name;
            }
            None => {
                let err = SyntaxError {
                    line: line_number,
                    text: line.trim().to_string(),
                };
                tracing::debug!(line = line_number, "Rejected line with invalid syntax");
                return Err(err.into());
            }
        }
    }

    tracing::debug!(lines = parsed_lines, "Parsed INI input");
    Ok(())
}

/// One physical line without its `\n` or `\r\n` terminator.
fn decode_line(raw: &[u8]) -> Cow<'_, str> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw)
}
