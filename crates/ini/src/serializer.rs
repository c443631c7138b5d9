//! Deterministic INI rendering.
//!
//! Responsibilities:
//! - Render an `IniFile` as canonical text.
//! - Offer a snapshot-based byte stream over that text (`std::io::Read`).
//!
//! Does NOT handle:
//! - Re-quoting values; values are written literally.
//!
//! Invariants:
//! - Sections, scalar keys and array keys are emitted in lexicographic order.
//! - Array elements keep their stored order.
//! - Each section ends with one blank line.
//! - A streaming read serializes once; `reset_reader` drops the snapshot.

use std::fmt;
use std::io::{self, Cursor, Read, Write};

use crate::file::IniFile;

impl IniFile {
    /// Write the canonical form to `out`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns any error from the underlying writer, unchanged.
    pub fn write_to<W: Write>(&self, mut out: W) -> io::Result<u64> {
        let text = self.to_ini_string();
        out.write_all(text.as_bytes())?;
        out.flush()?;
        Ok(text.len() as u64)
    }

    /// The canonical text form.
    pub fn to_ini_string(&self) -> String {
        let mut text = String::new();
        for (name, section) in self.sorted_sections() {
            text.push('[');
            text.push_str(name);
            text.push_str("]\n");
            for (key, value) in section.sorted_scalars() {
                text.push_str(key);
                text.push_str(" = ");
                text.push_str(value);
                text.push('\n');
            }
            for (key, values) in section.sorted_arrays() {
                for value in values {
                    text.push_str(key);
                    text.push_str(" []= ");
                    text.push_str(value);
                    text.push('\n');
                }
            }
            text.push('\n');
        }
        text
    }

    /// Discard the streaming snapshot so the next `read` re-serializes.
    pub fn reset_reader(&mut self) {
        self.snapshot = None;
    }
}

impl fmt::Display for IniFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_ini_string())
    }
}

/// Streams the canonical text as it was at the first `read` after creation
/// or after `reset_reader`.
impl Read for IniFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let snapshot = match self.snapshot.take() {
            Some(snapshot) => snapshot,
            None => Cursor::new(self.to_ini_string().into_bytes()),
        };
        let cursor = self.snapshot.insert(snapshot);
        cursor.read(buf)
    }
}
