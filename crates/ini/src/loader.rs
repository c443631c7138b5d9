//! Entry points that move INI text in and out of an `IniFile`.
//!
//! Responsibilities:
//! - Build or extend a file from strings, readers and paths.
//! - Write the canonical form to a path.
//!
//! Does NOT handle:
//! - Line classification (see `parser.rs`) or rendering (see `serializer.rs`).
//!
//! Invariants:
//! - Loading into an existing file merges: scalars overwrite, arrays append.
//! - File open/create errors are returned unchanged.

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use crate::error::IniError;
use crate::file::IniFile;
use crate::parser::parse_into;

impl IniFile {
    /// Parse `text` into a new file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Syntax`] on the first unrecognised line.
    pub fn parse_str(text: &str) -> Result<Self, IniError> {
        Self::from_reader(text.as_bytes())
    }

    /// Parse everything `reader` yields into a new file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Syntax`] on the first unrecognised line, or the
    /// reader's own error.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, IniError> {
        let mut file = Self::new();
        file.read_from(reader)?;
        Ok(file)
    }

    /// Parse the file at `path` into a new file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be opened or read, and
    /// [`IniError::Syntax`] on the first unrecognised line.
    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, IniError> {
        let mut file = Self::new();
        file.read_path(path)?;
        Ok(file)
    }

    /// Merge more INI text into this file.
    ///
    /// Parsing restarts in the global section. Lines before a syntax error
    /// remain applied.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Syntax`] on the first unrecognised line, or the
    /// reader's own error.
    pub fn read_from<R: BufRead>(&mut self, reader: R) -> Result<(), IniError> {
        self.reset_reader();
        parse_into(reader, self)
    }

    /// Merge `text` into this file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Syntax`] on the first unrecognised line.
    pub fn load_str(&mut self, text: &str) -> Result<(), IniError> {
        self.read_from(text.as_bytes())
    }

    /// Merge the file at `path` into this file.
    ///
    /// # Errors
    ///
    /// Returns [`IniError::Io`] if the file cannot be opened or read, and
    /// [`IniError::Syntax`] on the first unrecognised line.
    pub fn read_path(&mut self, path: impl AsRef<Path>) -> Result<(), IniError> {
        let path = path.as_ref();
        let handle = fs::File::open(path)?;
        self.read_from(BufReader::new(handle))?;
        tracing::debug!(path = %path.display(), sections = self.len(), "Loaded INI file");
        Ok(())
    }

    /// Write the canonical form to `path`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns any error from creating the directory or writing the file.
    pub fn write_path(&self, path: impl AsRef<Path>) -> Result<(), IniError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_ini_string())?;
        tracing::debug!(path = %path.display(), "Wrote INI file");
        Ok(())
    }
}

impl FromStr for IniFile {
    type Err = IniError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mixed_document() {
        let src = r#"
  # Comments are ignored

  herp = derp

  [foo]
  hello=world
  whitespace should   =   not matter
  ; sneaky semicolon-style comment
  multiple = equals = signs
  quoted = "keeps # and ; inside "

  [bar]
  this = that"#;

        let mut file: IniFile = src.parse().unwrap();
        assert_eq!(file.get("", "herp").as_deref(), Some("derp"));
        assert_eq!(file.get("foo", "hello").as_deref(), Some("world"));
        assert_eq!(file.get("foo", "whitespace should").as_deref(), Some("not matter"));
        assert_eq!(file.get("foo", "multiple").as_deref(), Some("equals = signs"));
        assert_eq!(file.get("foo", "quoted").as_deref(), Some("keeps # and ; inside "));
        assert_eq!(file.get("bar", "this").as_deref(), Some("that"));
    }

    #[test]
    fn test_read_from_merges_into_existing_file() {
        let mut file = IniFile::parse_str("[foo]\nhello=world\nlist[]=a\n").unwrap();
        file.load_str("[foo]\ngoodbye=all\nlist[]=b\n[bar]\nother=data\n")
            .unwrap();

        assert_eq!(file.get("foo", "hello").as_deref(), Some("world"));
        assert_eq!(file.get("foo", "goodbye").as_deref(), Some("all"));
        assert_eq!(file.get("bar", "other").as_deref(), Some("data"));
        assert_eq!(
            file.get_arr("foo", "list"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_partial_merge_keeps_lines_before_error() {
        let mut file = IniFile::parse_str("[foo]\nhello=world\n").unwrap();
        let err = file
            .load_str("\n[foo]\ngoodbye=all\nherp?\nother=data\n")
            .unwrap_err();

        assert!(matches!(err, IniError::Syntax(ref e) if e.line == 4 && e.text == "herp?"));
        assert_eq!(file.get("foo", "hello").as_deref(), Some("world"));
        assert_eq!(file.get("foo", "goodbye").as_deref(), Some("all"));
        assert_eq!(file.get("foo", "other"), None);
    }

    #[test]
    fn test_load_path_passes_io_errors_through() {
        let dir = tempfile::tempdir().unwrap();
        let err = IniFile::load_path(dir.path().join("missing.ini")).unwrap_err();
        assert!(
            matches!(err, IniError::Io(ref e) if e.kind() == std::io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn test_write_path_then_load_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.ini");

        let mut file = IniFile::new();
        file.set("section1", "option1", "value1");
        file.set_int("section1", "option2", 2);
        file.set("section2", "option3", "value3");
        file.set("section2", "option4", "value4");
        file.write_path(&path).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "[section1]\noption1 = value1\noption2 = 2\n\n[section2]\noption3 = value3\noption4 = value4\n\n"
        );
        assert_eq!(IniFile::load_path(&path).unwrap(), file);
    }
}
