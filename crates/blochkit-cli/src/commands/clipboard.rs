//! Clipboard targets available from the terminal.

use std::fs;
use std::path::PathBuf;

use blochkit_engine::{Clipboard, ClipboardError};

/// Writes copied code to a file, replacing its contents.
#[derive(Debug, Clone)]
pub struct FileClipboard {
    path: PathBuf,
}

impl FileClipboard {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Clipboard for FileClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        fs::write(&self.path, text)?;
        Ok(())
    }
}

/// Stand-in used when no copy target was configured. Always fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoClipboard;

impl Clipboard for NoClipboard {
    fn write_text(&mut self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::Unavailable(
            "no copy target configured (use --copy-to)".into(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_clipboard_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("code.py");
        let mut clipboard = FileClipboard::new(&path);
        clipboard.write_text("first").unwrap();
        clipboard.write_text("second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
    }

    #[test]
    fn test_file_clipboard_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let mut clipboard = FileClipboard::new(dir.path().join("missing").join("code.py"));
        assert!(matches!(
            clipboard.write_text("x"),
            Err(ClipboardError::Io(_))
        ));
    }

    #[test]
    fn test_no_clipboard_fails() {
        assert!(NoClipboard.write_text("x").is_err());
    }
}
