use crate::error::Result;
use std::fs;
use std::path::Path;

/// A source file held in memory as an ordered sequence of lines.
///
/// Documents are value objects: every transformation reads the whole file,
/// produces a new line sequence, and writes the whole file back. Splitting
/// and joining both use `\n`, so a trailing newline in the file is preserved
/// as a trailing empty line segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    lines: Vec<String>,
}

impl SourceDocument {
    /// Builds a document from raw text.
    pub fn from_text(text: &str) -> Self {
        SourceDocument {
            lines: text.split('\n').map(|l| l.to_string()).collect(),
        }
    }

    /// Builds a document from an already-split line sequence.
    pub fn from_lines(lines: Vec<String>) -> Self {
        SourceDocument { lines }
    }

    /// Reads a document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(SourceDocument::from_text(&fs::read_to_string(path)?))
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Joins the lines back into the full file text.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    /// Persists the full document content to `path`.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, self.text())?;
        Ok(())
    }
}
