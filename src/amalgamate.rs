//! Single-header amalgamation.
//!
//! Produces the distributable artifact by textually inlining every local
//! (quote-form) include directive found at or after the sentinel line into
//! one output file. Lines before the sentinel belong to a compatibility
//! region that keeps its includes untouched; system (angle-form) includes
//! are never resolved.
//!
//! Inlining is single-level: local includes inside inlined content are not
//! expanded. Amalgamated headers are expected to keep their nesting flat.

use crate::config::Config;
use crate::document::SourceDocument;
use crate::error::{HeaderPackError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const INCLUDE_TOKEN: &str = "#include";

/// Assembles the release artifact for one source header.
pub struct Amalgamator {
    source: PathBuf,
    resource_dir: PathBuf,
    artifact: PathBuf,
    sentinel: Option<String>,
}

impl Amalgamator {
    pub fn new(config: &Config) -> Self {
        Amalgamator {
            source: config.source_path(),
            resource_dir: config.resource_path(),
            artifact: config.artifact_path(),
            sentinel: config.sentinel.clone(),
        }
    }

    /// Path the assembled artifact is written to.
    pub fn artifact_path(&self) -> &Path {
        &self.artifact
    }

    /// Assembles the artifact and returns its path.
    ///
    /// Creates the working directory if absent, loads the source, inlines
    /// eligible includes in a single pass, and writes the joined result.
    /// On any failure no artifact survives: a stale or partially written
    /// output file is removed before the error is surfaced.
    pub fn assemble(&self) -> Result<PathBuf> {
        if let Some(dir) = self.artifact.parent() {
            fs::create_dir_all(dir)?;
        }

        let doc = SourceDocument::load(&self.source)?;
        let lines = match self.render(doc.lines()) {
            Ok(lines) => lines,
            Err(e) => {
                let _ = self.cleanup();
                return Err(e);
            }
        };

        if let Err(e) = SourceDocument::from_lines(lines).write_to(&self.artifact) {
            let _ = self.cleanup();
            return Err(e);
        }
        Ok(self.artifact.clone())
    }

    /// Removes the artifact after the release step has consumed it.
    ///
    /// A missing artifact is not an error.
    pub fn cleanup(&self) -> Result<()> {
        if self.artifact.exists() {
            fs::remove_file(&self.artifact)?;
        }
        Ok(())
    }

    /// Single left-to-right pass over the source lines.
    ///
    /// No recursion into inserted content: inlined blocks are emitted
    /// as-is, even if they contain further include directives.
    fn render(&self, lines: &[String]) -> Result<Vec<String>> {
        let sentinel_idx = match &self.sentinel {
            Some(name) => lines
                .iter()
                .position(|l| l.contains(name.as_str()))
                // no sentinel line means no exclusion zone
                .unwrap_or(0),
            None => 0,
        };

        let mut out = Vec::with_capacity(lines.len());
        for (i, line) in lines.iter().enumerate() {
            let is_local_include =
                i >= sentinel_idx && line.contains(INCLUDE_TOKEN) && !line.contains('<');
            if is_local_include {
                out.push(self.inline_include(line)?);
            } else {
                out.push(line.clone());
            }
        }
        Ok(out)
    }

    /// Replaces one local include line with the indented contents of the
    /// referenced file.
    ///
    /// Every inserted line is prefixed with the text preceding the include
    /// token (normally indentation); lines that were blank in the resource
    /// stay truly empty rather than carrying the prefix, and trailing
    /// whitespace is stripped from the block as a whole.
    fn inline_include(&self, line: &str) -> Result<String> {
        let (prefix, rest) = match line.split_once(INCLUDE_TOKEN) {
            Some(parts) => parts,
            None => return Ok(line.to_string()),
        };
        let name = rest.trim().replace('"', "");
        let path = self.resource_dir.join(&name);

        let content = fs::read_to_string(&path).map_err(|e| {
            HeaderPackError::missing_include(format!("{}: {}", path.display(), e))
        })?;

        let block = content
            .split('\n')
            .map(|l| {
                if l.is_empty() {
                    String::new()
                } else {
                    format!("{}{}", prefix, l)
                }
            })
            .collect::<Vec<_>>()
            .join("\n");

        Ok(block.trim_end().to_string())
    }
}
