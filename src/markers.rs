//! Version marker storage inside a source header.
//!
//! The four version fields (major, minor, patch, prerelease) live as
//! distinct marker lines in the header, e.g.:
//!
//! ```c
//! #define MYLIB_VERSION_MAJOR 6
//! #define MYLIB_VERSION_MINOR 0
//! #define MYLIB_VERSION_PATCH 0
//! #define MYLIB_VERSION_PRE ""
//! ```
//!
//! A marker line is matched structurally: the keyword token, at least one
//! whitespace character, then a value token filling the rest of the line
//! (a bare integer, or a double-quoted `[a-z0-9.]*` string for the
//! prerelease). A keyword mention whose tail does not parse as a value,
//! such as the keyword used inside a macro invocation, is not a marker.

use crate::config::{Config, MarkersConfig};
use crate::document::SourceDocument;
use crate::error::{HeaderPackError, Result};
use crate::version::{is_valid_pre, Version};
use std::path::PathBuf;

/// Reads and rewrites the embedded version markers of one source header.
///
/// Both operations are whole-file transformations: read everything, locate
/// exactly one line per field, and (for `set`) write everything back with
/// only the four value tokens changed.
pub struct MarkerStore {
    source: PathBuf,
    markers: MarkersConfig,
}

impl MarkerStore {
    pub fn new(config: &Config) -> Self {
        MarkerStore {
            source: config.source_path(),
            markers: config.markers.clone(),
        }
    }

    /// Reads the current version from the source header.
    ///
    /// Fails with a marker error if any of the four fields is missing or
    /// appears on more than one line. An empty prerelease marker reads as
    /// no prerelease.
    pub fn get(&self) -> Result<Version> {
        let doc = SourceDocument::load(&self.source)?;
        let version = read_version(doc.lines(), &self.markers)?;
        Ok(version)
    }

    /// Rewrites the four marker lines to hold `version`.
    ///
    /// Every other line of the file stays byte-identical, and the marker
    /// lines keep everything up to and including the whitespace before the
    /// value token, so `set(get())` leaves the file unchanged. All markers
    /// are located before anything is written; on failure nothing is
    /// persisted.
    pub fn set(&self, version: &Version) -> Result<()> {
        let doc = SourceDocument::load(&self.source)?;
        let mut lines = doc.lines().to_vec();

        let major_idx = find_marker(&lines, &self.markers.major, numeric_value)?;
        let minor_idx = find_marker(&lines, &self.markers.minor, numeric_value)?;
        let patch_idx = find_marker(&lines, &self.markers.patch, numeric_value)?;
        let pre_idx = find_marker(&lines, &self.markers.pre, pre_value)?;

        lines[major_idx] = rewrite(&lines[major_idx], &self.markers.major, &version.major.to_string());
        lines[minor_idx] = rewrite(&lines[minor_idx], &self.markers.minor, &version.minor.to_string());
        lines[patch_idx] = rewrite(&lines[patch_idx], &self.markers.patch, &version.patch.to_string());
        lines[pre_idx] = rewrite(
            &lines[pre_idx],
            &self.markers.pre,
            &format!("\"{}\"", version.pre_str()),
        );

        SourceDocument::from_lines(lines).write_to(&self.source)
    }
}

/// Extracts all four fields from an in-memory line sequence.
pub fn read_version(lines: &[String], markers: &MarkersConfig) -> Result<Version> {
    let major = read_numeric(lines, &markers.major)?;
    let minor = read_numeric(lines, &markers.minor)?;
    let patch = read_numeric(lines, &markers.patch)?;

    let pre_idx = find_marker(lines, &markers.pre, pre_value)?;
    let (_, token) = split_marker(&lines[pre_idx], &markers.pre)
        .unwrap_or((0, ""));
    let pre = pre_value(token).unwrap_or_default();

    Ok(Version::with_pre(major, minor, patch, &pre))
}

fn read_numeric(lines: &[String], keyword: &str) -> Result<u32> {
    let idx = find_marker(lines, keyword, numeric_value)?;
    let (_, token) = split_marker(&lines[idx], keyword).unwrap_or((0, ""));
    numeric_value(token).ok_or_else(|| {
        HeaderPackError::marker(format!("Malformed {} marker", keyword))
    })
}

/// Finds the unique line index holding the marker for `keyword`.
///
/// `value_check` decides whether the token after the keyword is a valid
/// value for this field. Zero matching lines or more than one matching
/// line is an error.
fn find_marker<T>(
    lines: &[String],
    keyword: &str,
    value_check: impl Fn(&str) -> Option<T>,
) -> Result<usize> {
    let matches: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| {
            split_marker(line, keyword)
                .and_then(|(_, token)| value_check(token).map(|_| ()))
                .is_some()
        })
        .map(|(i, _)| i)
        .collect();

    match matches.len() {
        0 => Err(HeaderPackError::marker(format!(
            "{} marker not found",
            keyword
        ))),
        1 => Ok(matches[0]),
        n => Err(HeaderPackError::marker(format!(
            "{} marker appears on {} lines, expected exactly one",
            keyword, n
        ))),
    }
}

/// Splits a candidate marker line into (value start offset, value token).
///
/// Requires the keyword to be followed by at least one whitespace
/// character; the value token is the full remainder of the line.
fn split_marker<'a>(line: &'a str, keyword: &str) -> Option<(usize, &'a str)> {
    let kw_idx = line.find(keyword)?;
    let after_idx = kw_idx + keyword.len();
    let after = &line[after_idx..];
    let ws_len = after.len() - after.trim_start().len();
    if ws_len == 0 {
        return None;
    }
    let value_start = after_idx + ws_len;
    Some((value_start, &line[value_start..]))
}

fn numeric_value(token: &str) -> Option<u32> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    token.parse().ok()
}

fn pre_value(token: &str) -> Option<String> {
    let inner = token.strip_prefix('"')?.strip_suffix('"')?;
    if is_valid_pre(inner) {
        Some(inner.to_string())
    } else {
        None
    }
}

/// Replaces the value token of a marker line, keeping the prefix and the
/// original whitespace between keyword and value.
fn rewrite(line: &str, keyword: &str, value: &str) -> String {
    match split_marker(line, keyword) {
        Some((value_start, _)) => format!("{}{}", &line[..value_start], value),
        None => line.to_string(),
    }
}
