use crate::error::{HeaderPackError, Result};
use std::fmt;

/// Semantic version with an optional prerelease tag.
///
/// Follows the `MAJOR.MINOR.PATCH[-PRERELEASE]` format where the prerelease
/// tag is restricted to lowercase alphanumerics and dots (e.g. "beta.2").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre: Option<String>,
}

impl Version {
    /// Creates a new Version without a prerelease tag.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Creates a new Version with a prerelease tag.
    ///
    /// An empty tag is normalized to no prerelease.
    pub fn with_pre(major: u32, minor: u32, patch: u32, pre: &str) -> Self {
        Version {
            major,
            minor,
            patch,
            pre: if pre.is_empty() {
                None
            } else {
                Some(pre.to_string())
            },
        }
    }

    /// Parses a version string of the form `MAJOR.MINOR.PATCH[-PRERELEASE]`.
    ///
    /// The string is split on the first `-` into a base and an optional
    /// prerelease tag. The base must decompose into exactly three
    /// non-negative integers. A missing or empty prerelease segment means
    /// no prerelease (so `"1.2.3-"` parses the same as `"1.2.3"`).
    ///
    /// # Returns
    /// * `Ok(Version)` - Successfully parsed version
    /// * `Err` - If the base is not exactly three integer components, or the
    ///   prerelease tag contains characters outside `[a-z0-9.]`
    pub fn parse(s: &str) -> Result<Self> {
        let (base, pre) = match s.split_once('-') {
            Some((base, pre)) => (base, pre),
            None => (s, ""),
        };

        let parts: Vec<&str> = base.split('.').collect();
        if parts.len() != 3 {
            return Err(HeaderPackError::version(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                s
            )));
        }

        let major = parts[0]
            .parse::<u32>()
            .map_err(|_| HeaderPackError::version(format!("Invalid major version: {}", parts[0])))?;
        let minor = parts[1]
            .parse::<u32>()
            .map_err(|_| HeaderPackError::version(format!("Invalid minor version: {}", parts[1])))?;
        let patch = parts[2]
            .parse::<u32>()
            .map_err(|_| HeaderPackError::version(format!("Invalid patch version: {}", parts[2])))?;

        if !is_valid_pre(pre) {
            return Err(HeaderPackError::version(format!(
                "Invalid prerelease tag: '{}' - only [a-z0-9.] allowed",
                pre
            )));
        }

        Ok(Version::with_pre(major, minor, patch, pre))
    }

    /// The prerelease tag as stored in the marker line ("" when absent).
    pub fn pre_str(&self) -> &str {
        self.pre.as_deref().unwrap_or("")
    }
}

/// Checks a prerelease tag against the allowed `[a-z0-9.]*` charset.
pub fn is_valid_pre(pre: &str) -> bool {
    pre.chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '.')
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}
