use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Represents the complete configuration for headerpack.
///
/// Describes which header file carries the version markers, where the
/// assembled artifact goes, and how includes are resolved.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the header file carrying version markers and includes.
    #[serde(default = "default_source")]
    pub source: String,

    /// Directory where the assembled artifact is written.
    #[serde(default = "default_workdir")]
    pub workdir: String,

    /// File name of the assembled artifact (defaults to the source file name).
    #[serde(default)]
    pub output: Option<String>,

    /// Base directory for resolving local includes (defaults to the
    /// source file's parent directory).
    #[serde(default)]
    pub resource_dir: Option<String>,

    /// File name whose first mention delimits the inlining region.
    /// Includes at or before this line are left untouched.
    #[serde(default)]
    pub sentinel: Option<String>,

    #[serde(default)]
    pub markers: MarkersConfig,
}

fn default_source() -> String {
    "code/library.h".to_string()
}

fn default_workdir() -> String {
    "deploy".to_string()
}

/// Marker keywords used to locate the four version fields in the source.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct MarkersConfig {
    #[serde(default = "default_major_keyword")]
    pub major: String,

    #[serde(default = "default_minor_keyword")]
    pub minor: String,

    #[serde(default = "default_patch_keyword")]
    pub patch: String,

    #[serde(default = "default_pre_keyword")]
    pub pre: String,
}

fn default_major_keyword() -> String {
    "VERSION_MAJOR".to_string()
}

fn default_minor_keyword() -> String {
    "VERSION_MINOR".to_string()
}

fn default_patch_keyword() -> String {
    "VERSION_PATCH".to_string()
}

fn default_pre_keyword() -> String {
    "VERSION_PRE".to_string()
}

impl Default for MarkersConfig {
    fn default() -> Self {
        MarkersConfig {
            major: default_major_keyword(),
            minor: default_minor_keyword(),
            patch: default_patch_keyword(),
            pre: default_pre_keyword(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: default_source(),
            workdir: default_workdir(),
            output: None,
            resource_dir: None,
            sentinel: None,
            markers: MarkersConfig::default(),
        }
    }
}

impl Config {
    /// Path of the source header file.
    pub fn source_path(&self) -> PathBuf {
        PathBuf::from(&self.source)
    }

    /// Base directory local includes are resolved against.
    pub fn resource_path(&self) -> PathBuf {
        match &self.resource_dir {
            Some(dir) => PathBuf::from(dir),
            None => self
                .source_path()
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    /// Full path of the assembled artifact.
    pub fn artifact_path(&self) -> PathBuf {
        let name = match &self.output {
            Some(name) => name.clone(),
            None => self
                .source_path()
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| "out.h".to_string()),
        };
        PathBuf::from(&self.workdir).join(name)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `headerpack.toml` in current directory
/// 3. `~/.config/.headerpack.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config, Box<dyn std::error::Error>> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./headerpack.toml").exists() {
        fs::read_to_string("./headerpack.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".headerpack.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}
