use thiserror::Error;

/// Unified error type for headerpack operations
#[derive(Error, Debug)]
pub enum HeaderPackError {
    #[error("Version marker error: {0}")]
    Marker(String),

    #[error("Version parsing error: {0}")]
    Version(String),

    #[error("Missing include file: {0}")]
    MissingInclude(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in headerpack
pub type Result<T> = std::result::Result<T, HeaderPackError>;

impl HeaderPackError {
    /// Create a version marker error with context
    pub fn marker(msg: impl Into<String>) -> Self {
        HeaderPackError::Marker(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        HeaderPackError::Version(msg.into())
    }

    /// Create a missing include error with context
    pub fn missing_include(msg: impl Into<String>) -> Self {
        HeaderPackError::MissingInclude(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        HeaderPackError::Config(msg.into())
    }
}
