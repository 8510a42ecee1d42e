//! Error types for configuration files and directory walking.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for system operations.
pub type SystemResult<T> = Result<T, SystemError>;

/// Errors from the configuration store and directory parser.
#[derive(Debug, Error)]
pub enum SystemError {
    /// I/O error reading or writing a file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse or emit error.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Malformed glob pattern.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// Directory to parse does not exist.
    #[error("directory not found: {path}")]
    DirectoryNotFound {
        /// Directory that was requested.
        path: PathBuf,
    },

    /// Section path with an empty or reserved component.
    #[error("invalid section path: '{0}'")]
    InvalidPath(String),
}

impl SystemError {
    /// Creates an invalid section path error.
    pub fn invalid_path(path: impl Into<String>) -> Self {
        Self::InvalidPath(path.into())
    }

    /// True for failures of the underlying file system.
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(_) | Self::DirectoryNotFound { .. })
    }

    /// True when file contents could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Yaml(_))
    }
}
