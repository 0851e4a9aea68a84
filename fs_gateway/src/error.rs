//! Gateway error taxonomy
//!
//! Every backend maps its native failures into this closed set so callers
//! can react to error kinds instead of backend-specific strings.

use crate::path::PathError;
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Path parsing or joining failed
    #[error("Path error: {0}")]
    Path(#[from] PathError),

    /// No entry exists at the path
    #[error("Not found: {0}")]
    NotFound(String),

    /// A directory was required but the path names a file
    #[error("Not a directory: {0}")]
    NotADirectory(String),

    /// A file was required but the path names a directory
    #[error("Is a directory: {0}")]
    IsADirectory(String),

    /// An entry already exists at the path
    #[error("Already exists: {0}")]
    AlreadyExists(String),

    /// Non-recursive deletion of a directory that still has entries
    #[error("Directory not empty: {0}")]
    DirectoryNotEmpty(String),

    /// Backend failure that fits no structured kind
    #[error("Backend error: {0}")]
    Backend(String),
}

impl GatewayError {
    /// Maps an I/O error into the taxonomy, falling back to [`Self::Backend`]
    pub(crate) fn from_io(path: &str, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_string()),
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists(path.to_string()),
            _ => Self::Backend(format!("{}: {}", path, err)),
        }
    }
}
