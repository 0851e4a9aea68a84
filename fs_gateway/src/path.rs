//! Sandbox-relative path model
//!
//! Paths are slash-separated and relative to the sandbox root; the empty
//! path denotes the root itself. All construction goes through parsing and
//! joining APIs, so a path never carries leading, trailing or doubled
//! slashes and never contains `.` or `..` components.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Errors that can occur while parsing or joining sandbox paths
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Path contains an empty or relative (`.`/`..`) component
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Name is not usable as a single path segment
    #[error("Invalid entry name: {0:?}")]
    InvalidName(String),
}

/// A validated path relative to the sandbox root
///
/// # Path Convention
///
/// - Root of the sandbox: empty string `""`
/// - Entry in the root: `"a.txt"`
/// - Nested entry: `"docs/notes/a.txt"`
/// - No leading or trailing slashes
#[derive(
    Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct SandboxPath(String);

impl SandboxPath {
    /// Returns the sandbox root path
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Parses a path string
    ///
    /// Only the empty string parses to the root. Leading and trailing
    /// slashes are rejected, not normalized away, so an absolute-looking
    /// path can never sneak through a deserialization boundary. Empty,
    /// `.` and `..` components are rejected.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Ok(Self::root());
        }
        if raw.starts_with('/') || raw.ends_with('/') {
            return Err(PathError::InvalidPath(raw.to_string()));
        }
        for component in raw.split('/') {
            if !is_valid_name(component) {
                return Err(PathError::InvalidPath(raw.to_string()));
            }
        }
        Ok(Self(raw.to_string()))
    }

    /// Appends a single entry name to this path
    ///
    /// Fails if `name` is empty, `.`, `..`, or contains `/` or NUL. This is
    /// the only way child paths are built, which rules out the double-slash
    /// bugs of ad hoc string concatenation.
    pub fn join(&self, name: &str) -> Result<Self, PathError> {
        if !is_valid_name(name) {
            return Err(PathError::InvalidName(name.to_string()));
        }
        if self.0.is_empty() {
            Ok(Self(name.to_string()))
        } else {
            Ok(Self(format!("{}/{}", self.0, name)))
        }
    }

    /// Returns the parent path
    ///
    /// The parent of the root and of single-segment paths is the root.
    pub fn parent(&self) -> Self {
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Self(parent.to_string()),
            None => Self::root(),
        }
    }

    /// Returns the final path segment, or `None` for the root
    pub fn file_name(&self) -> Option<&str> {
        if self.0.is_empty() {
            return None;
        }
        Some(match self.0.rsplit_once('/') {
            Some((_, name)) => name,
            None => self.0.as_str(),
        })
    }

    /// Iterates over the path segments (empty for the root)
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Returns true if this path is the sandbox root
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the path as a slash-separated string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SandboxPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "/")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

impl TryFrom<String> for SandboxPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SandboxPath> for String {
    fn from(path: SandboxPath) -> Self {
        path.0
    }
}

/// Validates a single entry name
///
/// Returns true if the name is usable as one path segment.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/') && !name.contains('\0')
}
