//! The filesystem gateway capability trait
//!
//! This module defines the contract every storage backend implements. The
//! gateway is stateless: it holds no notion of a current folder, clipboard
//! or listing. All operations are scoped under a single sandbox root.

use crate::error::GatewayError;
use crate::path::SandboxPath;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Classification of a raw backend entry
///
/// The vocabulary is deliberately closed: anything a backend cannot identify
/// as a plain file or directory (symlinks, devices, unknown kinds) is
/// normalized to [`EntryKind::Other`] rather than propagated as ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Regular file
    File,
    /// Directory
    Directory,
    /// Anything else the backend reports
    Other,
}

/// One filesystem object as reported by a gateway listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntry {
    /// Entry name, unique within its parent directory
    pub name: String,
    /// Entry classification
    pub kind: EntryKind,
}

impl RawEntry {
    /// Creates a new raw entry
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Opaque stable reference to a gateway entry
///
/// Produced by [`FileGateway::resolve_locator`] and consumed by
/// [`FileGateway::copy`]. Callers never inspect its contents; resolution
/// does not verify that the entry exists (a vanished source surfaces as
/// [`GatewayError::NotFound`] from `copy`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locator {
    path: SandboxPath,
}

impl Locator {
    pub(crate) fn new(path: SandboxPath) -> Self {
        Self { path }
    }

    pub(crate) fn path(&self) -> &SandboxPath {
        &self.path
    }
}

/// Filesystem gateway capability
///
/// All operations are asynchronous and may suspend the caller while the
/// backend performs I/O. Error kinds are part of the contract and verified
/// by the cross-backend tests in `contract_tests`.
#[async_trait]
pub trait FileGateway: Send + Sync {
    /// Lists the entries of a directory
    ///
    /// Fails with [`GatewayError::NotFound`] if the path does not exist and
    /// [`GatewayError::NotADirectory`] if it names a file.
    async fn list(&self, path: &SandboxPath) -> Result<Vec<RawEntry>, GatewayError>;

    /// Creates a directory, including missing intermediate segments
    ///
    /// Fails with [`GatewayError::AlreadyExists`] if any entry already
    /// exists at the final path.
    async fn create_directory(&self, path: &SandboxPath) -> Result<(), GatewayError>;

    /// Reads the full contents of a file
    ///
    /// Fails with [`GatewayError::NotFound`] or [`GatewayError::IsADirectory`].
    async fn read_file(&self, path: &SandboxPath) -> Result<Vec<u8>, GatewayError>;

    /// Writes a file, overwriting any existing file at the path
    ///
    /// Fails with [`GatewayError::IsADirectory`] if the path names an
    /// existing directory and [`GatewayError::NotFound`] if the parent
    /// folder is missing.
    async fn write_file(&self, path: &SandboxPath, bytes: &[u8]) -> Result<(), GatewayError>;

    /// Deletes a file
    ///
    /// Fails with [`GatewayError::NotFound`] or [`GatewayError::IsADirectory`].
    async fn delete_file(&self, path: &SandboxPath) -> Result<(), GatewayError>;

    /// Deletes a directory
    ///
    /// Recursive deletion removes all descendant entries and is
    /// irreversible; confirmation is a UI concern, not a gateway concern.
    /// Fails with [`GatewayError::NotFound`], [`GatewayError::NotADirectory`],
    /// or, when `recursive` is false and entries remain,
    /// [`GatewayError::DirectoryNotEmpty`].
    async fn delete_directory(
        &self,
        path: &SandboxPath,
        recursive: bool,
    ) -> Result<(), GatewayError>;

    /// Resolves a path into an opaque locator usable by [`Self::copy`]
    async fn resolve_locator(&self, path: &SandboxPath) -> Result<Locator, GatewayError>;

    /// Copies the entry at `from` to `to`
    ///
    /// Fails with [`GatewayError::NotFound`] if the source has vanished.
    /// Destination-exists policy is backend-defined; both shipped backends
    /// overwrite an existing destination file.
    async fn copy(&self, from: &Locator, to: &Locator) -> Result<(), GatewayError>;
}
