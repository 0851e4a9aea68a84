//! The browsing session and copy/navigate state machine

use crate::capabilities::{FileViewer, Notifier, PreviewSource};
use entry_view::{present_listing, Entry};
use fs_gateway::{FileGateway, GatewayError, SandboxPath};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors surfaced by session operations
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Copy destinations must be folders
    ///
    /// A pure guard: it touches neither the backend nor any session state.
    #[error("copy destinations must be folders")]
    InvalidCopyTarget,

    /// Only files can be marked for copying
    #[error("folders cannot be copied")]
    FolderCopyUnsupported,

    /// No copy is pending
    #[error("no entry is marked for copying")]
    ClipboardEmpty,

    /// Folder name was empty or whitespace-only
    #[error("folder name must not be empty")]
    EmptyName,

    /// A gateway operation failed
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// The pending copy source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardSlot {
    /// The marked file entry
    pub entry: Entry,
    /// The folder that was current when the entry was marked
    pub source_folder: SandboxPath,
}

/// What a [`BrowserSession::select`] dispatch did
///
/// Returned so an embedding UI can mirror the outcome (e.g. push a route
/// for `Navigated`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The session switched into the given folder
    Navigated(SandboxPath),
    /// A file was handed to the viewer
    Opened,
    /// The pending copy landed in the selected folder
    CopyFinished,
}

/// One browsing session over a sandboxed document root
///
/// The session issues gateway calls one at a time and awaits each before
/// processing the next event; `&mut self` on every mutating operation makes
/// concurrent in-flight mutation unrepresentable.
pub struct BrowserSession {
    gateway: Arc<dyn FileGateway>,
    viewer: Arc<dyn FileViewer>,
    notifier: Arc<dyn Notifier>,
    current_folder: SandboxPath,
    listing: Vec<Entry>,
    clipboard: Option<ClipboardSlot>,
}

impl BrowserSession {
    /// Creates a session rooted at the sandbox root
    ///
    /// The listing is empty until [`Self::initialize`] runs.
    pub fn new(
        gateway: Arc<dyn FileGateway>,
        viewer: Arc<dyn FileViewer>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            gateway,
            viewer,
            notifier,
            current_folder: SandboxPath::root(),
            listing: Vec::new(),
            clipboard: None,
        }
    }

    /// The folder the session is currently browsing
    pub fn current_folder(&self) -> &SandboxPath {
        &self.current_folder
    }

    /// The displayed listing
    pub fn listing(&self) -> &[Entry] {
        &self.listing
    }

    /// The pending copy source, if any
    pub fn clipboard(&self) -> Option<&ClipboardSlot> {
        self.clipboard.as_ref()
    }

    /// Enters `folder` and refreshes the listing
    pub async fn initialize(&mut self, folder: SandboxPath) -> Result<(), BrowserError> {
        self.current_folder = folder;
        self.refresh().await
    }

    /// Re-reads the current folder and replaces the listing
    ///
    /// The listing is replaced atomically: observers never see it
    /// partially updated. On failure (e.g. the folder was deleted
    /// out-of-band) the error propagates and the previous listing is
    /// retained; the session stays usable for navigating elsewhere.
    pub async fn refresh(&mut self) -> Result<(), BrowserError> {
        let raw = self.gateway.list(&self.current_folder).await?;
        self.listing = present_listing(&raw);
        Ok(())
    }

    /// Creates a folder named `name` in the current folder
    ///
    /// Refreshes on success only; an `AlreadyExists` failure is surfaced
    /// without mutating local state.
    pub async fn create_folder(&mut self, name: &str) -> Result<(), BrowserError> {
        if name.trim().is_empty() {
            return Err(BrowserError::EmptyName);
        }
        let path = self.current_folder.join(name).map_err(GatewayError::from)?;
        self.gateway.create_directory(&path).await?;
        debug!(folder = %path, "created folder");
        self.refresh().await
    }

    /// Asks the notifier for a folder name, then creates the folder
    ///
    /// A cancelled or blank prompt is a silent no-op.
    pub async fn create_folder_prompted(&mut self) -> Result<(), BrowserError> {
        let Some(name) = self.notifier.prompt_folder_name().await else {
            return Ok(());
        };
        if name.trim().is_empty() {
            return Ok(());
        }
        self.create_folder(name.trim()).await
    }

    /// Imports a file into the current folder
    ///
    /// Best-effort by design: a backend write failure is logged and shown
    /// to the user, but the listing is still refreshed so the UI reflects
    /// whatever partial state resulted, and the call reports success.
    pub async fn add_file(&mut self, name: &str, bytes: &[u8]) -> Result<(), BrowserError> {
        let path = self.current_folder.join(name).map_err(GatewayError::from)?;
        if let Err(e) = self.gateway.write_file(&path, bytes).await {
            warn!(file = %path, error = %e, "file import failed");
            self.notifier
                .notify(&format!("Could not import {}: {}", name, e))
                .await;
        }
        self.refresh().await
    }

    /// Central dispatch for activating a listing entry
    ///
    /// With a pending copy, a folder finishes the copy and a file is
    /// rejected. Otherwise a file opens and a folder navigates.
    pub async fn select(&mut self, entry: &Entry) -> Result<SelectOutcome, BrowserError> {
        if self.clipboard.is_some() {
            if entry.is_file {
                self.notifier
                    .notify("Please select a folder for your operation")
                    .await;
                return Err(BrowserError::InvalidCopyTarget);
            }
            self.finish_copy(entry).await?;
            return Ok(SelectOutcome::CopyFinished);
        }

        if entry.is_file {
            self.open_file(entry).await?;
            return Ok(SelectOutcome::Opened);
        }

        let next = self
            .current_folder
            .join(&entry.name)
            .map_err(GatewayError::from)?;
        self.initialize(next.clone()).await?;
        Ok(SelectOutcome::Navigated(next))
    }

    /// Marks a file as the pending copy source
    ///
    /// Captures the current folder alongside the entry so the copy still
    /// works after navigating elsewhere. Folder copy is not supported.
    pub fn start_copy(&mut self, entry: &Entry) -> Result<(), BrowserError> {
        if !entry.is_file {
            return Err(BrowserError::FolderCopyUnsupported);
        }
        self.clipboard = Some(ClipboardSlot {
            entry: entry.clone(),
            source_folder: self.current_folder.clone(),
        });
        Ok(())
    }

    /// Copies the pending file into the selected folder
    ///
    /// On success the clipboard is cleared; on failure it is preserved so
    /// the user can retry against a different target. The listing is
    /// refreshed either way.
    pub async fn finish_copy(&mut self, target: &Entry) -> Result<(), BrowserError> {
        if target.is_file {
            return Err(BrowserError::InvalidCopyTarget);
        }
        let slot = self
            .clipboard
            .as_ref()
            .ok_or(BrowserError::ClipboardEmpty)?
            .clone();

        let source = slot
            .source_folder
            .join(&slot.entry.name)
            .map_err(GatewayError::from)?;
        let destination = self
            .current_folder
            .join(&target.name)
            .and_then(|p| p.join(&slot.entry.name))
            .map_err(GatewayError::from)?;

        let from = self.gateway.resolve_locator(&source).await?;
        let to = self.gateway.resolve_locator(&destination).await?;

        match self.gateway.copy(&from, &to).await {
            Ok(()) => {
                debug!(from = %source, to = %destination, "copy finished");
                self.clipboard = None;
                self.refresh().await
            }
            Err(e) => {
                warn!(from = %source, to = %destination, error = %e, "copy failed");
                self.notifier.notify(&format!("Copy failed: {}", e)).await;
                if let Err(refresh_err) = self.refresh().await {
                    warn!(error = %refresh_err, "refresh after failed copy also failed");
                }
                Err(e.into())
            }
        }
    }

    /// Deletes an entry; folders are removed recursively
    ///
    /// The listing is refreshed whether or not the delete succeeded, so a
    /// partial deletion is visible immediately.
    pub async fn delete(&mut self, entry: &Entry) -> Result<(), BrowserError> {
        let path = self
            .current_folder
            .join(&entry.name)
            .map_err(GatewayError::from)?;
        let outcome = if entry.is_file {
            self.gateway.delete_file(&path).await
        } else {
            self.gateway.delete_directory(&path, true).await
        };
        match outcome {
            Ok(()) => self.refresh().await,
            Err(e) => {
                warn!(entry = %path, error = %e, "delete failed");
                self.notifier
                    .notify(&format!("Could not delete {}: {}", entry.name, e))
                    .await;
                if let Err(refresh_err) = self.refresh().await {
                    warn!(error = %refresh_err, "refresh after failed delete also failed");
                }
                Err(e.into())
            }
        }
    }

    /// Hands a file in the current folder to the viewer
    ///
    /// Viewer failures are logged, never propagated.
    pub async fn open_file(&self, entry: &Entry) -> Result<(), BrowserError> {
        let path = self
            .current_folder
            .join(&entry.name)
            .map_err(GatewayError::from)?;
        let locator = self.gateway.resolve_locator(&path).await?;
        if let Err(e) = self
            .viewer
            .preview(&entry.name, PreviewSource::Locator(locator))
            .await
        {
            warn!(file = %path, error = %e, "viewer could not present file");
        }
        Ok(())
    }

    /// Reads the raw bytes of a file in the current folder
    ///
    /// For embedders that present files themselves (e.g. a download
    /// fallback on hosts without native preview).
    pub async fn read_entry(&self, entry: &Entry) -> Result<Vec<u8>, BrowserError> {
        let path = self
            .current_folder
            .join(&entry.name)
            .map_err(GatewayError::from)?;
        Ok(self.gateway.read_file(&path).await?)
    }
}
