//! Capability interfaces consumed by the session
//!
//! Presentation concerns (native preview, alerts, toasts) live behind these
//! traits. The session calls them and awaits typed results instead of
//! embedding any rendering logic.

use async_trait::async_trait;
use fs_gateway::Locator;
use thiserror::Error;

/// What the viewer is given to present
#[derive(Debug)]
pub enum PreviewSource {
    /// A resolved gateway locator (native hosts)
    Locator(Locator),
    /// Raw file bytes (hosts without locator-based preview)
    Bytes(Vec<u8>),
}

/// Viewer failure
///
/// Previews are best-effort: the session logs this error, it is never
/// propagated to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("preview failed: {0}")]
pub struct PreviewError(pub String);

/// File preview capability
#[async_trait]
pub trait FileViewer: Send + Sync {
    /// Presents a file to the user
    async fn preview(&self, name: &str, source: PreviewSource) -> Result<(), PreviewError>;
}

/// User prompt and notification capability
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Fire-and-forget user-visible message
    async fn notify(&self, message: &str);

    /// Asks the user to name a new folder
    ///
    /// `None` means the user cancelled.
    async fn prompt_folder_name(&self) -> Option<String>;
}

/// Viewer that accepts every preview and shows nothing
///
/// For tests and headless embedders.
pub struct NoopViewer;

#[async_trait]
impl FileViewer for NoopViewer {
    async fn preview(&self, _name: &str, _source: PreviewSource) -> Result<(), PreviewError> {
        Ok(())
    }
}

/// Notifier that drops messages and cancels every prompt
pub struct SilentNotifier;

#[async_trait]
impl Notifier for SilentNotifier {
    async fn notify(&self, _message: &str) {}

    async fn prompt_folder_name(&self) -> Option<String> {
        None
    }
}
