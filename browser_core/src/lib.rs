//! # Browser Core
//!
//! The single-directory-at-a-time browsing session: current folder,
//! listing, and the two-step copy state machine.
//!
//! ## Philosophy
//!
//! - **One owner for all state**: a [`BrowserSession`] exclusively owns its
//!   current folder, listing and clipboard; nothing is process-global, so
//!   independent sessions can coexist
//! - **Capabilities, not embedded UI**: previews, prompts and toasts are
//!   consumed through traits; the session never renders anything
//! - **Honest state**: every mutation is followed by a refresh, so the
//!   displayed listing diverges from the backend for at most one operation
//!
//! ## Clipboard state machine
//!
//! `Empty --start_copy(file)--> Holding --finish_copy(ok)--> Empty`, and
//! `Holding --finish_copy(err)--> Holding`. The clipboard survives
//! navigation (copy into a nested folder is the point of the workflow);
//! only a successful copy clears it. There is deliberately no cancel
//! affordance.

pub mod capabilities;
pub mod session;

pub use capabilities::{FileViewer, Notifier, NoopViewer, PreviewError, PreviewSource, SilentNotifier};
pub use session::{BrowserError, BrowserSession, ClipboardSlot, SelectOutcome};
