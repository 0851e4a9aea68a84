//! # Entry Presenter
//!
//! Formats raw gateway entries into the minimal display records handed to
//! a UI layer.
//!
//! ## Philosophy
//!
//! Presentation is a pure, total function: no side effects, no failure
//! cases. Anything the backend could not classify as a plain file is shown
//! as not-a-file, so the browser only ever distinguishes "file" from
//! "everything you can navigate into or ignore".

use fs_gateway::{EntryKind, RawEntry};
use serde::{Deserialize, Serialize};

/// A display-ready entry
///
/// `is_file` is mutually exclusive with "is a folder"; the record is
/// derived on every listing refresh and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry name, unique within its folder
    pub name: String,
    /// File / not-a-file classification
    pub is_file: bool,
}

impl Entry {
    /// Creates an entry record
    pub fn new(name: impl Into<String>, is_file: bool) -> Self {
        Self {
            name: name.into(),
            is_file,
        }
    }
}

/// Presents a raw gateway entry as a display record
///
/// Only [`EntryKind::File`] classifies as a file; directories and unknown
/// kinds do not.
pub fn present(raw: &RawEntry) -> Entry {
    Entry {
        name: raw.name.clone(),
        is_file: raw.kind == EntryKind::File,
    }
}

/// Presents a whole listing
pub fn present_listing(raw: &[RawEntry]) -> Vec<Entry> {
    raw.iter().map(present).collect()
}
