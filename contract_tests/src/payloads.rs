//! Wire payload pinning
//!
//! These tests freeze the JSON shapes that cross the embedding boundary.
//! A failure here means a UI host or persisted document would break.

use entry_view::Entry;
use fs_gateway::{EntryKind, RawEntry, SandboxPath};
use serde_json::json;

#[test]
fn test_entry_kind_identifiers() {
    assert_eq!(serde_json::to_value(EntryKind::File).unwrap(), json!("file"));
    assert_eq!(
        serde_json::to_value(EntryKind::Directory).unwrap(),
        json!("directory")
    );
    assert_eq!(serde_json::to_value(EntryKind::Other).unwrap(), json!("other"));
}

#[test]
fn test_raw_entry_fields() {
    let value = serde_json::to_value(RawEntry::new("a.txt", EntryKind::File)).unwrap();
    assert_eq!(value, json!({ "name": "a.txt", "kind": "file" }));
}

#[test]
fn test_display_entry_fields() {
    let value = serde_json::to_value(Entry::new("Docs", false)).unwrap();
    assert_eq!(value, json!({ "name": "Docs", "is_file": false }));
}

#[test]
fn test_sandbox_path_is_a_plain_string() {
    let path = SandboxPath::parse("Docs/a.txt").unwrap();
    assert_eq!(serde_json::to_value(&path).unwrap(), json!("Docs/a.txt"));

    let parsed: SandboxPath = serde_json::from_value(json!("Docs/a.txt")).unwrap();
    assert_eq!(parsed, path);
}

#[test]
fn test_sandbox_root_is_the_empty_string() {
    assert_eq!(serde_json::to_value(SandboxPath::root()).unwrap(), json!(""));
    let parsed: SandboxPath = serde_json::from_value(json!("")).unwrap();
    assert!(parsed.is_root());
}

#[test]
fn test_sandbox_path_rejects_escapes_at_the_boundary() {
    for raw in ["../secret", "/etc/passwd", "a//b", "a/./b", "docs/"] {
        let result: Result<SandboxPath, _> = serde_json::from_value(json!(raw));
        assert!(result.is_err(), "accepted {:?}", raw);
    }
}
