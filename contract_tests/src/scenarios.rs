//! End-to-end browsing scenarios
//!
//! Full user stories driven through a `BrowserSession`, run against both
//! backends so the session logic cannot come to depend on one backend's
//! quirks.

use browser_core::{BrowserError, BrowserSession, NoopViewer, SelectOutcome, SilentNotifier};
use entry_view::Entry;
use fs_gateway::{FileGateway, SandboxPath};
use std::sync::Arc;

async fn session_over(gateway: Arc<dyn FileGateway>) -> BrowserSession {
    let mut session =
        BrowserSession::new(gateway, Arc::new(NoopViewer), Arc::new(SilentNotifier));
    session
        .initialize(SandboxPath::root())
        .await
        .expect("initial listing");
    session
}

fn names(session: &BrowserSession) -> Vec<(String, bool)> {
    let mut out: Vec<(String, bool)> = session
        .listing()
        .iter()
        .map(|e| (e.name.clone(), e.is_file))
        .collect();
    out.sort();
    out
}

/// The walkthrough: make a folder, import a file, copy it into the
/// folder, then verify both locations.
async fn scenario_copy_walkthrough(gateway: Arc<dyn FileGateway>) {
    let mut session = session_over(gateway).await;

    session.create_folder("Docs").await.expect("mkdir");
    session.add_file("a.txt", b"hello").await.expect("import");
    assert_eq!(names(&session), vec![
        ("Docs".to_string(), false),
        ("a.txt".to_string(), true),
    ]);

    session
        .start_copy(&Entry::new("a.txt", true))
        .expect("mark source");
    let outcome = session
        .select(&Entry::new("Docs", false))
        .await
        .expect("paste");
    assert_eq!(outcome, SelectOutcome::CopyFinished);
    assert!(session.clipboard().is_none());

    // Source untouched, destination populated.
    assert_eq!(names(&session), vec![
        ("Docs".to_string(), false),
        ("a.txt".to_string(), true),
    ]);
    session
        .select(&Entry::new("Docs", false))
        .await
        .expect("navigate");
    assert_eq!(names(&session), vec![("a.txt".to_string(), true)]);
    assert_eq!(
        session
            .read_entry(&Entry::new("a.txt", true))
            .await
            .expect("read copy"),
        b"hello"
    );
}

/// Selecting a file while a copy is pending is rejected without touching
/// any state.
async fn scenario_copy_rejects_file_target(gateway: Arc<dyn FileGateway>) {
    let mut session = session_over(gateway).await;
    session.add_file("a.txt", b"x").await.expect("import");
    session.add_file("b.txt", b"y").await.expect("import");

    session
        .start_copy(&Entry::new("a.txt", true))
        .expect("mark source");
    let before = names(&session);

    let result = session.select(&Entry::new("b.txt", true)).await;
    assert!(matches!(result, Err(BrowserError::InvalidCopyTarget)));
    assert_eq!(names(&session), before);
    assert!(session.clipboard().is_some());
}

/// Deep navigation builds clean paths, and a recursive delete from the
/// root removes the whole subtree.
async fn scenario_navigate_and_delete_tree(gateway: Arc<dyn FileGateway>) {
    let mut session = session_over(gateway.clone()).await;

    session.create_folder("Docs").await.expect("mkdir");
    session
        .select(&Entry::new("Docs", false))
        .await
        .expect("navigate");
    session.create_folder("Sub").await.expect("mkdir");
    session
        .select(&Entry::new("Sub", false))
        .await
        .expect("navigate");
    assert_eq!(session.current_folder().as_str(), "Docs/Sub");
    session.add_file("deep.txt", b"x").await.expect("import");

    session
        .initialize(SandboxPath::root())
        .await
        .expect("back to root");
    session
        .delete(&Entry::new("Docs", false))
        .await
        .expect("recursive delete");
    assert!(session.listing().is_empty());

    let result = gateway.list(&SandboxPath::parse("Docs/Sub").unwrap()).await;
    assert!(result.is_err());
}

macro_rules! scenario_test {
    ($name:ident, $scenario:path) => {
        mod $name {
            use super::*;
            use fs_gateway::{LocalGateway, MemoryGateway};

            #[tokio::test]
            async fn test_memory_backend() {
                $scenario(Arc::new(MemoryGateway::new())).await;
            }

            #[tokio::test]
            async fn test_local_backend() {
                let dir = tempfile::tempdir().unwrap();
                let gateway = LocalGateway::open(dir.path()).await.unwrap();
                $scenario(Arc::new(gateway)).await;
            }
        }
    };
}

scenario_test!(copy_walkthrough, crate::scenarios::scenario_copy_walkthrough);
scenario_test!(
    copy_rejects_file_target,
    crate::scenarios::scenario_copy_rejects_file_target
);
scenario_test!(
    navigate_and_delete_tree,
    crate::scenarios::scenario_navigate_and_delete_tree
);
