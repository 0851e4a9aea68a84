//! Behavioral contract for gateway backends
//!
//! Each check is a plain async function over a `&dyn FileGateway`; the
//! test module at the bottom runs every check against every shipped
//! backend. A new backend gets contract coverage by adding one line per
//! check.
//!
//! Listing order is deliberately not part of the contract, so checks sort
//! names before comparing.

use fs_gateway::{EntryKind, FileGateway, GatewayError, SandboxPath};

fn path(raw: &str) -> SandboxPath {
    SandboxPath::parse(raw).expect("valid contract path")
}

fn sorted_names(entries: &[fs_gateway::RawEntry]) -> Vec<(String, EntryKind)> {
    let mut out: Vec<(String, EntryKind)> = entries
        .iter()
        .map(|e| (e.name.clone(), e.kind))
        .collect();
    out.sort_by(|a, b| a.0.cmp(&b.0));
    out
}

/// Created entries appear in the parent listing with the right kind, and
/// written bytes read back unchanged.
pub async fn check_list_round_trip(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("Docs")).await.expect("mkdir");
    gateway
        .write_file(&path("a.txt"), b"hello")
        .await
        .expect("write");

    let listing = gateway.list(&SandboxPath::root()).await.expect("list");
    assert_eq!(
        sorted_names(&listing),
        vec![
            ("Docs".to_string(), EntryKind::Directory),
            ("a.txt".to_string(), EntryKind::File),
        ]
    );
    assert_eq!(gateway.read_file(&path("a.txt")).await.expect("read"), b"hello");
}

/// Listing a missing folder or a file produces typed errors.
pub async fn check_list_errors(gateway: &dyn FileGateway) {
    let result = gateway.list(&path("ghost")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));

    gateway.write_file(&path("a.txt"), b"x").await.expect("write");
    let result = gateway.list(&path("a.txt")).await;
    assert!(matches!(result, Err(GatewayError::NotADirectory(_))));
}

/// Directory creation makes intermediates and rejects duplicates.
pub async fn check_create_directory(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("a/b/c")).await.expect("mkdir");
    assert!(gateway.list(&path("a/b/c")).await.expect("list").is_empty());

    let result = gateway.create_directory(&path("a/b/c")).await;
    assert!(matches!(result, Err(GatewayError::AlreadyExists(_))));
    let result = gateway.create_directory(&path("a")).await;
    assert!(matches!(result, Err(GatewayError::AlreadyExists(_))));
}

/// File operations reject directories and missing entries with typed
/// errors rather than backend strings.
pub async fn check_file_kind_errors(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("Docs")).await.expect("mkdir");

    let result = gateway.read_file(&path("Docs")).await;
    assert!(matches!(result, Err(GatewayError::IsADirectory(_))));
    let result = gateway.write_file(&path("Docs"), b"x").await;
    assert!(matches!(result, Err(GatewayError::IsADirectory(_))));
    let result = gateway.delete_file(&path("Docs")).await;
    assert!(matches!(result, Err(GatewayError::IsADirectory(_))));
    let result = gateway.read_file(&path("ghost.txt")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
    let result = gateway.delete_file(&path("ghost.txt")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));

    gateway.write_file(&path("f.txt"), b"x").await.expect("write");
    let result = gateway.write_file(&path("f.txt/child.txt"), b"y").await;
    assert!(matches!(result, Err(GatewayError::NotADirectory(_))));
}

/// Writing into a missing parent folder fails instead of inventing the
/// parent.
pub async fn check_write_requires_parent(gateway: &dyn FileGateway) {
    let result = gateway.write_file(&path("ghost/a.txt"), b"x").await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

/// Overwriting an existing file replaces its bytes.
pub async fn check_write_overwrites(gateway: &dyn FileGateway) {
    gateway.write_file(&path("a.txt"), b"old").await.expect("write");
    gateway.write_file(&path("a.txt"), b"new").await.expect("rewrite");
    assert_eq!(gateway.read_file(&path("a.txt")).await.expect("read"), b"new");
}

/// Recursive deletion removes a populated tree; non-recursive deletion
/// refuses one.
pub async fn check_delete_directory(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("Docs/nested")).await.expect("mkdir");
    gateway
        .write_file(&path("Docs/nested/a.txt"), b"x")
        .await
        .expect("write");

    let result = gateway.delete_directory(&path("Docs"), false).await;
    assert!(matches!(result, Err(GatewayError::DirectoryNotEmpty(_))));

    gateway
        .delete_directory(&path("Docs"), true)
        .await
        .expect("recursive delete");
    let result = gateway.list(&path("Docs")).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));

    let result = gateway.delete_directory(&path("Docs"), true).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

/// Copy duplicates the source, leaves it in place, and overwrites an
/// existing destination file.
pub async fn check_copy_file(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("Docs")).await.expect("mkdir");
    gateway.write_file(&path("a.txt"), b"new").await.expect("write");
    gateway
        .write_file(&path("Docs/a.txt"), b"old")
        .await
        .expect("write");

    let from = gateway.resolve_locator(&path("a.txt")).await.expect("from");
    let to = gateway
        .resolve_locator(&path("Docs/a.txt"))
        .await
        .expect("to");
    gateway.copy(&from, &to).await.expect("copy");

    assert_eq!(
        gateway.read_file(&path("Docs/a.txt")).await.expect("read"),
        b"new"
    );
    assert_eq!(gateway.read_file(&path("a.txt")).await.expect("read"), b"new");
}

/// Copying into a folder that does not exist fails instead of inventing
/// the destination parent.
pub async fn check_copy_missing_parent(gateway: &dyn FileGateway) {
    gateway.write_file(&path("a.txt"), b"x").await.expect("write");

    let from = gateway.resolve_locator(&path("a.txt")).await.expect("from");
    let to = gateway
        .resolve_locator(&path("ghost/a.txt"))
        .await
        .expect("to");
    let result = gateway.copy(&from, &to).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
    assert!(gateway.list(&path("ghost")).await.is_err());
}

/// A source that vanished between resolution and copy surfaces as
/// `NotFound`.
pub async fn check_copy_vanished_source(gateway: &dyn FileGateway) {
    gateway.create_directory(&path("Docs")).await.expect("mkdir");

    let from = gateway
        .resolve_locator(&path("ghost.txt"))
        .await
        .expect("from");
    let to = gateway
        .resolve_locator(&path("Docs/g.txt"))
        .await
        .expect("to");
    let result = gateway.copy(&from, &to).await;
    assert!(matches!(result, Err(GatewayError::NotFound(_))));
}

/// The sandbox root cannot be created, deleted, written, or used as a
/// copy destination.
pub async fn check_root_guards(gateway: &dyn FileGateway) {
    let root = SandboxPath::root();

    let result = gateway.create_directory(&root).await;
    assert!(matches!(result, Err(GatewayError::AlreadyExists(_))));
    let result = gateway.write_file(&root, b"x").await;
    assert!(matches!(result, Err(GatewayError::IsADirectory(_))));
    let result = gateway.delete_directory(&root, true).await;
    assert!(result.is_err());

    gateway.write_file(&path("a.txt"), b"x").await.expect("write");
    let from = gateway.resolve_locator(&path("a.txt")).await.expect("from");
    let to = gateway.resolve_locator(&root).await.expect("to");
    let result = gateway.copy(&from, &to).await;
    assert!(result.is_err());
}

#[cfg(test)]
mod tests {
    use fs_gateway::{LocalGateway, MemoryGateway};

    /// Expands to one test per backend for a single contract check.
    macro_rules! contract_test {
        ($name:ident, $check:path) => {
            mod $name {
                use super::*;

                #[tokio::test]
                async fn test_memory_backend() {
                    let gateway = MemoryGateway::new();
                    $check(&gateway).await;
                }

                #[tokio::test]
                async fn test_local_backend() {
                    let dir = tempfile::tempdir().unwrap();
                    let gateway = LocalGateway::open(dir.path()).await.unwrap();
                    $check(&gateway).await;
                }
            }
        };
    }

    contract_test!(list_round_trip, crate::gateway_contract::check_list_round_trip);
    contract_test!(list_errors, crate::gateway_contract::check_list_errors);
    contract_test!(create_directory, crate::gateway_contract::check_create_directory);
    contract_test!(file_kind_errors, crate::gateway_contract::check_file_kind_errors);
    contract_test!(
        write_requires_parent,
        crate::gateway_contract::check_write_requires_parent
    );
    contract_test!(write_overwrites, crate::gateway_contract::check_write_overwrites);
    contract_test!(delete_directory, crate::gateway_contract::check_delete_directory);
    contract_test!(copy_file, crate::gateway_contract::check_copy_file);
    contract_test!(
        copy_missing_parent,
        crate::gateway_contract::check_copy_missing_parent
    );
    contract_test!(
        copy_vanished_source,
        crate::gateway_contract::check_copy_vanished_source
    );
    contract_test!(root_guards, crate::gateway_contract::check_root_guards);
}
