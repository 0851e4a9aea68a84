//! Local directory gateway backend
//!
//! Maps the gateway contract onto a real directory tree rooted at a
//! configured sandbox directory. Sandbox escape is impossible because
//! [`SandboxPath`] cannot express `..` or absolute components.

use crate::error::GatewayError;
use crate::gateway::{EntryKind, FileGateway, Locator, RawEntry};
use crate::path::SandboxPath;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Gateway over a real directory tree
pub struct LocalGateway {
    root: PathBuf,
}

impl LocalGateway {
    /// Opens a gateway over `root`
    ///
    /// The root must already exist and be a directory; the gateway never
    /// creates or deletes the root itself.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, GatewayError> {
        let root = root.into();
        let meta = tokio::fs::metadata(&root)
            .await
            .map_err(|e| GatewayError::from_io(&root.to_string_lossy(), e))?;
        if !meta.is_dir() {
            return Err(GatewayError::NotADirectory(
                root.to_string_lossy().into_owned(),
            ));
        }
        Ok(Self { root })
    }

    /// Returns the sandbox root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn fs_path(&self, path: &SandboxPath) -> PathBuf {
        let mut full = self.root.clone();
        for segment in path.segments() {
            full.push(segment);
        }
        full
    }

    async fn classify(
        &self,
        path: &SandboxPath,
    ) -> Result<Option<std::fs::Metadata>, GatewayError> {
        match tokio::fs::metadata(self.fs_path(path)).await {
            Ok(meta) => Ok(Some(meta)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(GatewayError::from_io(path.as_str(), e)),
        }
    }

    /// Verifies the parent of `path` exists and is a directory
    ///
    /// `NotFound` carries the full target path, `NotADirectory` the
    /// parent, matching the in-memory backend.
    async fn require_parent_directory(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        let parent = path.parent();
        match self.classify(&parent).await? {
            None => Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(meta) if !meta.is_dir() => {
                Err(GatewayError::NotADirectory(parent.as_str().to_string()))
            }
            Some(_) => Ok(()),
        }
    }
}

/// Synchronous recursive copy used for directory sources
///
/// Runs inside `spawn_blocking` with the destination parent already
/// verified; file copies overwrite existing destination files.
fn copy_tree(from: &Path, to: &Path) -> std::io::Result<()> {
    let meta = std::fs::metadata(from)?;
    if meta.is_dir() {
        std::fs::create_dir_all(to)?;
        for entry in std::fs::read_dir(from)? {
            let entry = entry?;
            copy_tree(&entry.path(), &to.join(entry.file_name()))?;
        }
    } else {
        std::fs::copy(from, to)?;
    }
    Ok(())
}

#[async_trait]
impl FileGateway for LocalGateway {
    async fn list(&self, path: &SandboxPath) -> Result<Vec<RawEntry>, GatewayError> {
        match self.classify(path).await? {
            None => return Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(meta) if !meta.is_dir() => {
                return Err(GatewayError::NotADirectory(path.as_str().to_string()));
            }
            Some(_) => {}
        }

        let mut reader = tokio::fs::read_dir(self.fs_path(path))
            .await
            .map_err(|e| GatewayError::from_io(path.as_str(), e))?;
        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| GatewayError::from_io(path.as_str(), e))?
        {
            let name = match entry.file_name().into_string() {
                Ok(name) => name,
                Err(raw) => {
                    // Non-UTF-8 names cannot round-trip through the listing.
                    warn!(folder = %path, name = ?raw, "skipping entry with non-UTF-8 name");
                    continue;
                }
            };
            let kind = match entry.file_type().await {
                Ok(t) if t.is_file() => EntryKind::File,
                Ok(t) if t.is_dir() => EntryKind::Directory,
                Ok(_) => EntryKind::Other,
                Err(e) => return Err(GatewayError::from_io(path.as_str(), e)),
            };
            entries.push(RawEntry::new(name, kind));
        }
        Ok(entries)
    }

    async fn create_directory(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        if self.classify(path).await?.is_some() {
            return Err(GatewayError::AlreadyExists(path.as_str().to_string()));
        }
        tokio::fs::create_dir_all(self.fs_path(path))
            .await
            .map_err(|e| GatewayError::from_io(path.as_str(), e))
    }

    async fn read_file(&self, path: &SandboxPath) -> Result<Vec<u8>, GatewayError> {
        match self.classify(path).await? {
            None => Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(meta) if meta.is_dir() => {
                Err(GatewayError::IsADirectory(path.as_str().to_string()))
            }
            Some(_) => tokio::fs::read(self.fs_path(path))
                .await
                .map_err(|e| GatewayError::from_io(path.as_str(), e)),
        }
    }

    async fn write_file(&self, path: &SandboxPath, bytes: &[u8]) -> Result<(), GatewayError> {
        self.require_parent_directory(path).await?;
        if let Some(meta) = self.classify(path).await? {
            if meta.is_dir() {
                return Err(GatewayError::IsADirectory(path.as_str().to_string()));
            }
        }
        tokio::fs::write(self.fs_path(path), bytes)
            .await
            .map_err(|e| GatewayError::from_io(path.as_str(), e))
    }

    async fn delete_file(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        match self.classify(path).await? {
            None => Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(meta) if meta.is_dir() => {
                Err(GatewayError::IsADirectory(path.as_str().to_string()))
            }
            Some(_) => tokio::fs::remove_file(self.fs_path(path))
                .await
                .map_err(|e| GatewayError::from_io(path.as_str(), e)),
        }
    }

    async fn delete_directory(
        &self,
        path: &SandboxPath,
        recursive: bool,
    ) -> Result<(), GatewayError> {
        if path.is_root() {
            return Err(GatewayError::Backend(
                "refusing to delete the sandbox root".to_string(),
            ));
        }
        match self.classify(path).await? {
            None => return Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(meta) if !meta.is_dir() => {
                return Err(GatewayError::NotADirectory(path.as_str().to_string()));
            }
            Some(_) => {}
        }
        if recursive {
            tokio::fs::remove_dir_all(self.fs_path(path))
                .await
                .map_err(|e| GatewayError::from_io(path.as_str(), e))
        } else {
            if !self.list(path).await?.is_empty() {
                return Err(GatewayError::DirectoryNotEmpty(path.as_str().to_string()));
            }
            tokio::fs::remove_dir(self.fs_path(path))
                .await
                .map_err(|e| GatewayError::from_io(path.as_str(), e))
        }
    }

    async fn resolve_locator(&self, path: &SandboxPath) -> Result<Locator, GatewayError> {
        Ok(Locator::new(path.clone()))
    }

    async fn copy(&self, from: &Locator, to: &Locator) -> Result<(), GatewayError> {
        if to.path().is_root() {
            return Err(GatewayError::Backend(
                "copy destination cannot be the sandbox root".to_string(),
            ));
        }
        if self.classify(from.path()).await?.is_none() {
            return Err(GatewayError::NotFound(from.path().as_str().to_string()));
        }
        self.require_parent_directory(to.path()).await?;

        let from_fs = self.fs_path(from.path());
        let to_fs = self.fs_path(to.path());
        let from_label = from.path().as_str().to_string();
        tokio::task::spawn_blocking(move || copy_tree(&from_fs, &to_fs))
            .await
            .map_err(|e| GatewayError::Backend(format!("copy task failed: {}", e)))?
            .map_err(|e| GatewayError::from_io(&from_label, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(raw: &str) -> SandboxPath {
        SandboxPath::parse(raw).unwrap()
    }

    async fn open_temp() -> (tempfile::TempDir, LocalGateway) {
        let dir = tempfile::tempdir().unwrap();
        let gateway = LocalGateway::open(dir.path()).await.unwrap();
        (dir, gateway)
    }

    #[tokio::test]
    async fn test_open_missing_root() {
        let result = LocalGateway::open("/definitely/not/here").await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_open_file_as_root() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("f.txt");
        std::fs::write(&file, b"x").unwrap();

        let result = LocalGateway::open(&file).await;
        assert!(matches!(result, Err(GatewayError::NotADirectory(_))));
    }

    #[tokio::test]
    async fn test_round_trip_write_list_read() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();
        gateway.write_file(&path("a.txt"), b"hello").await.unwrap();

        let mut names: Vec<String> = gateway
            .list(&SandboxPath::root())
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Docs", "a.txt"]);
        assert_eq!(gateway.read_file(&path("a.txt")).await.unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_create_directory_already_exists() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();

        let result = gateway.create_directory(&path("Docs")).await;
        assert!(matches!(result, Err(GatewayError::AlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_create_directory_intermediates() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("a/b/c")).await.unwrap();
        assert!(gateway.list(&path("a/b/c")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_into_missing_parent() {
        let (_dir, gateway) = open_temp().await;
        let result = gateway.write_file(&path("ghost/a.txt"), b"x").await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_write_under_file_parent() {
        let (_dir, gateway) = open_temp().await;
        gateway.write_file(&path("f.txt"), b"x").await.unwrap();

        let result = gateway.write_file(&path("f.txt/child.txt"), b"y").await;
        assert!(matches!(result, Err(GatewayError::NotADirectory(p)) if p == "f.txt"));
    }

    #[tokio::test]
    async fn test_delete_file_and_directory() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();
        gateway
            .write_file(&path("Docs/a.txt"), b"x")
            .await
            .unwrap();

        let result = gateway.delete_file(&path("Docs")).await;
        assert!(matches!(result, Err(GatewayError::IsADirectory(_))));

        gateway.delete_directory(&path("Docs"), true).await.unwrap();
        let result = gateway.list(&path("Docs")).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_non_recursive_delete_of_populated_directory() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();
        gateway.write_file(&path("Docs/a.txt"), b"x").await.unwrap();

        let result = gateway.delete_directory(&path("Docs"), false).await;
        assert!(matches!(result, Err(GatewayError::DirectoryNotEmpty(_))));
    }

    #[tokio::test]
    async fn test_copy_overwrites_destination() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();
        gateway.write_file(&path("a.txt"), b"new").await.unwrap();
        gateway.write_file(&path("Docs/a.txt"), b"old").await.unwrap();

        let from = gateway.resolve_locator(&path("a.txt")).await.unwrap();
        let to = gateway.resolve_locator(&path("Docs/a.txt")).await.unwrap();
        gateway.copy(&from, &to).await.unwrap();

        assert_eq!(gateway.read_file(&path("Docs/a.txt")).await.unwrap(), b"new");
        assert_eq!(gateway.read_file(&path("a.txt")).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_copy_vanished_source() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("Docs")).await.unwrap();

        let from = gateway.resolve_locator(&path("ghost.txt")).await.unwrap();
        let to = gateway.resolve_locator(&path("Docs/g.txt")).await.unwrap();
        let result = gateway.copy(&from, &to).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_copy_into_missing_parent() {
        let (_dir, gateway) = open_temp().await;
        gateway.write_file(&path("a.txt"), b"x").await.unwrap();

        let from = gateway.resolve_locator(&path("a.txt")).await.unwrap();
        let to = gateway.resolve_locator(&path("ghost/a.txt")).await.unwrap();
        let result = gateway.copy(&from, &to).await;
        assert!(matches!(result, Err(GatewayError::NotFound(_))));
        assert!(gateway.list(&path("ghost")).await.is_err());
    }

    #[tokio::test]
    async fn test_copy_directory_tree() {
        let (_dir, gateway) = open_temp().await;
        gateway.create_directory(&path("src/nested")).await.unwrap();
        gateway
            .write_file(&path("src/nested/a.txt"), b"x")
            .await
            .unwrap();
        gateway.create_directory(&path("dst")).await.unwrap();

        let from = gateway.resolve_locator(&path("src")).await.unwrap();
        let to = gateway.resolve_locator(&path("dst/src")).await.unwrap();
        gateway.copy(&from, &to).await.unwrap();

        assert_eq!(
            gateway
                .read_file(&path("dst/src/nested/a.txt"))
                .await
                .unwrap(),
            b"x"
        );
    }
}
