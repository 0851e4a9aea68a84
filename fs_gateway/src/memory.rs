//! In-memory gateway backend
//!
//! A deterministic tree of named nodes. Listings come back in name order
//! because children live in a `BTreeMap`. Useful as the reference backend
//! for tests and for embedders that want a scratch sandbox.

use crate::error::GatewayError;
use crate::gateway::{EntryKind, FileGateway, Locator, RawEntry};
use crate::path::SandboxPath;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Directory(BTreeMap<String, Node>),
}

impl Node {
    fn empty_dir() -> Self {
        Node::Directory(BTreeMap::new())
    }

    fn kind(&self) -> EntryKind {
        match self {
            Node::File(_) => EntryKind::File,
            Node::Directory(_) => EntryKind::Directory,
        }
    }
}

/// In-memory storage tree behind the gateway contract
///
/// The lock is only ever held across synchronous tree manipulation, never
/// across an await point.
pub struct MemoryGateway {
    root: Mutex<Node>,
}

impl MemoryGateway {
    /// Creates a gateway with an empty sandbox root
    pub fn new() -> Self {
        Self {
            root: Mutex::new(Node::empty_dir()),
        }
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Walks the tree to the node at `path`
fn find<'a>(root: &'a Node, path: &SandboxPath) -> Result<&'a Node, GatewayError> {
    let mut current = root;
    for segment in path.segments() {
        match current {
            Node::Directory(children) => {
                current = children
                    .get(segment)
                    .ok_or_else(|| GatewayError::NotFound(path.as_str().to_string()))?;
            }
            Node::File(_) => {
                return Err(GatewayError::NotADirectory(path.as_str().to_string()));
            }
        }
    }
    Ok(current)
}

/// Walks the tree to the parent directory of `path`, returning its child
/// map and the final segment name
fn find_parent_mut<'a>(
    root: &'a mut Node,
    path: &SandboxPath,
) -> Result<(&'a mut BTreeMap<String, Node>, String), GatewayError> {
    let name = path
        .file_name()
        .ok_or_else(|| GatewayError::Backend("operation requires a non-root path".to_string()))?
        .to_string();
    let parent = path.parent();

    let mut current = root;
    for segment in parent.segments() {
        match current {
            Node::Directory(children) => {
                current = children
                    .get_mut(segment)
                    .ok_or_else(|| GatewayError::NotFound(path.as_str().to_string()))?;
            }
            Node::File(_) => {
                return Err(GatewayError::NotADirectory(parent.as_str().to_string()));
            }
        }
    }

    match current {
        Node::Directory(children) => Ok((children, name)),
        Node::File(_) => Err(GatewayError::NotADirectory(parent.as_str().to_string())),
    }
}

#[async_trait]
impl FileGateway for MemoryGateway {
    async fn list(&self, path: &SandboxPath) -> Result<Vec<RawEntry>, GatewayError> {
        let root = self.root.lock();
        match find(&root, path)? {
            Node::Directory(children) => Ok(children
                .iter()
                .map(|(name, node)| RawEntry::new(name.clone(), node.kind()))
                .collect()),
            Node::File(_) => Err(GatewayError::NotADirectory(path.as_str().to_string())),
        }
    }

    async fn create_directory(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        if path.is_root() {
            return Err(GatewayError::AlreadyExists(path.as_str().to_string()));
        }
        let mut root = self.root.lock();

        let mut current = &mut *root;
        let segments: Vec<&str> = path.segments().collect();
        for (i, segment) in segments.iter().enumerate() {
            let is_last = i == segments.len() - 1;
            let children = match current {
                Node::Directory(children) => children,
                Node::File(_) => {
                    return Err(GatewayError::NotADirectory(path.as_str().to_string()));
                }
            };
            if is_last {
                if children.contains_key(*segment) {
                    return Err(GatewayError::AlreadyExists(path.as_str().to_string()));
                }
                children.insert((*segment).to_string(), Node::empty_dir());
                return Ok(());
            }
            current = children
                .entry((*segment).to_string())
                .or_insert_with(Node::empty_dir);
        }
        Ok(())
    }

    async fn read_file(&self, path: &SandboxPath) -> Result<Vec<u8>, GatewayError> {
        let root = self.root.lock();
        match find(&root, path)? {
            Node::File(bytes) => Ok(bytes.clone()),
            Node::Directory(_) => Err(GatewayError::IsADirectory(path.as_str().to_string())),
        }
    }

    async fn write_file(&self, path: &SandboxPath, bytes: &[u8]) -> Result<(), GatewayError> {
        if path.is_root() {
            return Err(GatewayError::IsADirectory(path.as_str().to_string()));
        }
        let mut root = self.root.lock();
        let (children, name) = find_parent_mut(&mut root, path)?;
        if let Some(Node::Directory(_)) = children.get(&name) {
            return Err(GatewayError::IsADirectory(path.as_str().to_string()));
        }
        children.insert(name, Node::File(bytes.to_vec()));
        Ok(())
    }

    async fn delete_file(&self, path: &SandboxPath) -> Result<(), GatewayError> {
        if path.is_root() {
            return Err(GatewayError::IsADirectory(path.as_str().to_string()));
        }
        let mut root = self.root.lock();
        let (children, name) = find_parent_mut(&mut root, path)?;
        match children.get(&name) {
            None => Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(Node::Directory(_)) => {
                Err(GatewayError::IsADirectory(path.as_str().to_string()))
            }
            Some(Node::File(_)) => {
                children.remove(&name);
                Ok(())
            }
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
        let mut root = self.root.lock();
        let (children, name) = find_parent_mut(&mut root, path)?;
        match children.get(&name) {
            None => Err(GatewayError::NotFound(path.as_str().to_string())),
            Some(Node::File(_)) => Err(GatewayError::NotADirectory(path.as_str().to_string())),
            Some(Node::Directory(grandchildren)) => {
                if !recursive && !grandchildren.is_empty() {
                    return Err(GatewayError::DirectoryNotEmpty(path.as_str().to_string()));
                }
                children.remove(&name);
                Ok(())
            }
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
        let mut root = self.root.lock();

        let source = match find(&root, from.path()) {
            Ok(node) => node.clone(),
            Err(_) => return Err(GatewayError::NotFound(from.path().as_str().to_string())),
        };

        // Overwrites any existing destination entry.
        let (children, name) = find_parent_mut(&mut root, to.path())?;
        children.insert(name, source);
        Ok(())
    }
}
