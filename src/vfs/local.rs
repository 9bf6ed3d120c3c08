/*!
 * Local Blob Store
 * Wraps std::fs for host filesystem access
 */

use std::fs;
use std::path::{Component, Path, PathBuf};

use super::traits::BlobStore;
use super::types::*;
use tracing::debug;

/// Blob store backed by a host directory
#[derive(Debug, Clone)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create new local store rooted at specified path
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Create the root directory if it does not exist yet
    pub fn create<P: Into<PathBuf>>(root: P) -> VfsResult<Self> {
        let store = Self::new(root);
        fs::create_dir_all(&store.root).map_err(|e| {
            Self::io_error(e, format!("create root {}", store.root.display()))
        })?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve path relative to root. `..` stops at the root boundary.
    fn resolve(&self, path: &Path) -> VfsResult<PathBuf> {
        let mut components = Vec::with_capacity(8);

        for component in path.components() {
            match component {
                Component::Normal(name) => components.push(name),
                Component::ParentDir => {
                    components.pop();
                }
                // RootDir, CurDir and Windows prefixes carry no name
                _ => {}
            }
        }

        if components.is_empty() {
            return Err(VfsError::InvalidPath(path.display().to_string()));
        }

        let mut result = self.root.clone();
        for component in components {
            result.push(component);
        }
        Ok(result)
    }

    /// Convert std::io::Error to VfsError
    fn io_error(e: std::io::Error, context: impl Into<String>) -> VfsError {
        use std::io::ErrorKind;
        match e.kind() {
            ErrorKind::NotFound => VfsError::NotFound(context.into()),
            ErrorKind::PermissionDenied => VfsError::PermissionDenied(context.into()),
            _ => VfsError::IoError(format!("{}: {}", context.into(), e)),
        }
    }
}

impl BlobStore for LocalStore {
    fn put(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let full_path = self.resolve(path)?;
        if full_path.is_dir() {
            return Err(VfsError::IsADirectory(path.display().to_string()));
        }

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Self::io_error(e, format!("create parent dirs for {}", path.display()))
            })?;
        }

        fs::write(&full_path, content)
            .map_err(|e| Self::io_error(e, format!("write {}", path.display())))?;
        debug!(path = %path.display(), bytes = content.len(), "Stored blob");
        Ok(())
    }

    fn get(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let full_path = self.resolve(path)?;
        if full_path.is_dir() {
            return Err(VfsError::IsADirectory(path.display().to_string()));
        }
        fs::read(&full_path).map_err(|e| Self::io_error(e, format!("read {}", path.display())))
    }

    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).map(|p| p.is_file()).unwrap_or(false)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        let full_path = self.resolve(path)?;
        fs::remove_file(&full_path)
            .map_err(|e| Self::io_error(e, format!("delete {}", path.display())))
    }

    fn name(&self) -> &str {
        "local"
    }
}
