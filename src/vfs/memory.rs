/*!
 * In-Memory Blob Store
 * Volatile storage for tests and scratch data
 */

use ahash::RandomState;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::traits::BlobStore;
use super::types::*;

/// In-memory blob store
#[derive(Debug, Clone)]
pub struct MemStore {
    blobs: Arc<RwLock<HashMap<PathBuf, Vec<u8>, RandomState>>>,
    max_size: Option<usize>,
}

impl MemStore {
    pub fn new() -> Self {
        Self {
            blobs: Arc::new(RwLock::new(HashMap::with_hasher(RandomState::new()))),
            max_size: None,
        }
    }

    /// Create with a limit on total stored bytes
    pub fn with_capacity(max_size: usize) -> Self {
        let mut store = Self::new();
        store.max_size = Some(max_size);
        store
    }

    /// Normalize path (make absolute and clean)
    fn normalize(&self, path: &Path) -> VfsResult<PathBuf> {
        let path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new("/").join(path)
        };

        let cleaned = PathBuf::from(path_clean::clean(&path));
        if cleaned == Path::new("/") {
            return Err(VfsError::InvalidPath(path.display().to_string()));
        }
        Ok(cleaned)
    }

    /// Total bytes stored
    pub fn used(&self) -> usize {
        self.blobs.read().values().map(Vec::len).sum()
    }

    pub fn len(&self) -> usize {
        self.blobs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.read().is_empty()
    }
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl BlobStore for MemStore {
    fn put(&self, path: &Path, content: &[u8]) -> VfsResult<()> {
        let key = self.normalize(path)?;
        let mut blobs = self.blobs.write();

        if let Some(max) = self.max_size {
            let current: usize = blobs.values().map(Vec::len).sum();
            let replaced = blobs.get(&key).map_or(0, Vec::len);
            if current - replaced + content.len() > max {
                return Err(VfsError::OutOfSpace);
            }
        }

        blobs.insert(key, content.to_vec());
        Ok(())
    }

    fn get(&self, path: &Path) -> VfsResult<Vec<u8>> {
        let key = self.normalize(path)?;
        self.blobs
            .read()
            .get(&key)
            .cloned()
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))
    }

    fn exists(&self, path: &Path) -> bool {
        self.normalize(path)
            .map(|key| self.blobs.read().contains_key(&key))
            .unwrap_or(false)
    }

    fn delete(&self, path: &Path) -> VfsResult<()> {
        let key = self.normalize(path)?;
        self.blobs
            .write()
            .remove(&key)
            .map(|_| ())
            .ok_or_else(|| VfsError::NotFound(path.display().to_string()))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
