/*!
 * VFS Traits
 * Blob storage abstraction
 */

use std::path::Path;

use super::types::{VfsError, VfsResult};

/// Byte storage keyed by path.
///
/// Paths are resolved relative to the store root and can never escape it.
pub trait BlobStore: Send + Sync {
    /// Write entire blob contents (create or overwrite)
    fn put(&self, path: &Path, content: &[u8]) -> VfsResult<()>;

    /// Read entire blob contents
    fn get(&self, path: &Path) -> VfsResult<Vec<u8>>;

    /// Check if a blob exists
    fn exists(&self, path: &Path) -> bool;

    /// Delete a blob
    fn delete(&self, path: &Path) -> VfsResult<()>;

    /// Get store name/type
    fn name(&self) -> &str;

    /// Write a UTF-8 string
    fn put_text(&self, path: &Path, text: &str) -> VfsResult<()> {
        self.put(path, text.as_bytes())
    }

    /// Read a blob as a UTF-8 string
    fn get_text(&self, path: &Path) -> VfsResult<String> {
        let bytes = self.get(path)?;
        String::from_utf8(bytes)
            .map_err(|e| VfsError::InvalidData(format!("{}: {}", path.display(), e)))
    }
}
