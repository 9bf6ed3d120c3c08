/*!
 * VFS Types
 * Shared types for blob storage
 */

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// VFS operation result
pub type VfsResult<T> = Result<T, VfsError>;

/// VFS errors
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum VfsError {
    #[error("Not found: {0}")]
    #[diagnostic(code(vfs::not_found))]
    NotFound(String),

    #[error("Permission denied: {0}")]
    #[diagnostic(code(vfs::permission_denied))]
    PermissionDenied(String),

    #[error("Is a directory: {0}")]
    #[diagnostic(code(vfs::is_a_directory))]
    IsADirectory(String),

    #[error("Invalid path: {0}")]
    #[diagnostic(code(vfs::invalid_path), help("Paths must name a file below the store root."))]
    InvalidPath(String),

    #[error("Invalid data: {0}")]
    #[diagnostic(code(vfs::invalid_data))]
    InvalidData(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(vfs::io_error), help("Check file permissions and disk space."))]
    IoError(String),

    #[error("Out of space")]
    #[diagnostic(code(vfs::out_of_space))]
    OutOfSpace,
}

impl VfsError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, VfsError::NotFound(_))
    }
}
