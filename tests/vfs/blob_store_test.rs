/*!
 * Blob Store Tests
 * Local and in-memory stores behave the same through the trait
 */

use devos_kernel::{BlobStore, LocalStore, MemStore, VfsError};
use std::path::Path;
use tempfile::TempDir;

fn round_trip(store: &dyn BlobStore) {
    store.put(Path::new("example.txt"), b"hello").unwrap();
    assert_eq!(store.get(Path::new("example.txt")).unwrap(), b"hello");
    assert!(store.exists(Path::new("example.txt")));

    store.put_text(Path::new("example.txt"), "overwritten").unwrap();
    assert_eq!(store.get_text(Path::new("example.txt")).unwrap(), "overwritten");
}

fn missing(store: &dyn BlobStore) {
    let err = store.get(Path::new("missing.txt")).unwrap_err();
    assert!(err.is_not_found(), "unexpected error: {:?}", err);
    assert!(!store.exists(Path::new("missing.txt")));
}

#[test]
fn test_local_store_round_trip() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::new(dir.path());
    round_trip(&store);
    assert_eq!(store.root(), dir.path());
    assert!(store.root().join("example.txt").is_file());
}

#[test]
fn test_mem_store_round_trip() {
    let store = MemStore::new();
    assert!(store.is_empty());
    round_trip(&store);
    assert_eq!(store.len(), 1);

    store.delete(Path::new("example.txt")).unwrap();
    assert!(store.is_empty());
}

#[test]
fn test_missing_blob_is_not_found() {
    let dir = TempDir::new().unwrap();
    missing(&LocalStore::new(dir.path()));
    missing(&MemStore::new());
}

#[test]
fn test_local_store_nested_paths_and_delete() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::new(dir.path());

    store.put(Path::new("logs/2024/run.log"), b"ok").unwrap();
    assert!(dir.path().join("logs/2024/run.log").is_file());

    store.delete(Path::new("logs/2024/run.log")).unwrap();
    assert!(!store.exists(Path::new("logs/2024/run.log")));
    assert!(store.delete(Path::new("logs/2024/run.log")).unwrap_err().is_not_found());
}

#[test]
fn test_local_store_traversal_stays_inside_root() {
    let dir = TempDir::new().unwrap();
    let root = dir.path().join("root");
    let store = LocalStore::create(&root).unwrap();

    store.put(Path::new("../../escape.txt"), b"contained").unwrap();
    assert!(root.join("escape.txt").is_file());
    assert!(!dir.path().join("escape.txt").exists());
}

#[test]
fn test_root_path_is_invalid() {
    let dir = TempDir::new().unwrap();
    let store = LocalStore::new(dir.path());
    assert!(matches!(
        store.put(Path::new("/"), b"x"),
        Err(VfsError::InvalidPath(_))
    ));
    assert!(matches!(
        MemStore::new().get(Path::new("..")),
        Err(VfsError::InvalidPath(_))
    ));
}

#[test]
fn test_directory_is_not_a_blob() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("sub")).unwrap();
    let store = LocalStore::new(dir.path());
    assert!(matches!(
        store.get(Path::new("sub")),
        Err(VfsError::IsADirectory(_))
    ));
}

#[test]
fn test_invalid_utf8_text() {
    let store = MemStore::new();
    store.put(Path::new("bin"), &[0xff, 0xfe]).unwrap();
    assert!(matches!(
        store.get_text(Path::new("bin")),
        Err(VfsError::InvalidData(_))
    ));
}
