//! Raw byte backends behind a [`Store`](crate::Store).

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::StoreError;

/// Raw key-value storage.
///
/// Implementations only move bytes around; serialization lives in
/// [`Store`](crate::Store).
pub trait Backend: Send + Sync {
    /// Read the bytes stored under `key`.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Replace the bytes stored under `key`.
    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Check whether `key` holds a value.
    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.read(key)?.is_some())
    }

    /// List every stored key, sorted.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

/// In-process backend.
///
/// An optional byte quota makes writes fail the way a full browser storage
/// area does, which is how degraded persistence gets exercised in tests.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Vec<u8>>>,
    quota: Option<usize>,
}

impl MemoryBackend {
    /// Create an unbounded in-memory backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that rejects writes once the total stored size would
    /// exceed `bytes`.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            quota: Some(bytes),
        }
    }

    fn entries(&self) -> Result<MutexGuard<'_, HashMap<String, Vec<u8>>>, StoreError> {
        self.entries
            .lock()
            .map_err(|_| StoreError::StoreError("memory backend lock poisoned".to_string()))
    }
}

impl Backend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let mut entries = self.entries()?;

        if let Some(limit) = self.quota {
            let others: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let required = others + key.len() + bytes.len();
            if required > limit {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    limit,
                });
            }
        }

        entries.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.entries()?.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

/// Directory-backed backend: one `<key>.json` file per key.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written slot.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

const FILE_EXTENSION: &str = "json";

impl FileBackend {
    /// Open (creating if needed) a backend rooted at `dir`.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        let root = dir.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::OpenError(format!("{}: {}", root.display(), e)))?;
        Ok(Self { root })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.{}", key, FILE_EXTENSION)))
    }
}

impl Backend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, bytes: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        let tmp = self.root.join(format!(".{}.{}.tmp", key, FILE_EXTENSION));

        let mut file = fs::File::create(&tmp)?;
        file.write_all(bytes)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn contains(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.path_for(key)?.is_file())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            if path.extension().is_some_and(|e| e == FILE_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    if !stem.starts_with('.') {
                        keys.push(stem.to_string());
                    }
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// Keys become file names, so only a conservative character set is allowed.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.' | ':'));
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_roundtrip() {
        let backend = MemoryBackend::new();
        backend.write("cart", b"[1,2]").unwrap();
        assert_eq!(backend.read("cart").unwrap(), Some(b"[1,2]".to_vec()));
        assert!(backend.contains("cart").unwrap());

        backend.remove("cart").unwrap();
        assert_eq!(backend.read("cart").unwrap(), None);
    }

    #[test]
    fn test_memory_quota_rejects_oversized_write() {
        let backend = MemoryBackend::with_quota(16);
        backend.write("a", b"1234").unwrap();

        let err = backend.write("b", b"0123456789abcdef").unwrap_err();
        assert!(matches!(err, StoreError::QuotaExceeded { .. }));

        // Failed write leaves the slot untouched.
        assert_eq!(backend.read("b").unwrap(), None);
    }

    #[test]
    fn test_memory_quota_counts_replacement_once() {
        let backend = MemoryBackend::with_quota(12);
        backend.write("key", b"12345678").unwrap();
        // Overwriting the same key does not double count the old value.
        backend.write("key", b"87654321").unwrap();
    }

    #[test]
    fn test_file_roundtrip_and_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        backend.write("favorites", b"[]").unwrap();
        backend.write("cart", b"[]").unwrap();

        assert_eq!(backend.keys().unwrap(), vec!["cart", "favorites"]);
        assert_eq!(backend.read("cart").unwrap(), Some(b"[]".to_vec()));
        assert!(dir.path().join("cart.json").is_file());
    }

    #[test]
    fn test_file_missing_key_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();
        assert_eq!(backend.read("checkoutData").unwrap(), None);
        backend.remove("checkoutData").unwrap();
    }

    #[test]
    fn test_file_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::open(dir.path()).unwrap();

        for key in ["../escape", "a/b", "", ".hidden"] {
            assert!(matches!(
                backend.write(key, b"1"),
                Err(StoreError::InvalidKey(_))
            ));
        }
    }
}
