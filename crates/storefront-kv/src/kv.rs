//! Typed JSON access over a [`Backend`].

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::backend::{Backend, FileBackend, MemoryBackend};
use crate::StoreError;

/// Type-safe store with automatic JSON serialization.
///
/// Cloning is cheap and every clone addresses the same backend, so one store
/// can be handed to several engines that each own a different key.
#[derive(Clone)]
pub struct Store {
    backend: Arc<dyn Backend>,
}

impl Store {
    /// Wrap an arbitrary backend.
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    /// Unbounded in-memory store.
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }

    /// Store persisted as JSON files under `dir`.
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// let store = storefront_kv::Store::open(".shop")?;
    /// # Ok::<(), storefront_kv::StoreError>(())
    /// ```
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::new(FileBackend::open(dir)?))
    }

    /// Get a value from the store.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.backend.read(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Set a value in the store.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.write(key, &bytes)?;
        tracing::debug!(key, bytes = bytes.len(), "store slot written");
        Ok(())
    }

    /// Delete a value from the store.
    pub fn delete(&self, key: &str) -> Result<(), StoreError> {
        self.backend.remove(key)?;
        tracing::debug!(key, "store slot removed");
        Ok(())
    }

    /// Check if a key exists in the store.
    pub fn exists(&self, key: &str) -> Result<bool, StoreError> {
        self.backend.contains(key)
    }

    /// Get all keys in the store.
    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }

    /// Load the JSON array stored under `key`.
    ///
    /// Never fails: a missing slot, an unreadable backend or malformed JSON
    /// all yield an empty list. Failures are logged.
    pub fn load_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        match self.get::<Vec<T>>(key) {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(error) => {
                tracing::warn!(key, %error, "discarding unreadable list slot");
                Vec::new()
            }
        }
    }

    /// Replace the JSON array stored under `key`.
    pub fn save_list<T: Serialize>(&self, key: &str, items: &[T]) -> Result<(), StoreError> {
        self.set(key, items)
    }

    /// Load the record stored under `key`, falling back to `T::default()`
    /// the same way [`load_list`](Self::load_list) falls back to empty.
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.get::<T>(key) {
            Ok(Some(value)) => value,
            Ok(None) => T::default(),
            Err(error) => {
                tracing::warn!(key, %error, "discarding unreadable record slot");
                T::default()
            }
        }
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store").finish_non_exhaustive()
    }
}
