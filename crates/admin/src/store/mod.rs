//! Persisted key-value store backing the admin email list.
//!
//! The access checks only need the read half ([`KeyValueStore`]). The admin
//! list management surface additionally writes through [`WritableStore`].
//!
//! # Backends
//!
//! - [`MemoryStore`] - In-process map, for tests and embedding
//! - [`FileStore`] - JSON object on disk, one string value per key

pub mod file;
pub mod memory;

use std::sync::Arc;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors that can occur when talking to a store backend.
///
/// The access checks never surface these: any of them means "the persisted
/// list is unavailable" and the configured defaults are used instead.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend cannot be used at all (e.g., a poisoned lock).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Filesystem error from a file-backed store.
    #[error("store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend's own storage format is corrupt.
    #[error("store data is malformed: {0}")]
    Malformed(String),

    /// Serializing the backend's storage format failed.
    #[error("store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Read contract of the persisted store.
pub trait KeyValueStore: Send + Sync {
    /// Fetch the raw value stored under `key`.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
}

/// Write counterpart of [`KeyValueStore`], used by admin list management.
pub trait WritableStore: KeyValueStore {
    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StoreError>;

    /// Read-modify-write the value under `key` as one step.
    ///
    /// `apply` receives the current value and returns the replacement, or
    /// `None` to leave the store untouched. No other write through the same
    /// handle can land between the read and the write.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the backend cannot be read or written.
    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<(), StoreError>;
}

/// Type-erased store shared across request handlers.
pub type SharedStore = Arc<dyn WritableStore>;

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }
}

impl<T: WritableStore + ?Sized> WritableStore for Arc<T> {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<(), StoreError> {
        (**self).update(key, apply)
    }
}
