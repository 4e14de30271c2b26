//! File-backed store.
//!
//! The file holds a single JSON object mapping keys to string values:
//!
//! ```json
//! { "adminEmails": "[\"admin@ufsbd34.fr\"]" }
//! ```
//!
//! Values are stored verbatim, so a value can itself be malformed JSON
//! without corrupting the file.

use std::collections::BTreeMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tempfile::NamedTempFile;

use super::{KeyValueStore, StoreError, WritableStore};

type Entries = BTreeMap<String, String>;

/// A store persisted as a JSON object file.
///
/// A missing file reads as an empty store. Writes replace the file through a
/// uniquely named temporary sibling and a rename, so readers and other
/// handles (including other processes) see either the old or the new
/// contents. Read-modify-write cycles through one handle are serialized by a
/// mutex; two processes editing the same key at the same instant can still
/// overwrite each other's edit.
///
/// All I/O is blocking. Async callers should go through
/// `tokio::task::spawn_blocking`.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Create a store backed by the file at `path`.
    ///
    /// The file is not touched until the first read or write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Entries, StoreError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if raw.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&raw).map_err(|e| {
            StoreError::Malformed(format!("{}: {e}", self.path.display()))
        })
    }

    fn save(&self, entries: &Entries) -> Result<(), StoreError> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        std::fs::create_dir_all(dir)?;

        let json = serde_json::to_string_pretty(entries)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    /// Load, edit, and save under the write lock. `apply` returns `false`
    /// to skip the save.
    fn modify(&self, apply: impl FnOnce(&mut Entries) -> bool) -> Result<(), StoreError> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let mut entries = self.load()?;
        if apply(&mut entries) {
            self.save(&entries)?;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.load()?.remove(key))
    }
}

impl WritableStore for FileStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        tracing::debug!(path = %self.path.display(), key, "Writing store value");
        self.modify(|entries| {
            entries.insert(key.to_owned(), value.to_owned());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        tracing::debug!(path = %self.path.display(), key, "Removing store value");
        self.modify(|entries| entries.remove(key).is_some())
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<(), StoreError> {
        self.modify(|entries| {
            let next = apply(entries.get(key).map(String::as_str));
            match next {
                Some(value) => {
                    tracing::debug!(path = %self.path.display(), key, "Updating store value");
                    entries.insert(key.to_owned(), value);
                    true
                }
                None => false,
            }
        })
    }
}
