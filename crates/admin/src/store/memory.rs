//! In-memory store.

use std::collections::HashMap;
use std::sync::RwLock;

use super::{KeyValueStore, StoreError, WritableStore};

/// A store backed by a `HashMap` behind a read-write lock.
///
/// Reads take the shared lock, so concurrent access checks never block each
/// other. A poisoned lock is reported as [`StoreError::Unavailable`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_owned(), value.to_owned());
        Self {
            entries: RwLock::new(entries),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(entries.get(key).cloned())
    }
}

impl WritableStore for MemoryStore {
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        entries.remove(key);
        Ok(())
    }

    fn update(
        &self,
        key: &str,
        apply: &mut dyn FnMut(Option<&str>) -> Option<String>,
    ) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        let next = apply(entries.get(key).map(String::as_str));
        if let Some(value) = next {
            entries.insert(key.to_owned(), value);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_missing_key() {
        let store = MemoryStore::new();
        assert!(store.get("adminEmails").unwrap().is_none());
    }

    #[test]
    fn test_set_get_remove() {
        let store = MemoryStore::new();
        store.set("adminEmails", "[]").unwrap();
        assert_eq!(store.get("adminEmails").unwrap().as_deref(), Some("[]"));

        store.remove("adminEmails").unwrap();
        assert!(store.get("adminEmails").unwrap().is_none());

        // Removing twice is fine
        store.remove("adminEmails").unwrap();
    }

    #[test]
    fn test_with_value() {
        let store = MemoryStore::with_value("k", "v");
        assert_eq!(store.get("k").unwrap().as_deref(), Some("v"));
    }

    #[test]
    fn test_update_sees_current_value() {
        let store = MemoryStore::with_value("counter", "1");
        store
            .update("counter", &mut |current| {
                assert_eq!(current, Some("1"));
                Some("2".to_string())
            })
            .unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("2"));

        // Returning None leaves the value alone
        store.update("counter", &mut |_| None).unwrap();
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("2"));
    }

    #[test]
    fn test_concurrent_updates_are_not_lost() {
        let store = MemoryStore::with_value("counter", "0");
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    for _ in 0..100 {
                        store
                            .update("counter", &mut |current| {
                                let n: u32 = current.unwrap().parse().unwrap();
                                Some((n + 1).to_string())
                            })
                            .unwrap();
                    }
                });
            }
        });
        assert_eq!(store.get("counter").unwrap().as_deref(), Some("800"));
    }

    #[test]
    fn test_poisoned_lock_is_unavailable() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let poisoner = std::sync::Arc::clone(&store);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.entries.write().unwrap();
            panic!("poison the lock");
        })
        .join();

        assert!(matches!(
            store.get("adminEmails"),
            Err(StoreError::Unavailable(_))
        ));
    }
}
