//! The persistent key-value store that `SecureStorage` writes through.
//!
//! All namespaces share one store; prefixes are the only isolation.
//! Implementations take `&self` so a single store can be shared as
//! `Arc<dyn KeyValueStore>` between every namespace.

use std::collections::BTreeMap;

use parking_lot::Mutex;

use crate::errors::{ByoaiError, Result};

/// A flat string-to-string store (the shape of browser `localStorage`).
pub trait KeyValueStore: Send + Sync {
    /// Read a value. `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Insert or overwrite a value.
    ///
    /// A rejected write must leave any previous value untouched and
    /// return `StorageWrite`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete a value. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Every key in the store, across all prefixes.
    fn keys(&self) -> Result<Vec<String>>;
}

/// In-memory store.
///
/// With a quota, writes that would push the total size (keys + values,
/// in bytes) over the limit are rejected the way a browser rejects a
/// `localStorage` write with a quota error.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota_bytes: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota_bytes: Some(quota_bytes),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock();

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = used + key.len() + value.len();
            if needed > quota {
                return Err(ByoaiError::StorageWrite(format!(
                    "quota exceeded ({needed} of {quota} bytes)"
                )));
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.lock().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.lock().keys().cloned().collect())
    }
}
