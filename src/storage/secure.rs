//! Namespaced, encrypted storage with change notification.
//!
//! `SecureStorage` is what the rest of the application talks to.  It
//! wraps a shared [`KeyValueStore`], prefixes every key with its
//! namespace, encrypts on `store`, decrypts on `retrieve`, and notifies
//! subscribers after every mutation.
//!
//! Read failures are asymmetric on purpose: `SecureEncryption::decrypt`
//! reports them loudly, but `retrieve` removes the broken or expired
//! record and answers `None`, which callers handle as "no key set".
//!
//! Known limitation: two threads calling `store` for the same key can
//! finish their writes and their notifications in different orders, so a
//! subscriber must re-read state rather than assume which write won.

use std::sync::Arc;

use super::backend::KeyValueStore;
use super::subscribers::{Callback, SubscriberList, Subscription};
use crate::crypto::{SecureEncryption, StorageInfo};
use crate::errors::{ByoaiError, Result};

/// One storage namespace.
pub struct SecureStorage {
    prefix: String,
    encryption: SecureEncryption,
    backend: Arc<dyn KeyValueStore>,
    subscribers: SubscriberList,
}

impl SecureStorage {
    /// Build a namespace over `backend`.
    ///
    /// Prefer `StorageRegistry::get_instance`, which keeps one instance
    /// per prefix so every consumer shares the same subscribers.
    pub fn new(
        prefix: impl Into<String>,
        encryption: SecureEncryption,
        backend: Arc<dyn KeyValueStore>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            encryption,
            backend,
            subscribers: SubscriberList::new(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn encryption(&self) -> &SecureEncryption {
        &self.encryption
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{key}", self.prefix)
    }

    // ------------------------------------------------------------------
    // Encrypted values
    // ------------------------------------------------------------------

    /// Encrypt `plaintext` and write it under `key`, replacing any
    /// previous record.
    ///
    /// Nothing is written if encryption fails.  A rejected write is
    /// returned as `StorageWrite` and subscribers are not notified.
    pub fn store(&self, key: &str, plaintext: &str) -> Result<()> {
        let encrypted = self.encryption.encrypt(plaintext)?;
        self.backend.set(&self.full_key(key), &encrypted)?;
        tracing::debug!(prefix = %self.prefix, key, "stored encrypted value");
        self.notify_subscribers();
        Ok(())
    }

    /// Decrypt the value under `key`.
    ///
    /// `Ok(None)` when absent, and also when the record is expired,
    /// tampered with, malformed or from another environment; in those
    /// cases the record is removed first.  Only backend read failures and
    /// an unusable environment/config propagate as errors.
    pub fn retrieve(&self, key: &str) -> Result<Option<String>> {
        let Some(encrypted) = self.backend.get(&self.full_key(key))? else {
            return Ok(None);
        };

        match self.encryption.decrypt(&encrypted) {
            Ok(plaintext) => Ok(Some(plaintext)),
            Err(err @ (ByoaiError::Expired | ByoaiError::DecryptionFailed)) => {
                tracing::warn!(
                    prefix = %self.prefix,
                    key,
                    reason = %err,
                    "discarding unreadable record"
                );
                if let Err(remove_err) = self.remove(key) {
                    tracing::warn!(key, error = %remove_err, "failed to discard record");
                }
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    /// Delete `key` and notify.
    pub fn remove(&self, key: &str) -> Result<()> {
        self.backend.remove(&self.full_key(key))?;
        tracing::debug!(prefix = %self.prefix, key, "removed value");
        self.notify_subscribers();
        Ok(())
    }

    /// Whether anything is stored under `key`.
    ///
    /// Presence only — the record is not decrypted or checked for expiry.
    pub fn exists(&self, key: &str) -> Result<bool> {
        Ok(self.backend.get(&self.full_key(key))?.is_some())
    }

    /// Metadata of the record under `key`.
    ///
    /// `None` when absent or unparseable.
    pub fn get_info(&self, key: &str) -> Result<Option<StorageInfo>> {
        Ok(self
            .backend
            .get(&self.full_key(key))?
            .and_then(|encrypted| self.encryption.storage_info(&encrypted)))
    }

    /// Remove every key in this namespace and notify once.
    ///
    /// Scans the whole backend key space; other prefixes are untouched.
    pub fn clear_all(&self) -> Result<()> {
        let keys = self.backend.keys()?;
        let mut removed = 0usize;
        for key in keys.iter().filter(|k| k.starts_with(&self.prefix)) {
            self.backend.remove(key)?;
            removed += 1;
        }
        tracing::debug!(prefix = %self.prefix, removed, "cleared namespace");
        self.notify_subscribers();
        Ok(())
    }

    // ------------------------------------------------------------------
    // Plain values
    // ------------------------------------------------------------------

    /// Write a non-secret value under `key` without encryption, and notify.
    pub fn set_plain(&self, key: &str, value: &str) -> Result<()> {
        self.backend.set(&self.full_key(key), value)?;
        self.notify_subscribers();
        Ok(())
    }

    /// Read a value written with `set_plain`.
    pub fn get_plain(&self, key: &str) -> Result<Option<String>> {
        self.backend.get(&self.full_key(key))
    }

    // ------------------------------------------------------------------
    // Subscriptions
    // ------------------------------------------------------------------

    /// Register a callback run after every `store`, `remove`, `clear_all`
    /// and `set_plain` on this namespace.
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: Fn() + Send + Sync + 'static,
    {
        let callback: Callback = Arc::new(callback);
        self.subscribers.subscribe(callback)
    }

    /// Run every subscriber now.
    pub fn notify_subscribers(&self) {
        self.subscribers.notify();
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::EncryptionConfig;
    use crate::storage::backend::MemoryStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn storage(prefix: &str, backend: Arc<dyn KeyValueStore>) -> SecureStorage {
        let config = EncryptionConfig {
            iterations: 1_000,
            custom_fingerprint: Some("unit-test-fp".into()),
            ..EncryptionConfig::default()
        };
        SecureStorage::new(prefix, SecureEncryption::new(config).unwrap(), backend)
    }

    #[test]
    fn store_writes_prefixed_ciphertext() {
        let backend = Arc::new(MemoryStore::new());
        let s = storage("byoai_", backend.clone());
        s.store("api_key", "secret-value").unwrap();

        let raw = backend.get("byoai_api_key").unwrap().unwrap();
        assert!(!raw.contains("secret-value"));
        assert!(raw.contains("\"version\":\"1.0\""));
        assert_eq!(backend.get("api_key").unwrap(), None);
    }

    #[test]
    fn retrieve_absent_is_none() {
        let s = storage("p_", Arc::new(MemoryStore::new()));
        assert_eq!(s.retrieve("missing").unwrap(), None);
    }

    #[test]
    fn environment_error_propagates_and_keeps_record() {
        let backend = Arc::new(MemoryStore::new());
        storage("p_", backend.clone()).store("k", "v").unwrap();

        let config = EncryptionConfig {
            iterations: 1_000,
            ..EncryptionConfig::default()
        };
        let blind = SecureStorage::new("p_", SecureEncryption::new(config).unwrap(), backend);
        assert!(matches!(
            blind.retrieve("k"),
            Err(ByoaiError::Environment(_))
        ));
        assert!(blind.exists("k").unwrap());
    }

    #[test]
    fn plain_values_are_not_encrypted() {
        let backend = Arc::new(MemoryStore::new());
        let s = storage("byoai_", backend.clone());
        s.set_plain("provider", "gemini").unwrap();
        assert_eq!(
            backend.get("byoai_provider").unwrap().as_deref(),
            Some("gemini")
        );
        assert_eq!(s.get_plain("provider").unwrap().as_deref(), Some("gemini"));
    }

    #[test]
    fn failed_write_does_not_notify() {
        let s = storage("p_", Arc::new(MemoryStore::with_quota(16)));
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        s.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        assert!(matches!(s.store("k", "v"), Err(ByoaiError::StorageWrite(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn every_mutation_notifies() {
        let s = storage("p_", Arc::new(MemoryStore::new()));
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        s.subscribe(move || {
            c.fetch_add(1, Ordering::SeqCst);
        });

        s.store("k", "v").unwrap();
        s.remove("k").unwrap();
        s.set_plain("provider", "gemini").unwrap();
        s.clear_all().unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);

        // Reads never notify.
        s.retrieve("k").unwrap();
        s.exists("k").unwrap();
        s.get_info("k").unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }
}
