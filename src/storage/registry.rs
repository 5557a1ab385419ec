//! One `SecureStorage` per namespace prefix.
//!
//! The registry is owned by the application's composition root and
//! passed by reference; there is no global.  The first `get_instance`
//! call for a prefix fixes that namespace's encryption config.  Later
//! calls with a different config get the existing instance and a
//! warning, not an error.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use super::backend::KeyValueStore;
use super::secure::SecureStorage;
use crate::crypto::{
    Clock, EncryptionConfig, EnvironmentProbe, NoEnvironment, SecureEncryption, SystemClock,
};
use crate::errors::Result;

/// Hands out shared `SecureStorage` instances keyed by prefix.
pub struct StorageRegistry {
    backend: Arc<dyn KeyValueStore>,
    probe: Arc<dyn EnvironmentProbe>,
    clock: Arc<dyn Clock>,
    instances: Mutex<HashMap<String, Arc<SecureStorage>>>,
}

impl StorageRegistry {
    /// A registry whose namespaces all live in `backend`.
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            probe: Arc::new(NoEnvironment),
            clock: Arc::new(SystemClock),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Fingerprint through `probe` instead of requiring an override.
    pub fn with_environment(mut self, probe: Arc<dyn EnvironmentProbe>) -> Self {
        self.probe = probe;
        self
    }

    /// Use `clock` for record timestamps and expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The shared backend.
    pub fn backend(&self) -> &Arc<dyn KeyValueStore> {
        &self.backend
    }

    /// Return the instance for `prefix`, creating it on first use.
    ///
    /// `config` is only used when the instance is created; `None` means
    /// defaults.  A config that differs from the one the instance was
    /// built with is ignored with a warning.
    pub fn get_instance(
        &self,
        prefix: &str,
        config: Option<EncryptionConfig>,
    ) -> Result<Arc<SecureStorage>> {
        let mut instances = self.instances.lock();

        if let Some(existing) = instances.get(prefix) {
            if let Some(requested) = config {
                if &requested != existing.encryption().config() {
                    tracing::warn!(
                        prefix,
                        "storage instance already exists for prefix; encryption config ignored"
                    );
                }
            }
            return Ok(Arc::clone(existing));
        }

        let encryption =
            SecureEncryption::with_environment(config.unwrap_or_default(), self.probe.clone())?
                .with_clock(self.clock.clone());
        let storage = Arc::new(SecureStorage::new(
            prefix,
            encryption,
            Arc::clone(&self.backend),
        ));
        instances.insert(prefix.to_string(), Arc::clone(&storage));
        Ok(storage)
    }

    /// Prefixes with a live instance, sorted.
    pub fn prefixes(&self) -> Vec<String> {
        let mut prefixes: Vec<String> = self.instances.lock().keys().cloned().collect();
        prefixes.sort();
        prefixes
    }
}
