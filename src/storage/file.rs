//! JSON file backend.
//!
//! The whole store is one JSON object (`{"key": "value", ...}`) on disk.
//! Every operation re-reads the file so separate processes see each
//! other's writes.  Writes go to a temp file in the same directory and
//! are renamed over the target, so readers never see a half-written file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use super::backend::KeyValueStore;
use crate::errors::{ByoaiError, Result};

/// A `KeyValueStore` persisted as a single JSON file.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles within this process.
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Open (without creating) a store at `path`.
    ///
    /// The file and its parent directory are created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| {
            ByoaiError::StorageRead(format!("{}: {e}", self.path.display()))
        })?;
        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&contents).map_err(|e| {
            ByoaiError::StorageRead(format!("{} is not a JSON object: {e}", self.path.display()))
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|e| ByoaiError::StorageWrite(format!("serialize: {e}")))?;

        let parent = self.path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let tmp_path = parent.join(format!(
            ".{}.tmp",
            self.path.file_name().unwrap_or_default().to_string_lossy()
        ));

        fs::write(&tmp_path, &bytes).map_err(write_err)?;
        restrict_permissions(&tmp_path);
        fs::rename(&tmp_path, &self.path).map_err(write_err)?;
        Ok(())
    }
}

fn write_err(e: std::io::Error) -> ByoaiError {
    ByoaiError::StorageWrite(e.to_string())
}

/// Owner-only access on unix; best effort.
fn restrict_permissions(path: &Path) {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = fs::Permissions::from_mode(0o600);
        let _ = fs::set_permissions(path, perms);
    }
    #[cfg(not(unix))]
    let _ = path;
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock();
        let mut entries = self.load()?;
        if entries.remove(key).is_some() {
            self.persist(&entries)?;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock();
        Ok(self.load()?.into_keys().collect())
    }
}
