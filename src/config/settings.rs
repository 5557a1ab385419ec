use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::client::ByoaiConfig;
use crate::crypto::EncryptionConfig;
use crate::errors::{ByoaiError, Result};

/// Project-level configuration, loaded from `.byoai.toml`.
///
/// Every field has a sensible default so BYOAI works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Namespace prefix for every stored key (e.g. "byoai_").
    #[serde(default = "default_storage_prefix")]
    pub storage_prefix: String,

    /// Provider used until one is selected with `byoai provider`.
    #[serde(default = "default_provider")]
    pub default_provider: String,

    /// Directory (relative to project root) where the store lives.
    #[serde(default = "default_store_dir")]
    pub store_dir: String,

    /// Key derivation and expiry parameters.
    #[serde(default)]
    pub encryption: EncryptionConfig,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_storage_prefix() -> String {
    "byoai_".to_string()
}

fn default_provider() -> String {
    "gemini".to_string()
}

fn default_store_dir() -> String {
    ".byoai".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_prefix: default_storage_prefix(),
            default_provider: default_provider(),
            store_dir: default_store_dir(),
            encryption: EncryptionConfig::default(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the project root.
    const FILE_NAME: &'static str = ".byoai.toml";

    /// Load settings from `<project_dir>/.byoai.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            ByoaiError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Directory holding the persistent store.
    ///
    /// Example: `project_dir/.byoai`
    pub fn store_dir_path(&self, project_dir: &Path) -> PathBuf {
        project_dir.join(&self.store_dir)
    }

    /// Full path of the store file.
    ///
    /// `store.db` with the SQLite backend, `store.json` without it.
    pub fn store_path(&self, project_dir: &Path) -> PathBuf {
        let file = if cfg!(feature = "sqlite-store") {
            "store.db"
        } else {
            "store.json"
        };
        self.store_dir_path(project_dir).join(file)
    }

    /// Convert into the library-level client config.
    pub fn byoai_config(&self) -> ByoaiConfig {
        ByoaiConfig {
            storage_prefix: self.storage_prefix.clone(),
            default_provider: Some(self.default_provider.clone())
                .filter(|id| !id.is_empty()),
            encryption: self.encryption.clone(),
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────
