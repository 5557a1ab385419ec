//! AES-GCM record encryption bound to the environment fingerprint.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce,
//! re-derives the key from the current fingerprint and serializes an
//! [`EncryptedRecord`] to JSON.  `decrypt` checks expiry before touching
//! the ciphertext, then re-derives the key and verifies the auth tag.
//!
//! A wrong key, a flipped byte, a foreign nonce and a fingerprint that
//! changed since encryption all surface as the same `DecryptionFailed`.

use std::fmt;
use std::sync::Arc;

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, KeyInit, OsRng};
use aes_gcm::{AeadCore, Aes128Gcm, Aes256Gcm, Nonce};
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::fingerprint::{EnvironmentProbe, FingerprintDeriver, NoEnvironment};
use super::kdf::{derive_key, DerivedKey};
use super::record::{
    expired_at, Clock, EncryptedRecord, RecordHeader, StorageInfo, SystemClock, NONCE_LEN,
    RECORD_VERSION,
};
use crate::errors::{ByoaiError, Result};

// ---------------------------------------------------------------------------
// EncryptionConfig
// ---------------------------------------------------------------------------

/// Parameters for key derivation and record expiry.
///
/// Loaded from the `[encryption]` table of `.byoai.toml`; every field
/// has a default.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionConfig {
    /// Appended to the fingerprint and used as the PBKDF2 salt.
    #[serde(default = "default_salt_suffix")]
    pub salt_suffix: String,

    /// PBKDF2 rounds (default: 100 000).
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// AES key length in bits, 128 or 256 (default: 256).
    #[serde(default = "default_key_length")]
    pub key_length: u32,

    /// Records at least this old are rejected (default: 30 days).
    #[serde(default = "default_max_age_ms")]
    pub max_age_ms: u64,

    /// Overrides environment fingerprinting when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_fingerprint: Option<String>,
}

fn default_salt_suffix() -> String {
    "byoai_v1".to_string()
}

fn default_iterations() -> u32 {
    100_000
}

fn default_key_length() -> u32 {
    256
}

fn default_max_age_ms() -> u64 {
    30 * 24 * 60 * 60 * 1000 // 30 days
}

impl Default for EncryptionConfig {
    fn default() -> Self {
        Self {
            salt_suffix: default_salt_suffix(),
            iterations: default_iterations(),
            key_length: default_key_length(),
            max_age_ms: default_max_age_ms(),
            custom_fingerprint: None,
        }
    }
}

impl fmt::Debug for EncryptionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionConfig")
            .field("salt_suffix", &self.salt_suffix)
            .field("iterations", &self.iterations)
            .field("key_length", &self.key_length)
            .field("max_age_ms", &self.max_age_ms)
            .field(
                "custom_fingerprint",
                &self.custom_fingerprint.as_ref().map(|_| "<redacted>"),
            )
            .finish()
    }
}

impl EncryptionConfig {
    /// Reject settings that cannot produce a usable key.
    pub fn validate(&self) -> Result<()> {
        if self.salt_suffix.is_empty() {
            return Err(ByoaiError::KeyDerivationFailed(
                "salt_suffix cannot be empty".into(),
            ));
        }
        if self.iterations < 1 {
            return Err(ByoaiError::KeyDerivationFailed(
                "iterations must be at least 1".into(),
            ));
        }
        if !matches!(self.key_length, 128 | 256) {
            return Err(ByoaiError::KeyDerivationFailed(format!(
                "key_length must be 128 or 256 (got {})",
                self.key_length
            )));
        }
        if self.max_age_ms == 0 {
            return Err(ByoaiError::KeyDerivationFailed(
                "max_age_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// SecureEncryption
// ---------------------------------------------------------------------------

/// Encrypts and decrypts UTF-8 strings into JSON records.
///
/// The config is fixed at construction.
pub struct SecureEncryption {
    config: EncryptionConfig,
    fingerprint: FingerprintDeriver,
    clock: Arc<dyn Clock>,
}

impl SecureEncryption {
    /// Build an encryptor for a host without environment attributes.
    ///
    /// Such hosts need `custom_fingerprint`; without it every operation
    /// fails with `Environment`.
    pub fn new(config: EncryptionConfig) -> Result<Self> {
        Self::with_environment(config, Arc::new(NoEnvironment))
    }

    /// Build an encryptor that fingerprints through `probe`.
    pub fn with_environment(
        config: EncryptionConfig,
        probe: Arc<dyn EnvironmentProbe>,
    ) -> Result<Self> {
        config.validate()?;
        let fingerprint = FingerprintDeriver::new(config.custom_fingerprint.clone(), probe);
        Ok(Self {
            config,
            fingerprint,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for timestamps and expiry.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn config(&self) -> &EncryptionConfig {
        &self.config
    }

    /// Encrypt `plaintext` and return the serialized record.
    pub fn encrypt(&self, plaintext: &str) -> Result<String> {
        let key = self.current_key()?;

        // Fresh nonce per call; never cached.
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);

        let data = seal(&key, &nonce, plaintext.as_bytes())?;

        let record = EncryptedRecord {
            data,
            iv: nonce.to_vec(),
            timestamp: self.clock.now_ms(),
            version: RECORD_VERSION.to_string(),
        };

        serde_json::to_string(&record)
            .map_err(|e| ByoaiError::EncryptionFailed(format!("record serialization: {e}")))
    }

    /// Decrypt a serialized record.
    ///
    /// Fails with `Expired` before any crypto work when the record is too
    /// old, and with `DecryptionFailed` for anything malformed or forged.
    pub fn decrypt(&self, serialized: &str) -> Result<String> {
        let record = EncryptedRecord::from_json(serialized).ok_or(ByoaiError::DecryptionFailed)?;

        if record.version != RECORD_VERSION {
            tracing::debug!(version = %record.version, "unsupported record version");
            return Err(ByoaiError::DecryptionFailed);
        }

        if record.is_expired(self.clock.now_ms(), self.config.max_age_ms) {
            return Err(ByoaiError::Expired);
        }

        if record.iv.len() != NONCE_LEN {
            return Err(ByoaiError::DecryptionFailed);
        }

        let key = self.current_key()?;
        let nonce = Nonce::from_slice(&record.iv);
        let plaintext = Zeroizing::new(open(&key, nonce, &record.data)?);

        String::from_utf8(plaintext.to_vec()).map_err(|_| ByoaiError::DecryptionFailed)
    }

    /// Read timestamp/version/expiry without decrypting.
    ///
    /// Returns `None` on malformed input instead of an error.
    pub fn storage_info(&self, serialized: &str) -> Option<StorageInfo> {
        let header: RecordHeader = serde_json::from_str(serialized).ok()?;
        let is_expired = expired_at(header.timestamp, self.clock.now_ms(), self.config.max_age_ms);
        Some(StorageInfo {
            timestamp: header.timestamp,
            version: header.version,
            is_expired,
        })
    }

    fn current_key(&self) -> Result<DerivedKey> {
        let fingerprint = Zeroizing::new(self.fingerprint.fingerprint()?);
        derive_key(
            &fingerprint,
            &self.config.salt_suffix,
            self.config.iterations,
            self.config.key_length,
        )
    }
}

/// AES-GCM encrypt with a 16- or 32-byte key.
fn seal(key: &DerivedKey, nonce: &Nonce<U12>, plaintext: &[u8]) -> Result<Vec<u8>> {
    let out = match key.len() {
        16 => Aes128Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| ByoaiError::EncryptionFailed(format!("invalid key length: {e}")))?
            .encrypt(nonce, plaintext),
        _ => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|e| ByoaiError::EncryptionFailed(format!("invalid key length: {e}")))?
            .encrypt(nonce, plaintext),
    };
    out.map_err(|e| ByoaiError::EncryptionFailed(format!("encryption error: {e}")))
}

/// AES-GCM decrypt and verify the tag.
fn open(key: &DerivedKey, nonce: &Nonce<U12>, data: &[u8]) -> Result<Vec<u8>> {
    let out = match key.len() {
        16 => Aes128Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| ByoaiError::DecryptionFailed)?
            .decrypt(nonce, data),
        _ => Aes256Gcm::new_from_slice(key.as_bytes())
            .map_err(|_| ByoaiError::DecryptionFailed)?
            .decrypt(nonce, data),
    };
    out.map_err(|_| ByoaiError::DecryptionFailed)
}
