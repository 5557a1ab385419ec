//! Cryptographic primitives for BYOAI.
//!
//! This module provides:
//! - Environment fingerprinting (`fingerprint`)
//! - PBKDF2-HMAC-SHA256 key derivation from the fingerprint (`kdf`)
//! - The persisted record format and clocks (`record`)
//! - AES-GCM record encryption with expiry (`encryption`)

pub mod encryption;
pub mod fingerprint;
pub mod kdf;
pub mod record;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{SecureEncryption, EncryptionConfig, ...};
pub use encryption::{EncryptionConfig, SecureEncryption};
pub use fingerprint::{
    EnvironmentInfo, EnvironmentProbe, FingerprintDeriver, NoEnvironment, StaticEnvironment,
};
pub use kdf::{derive_key, DerivedKey};
pub use record::{Clock, EncryptedRecord, ManualClock, StorageInfo, SystemClock, RECORD_VERSION};
