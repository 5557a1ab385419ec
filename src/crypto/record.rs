//! The persisted record format and the clock used to stamp it.
//!
//! A record is stored as a JSON object:
//!
//! ```text
//! { "data": [u8, ...], "iv": [u8; 12], "timestamp": <epoch ms>, "version": "1.0" }
//! ```
//!
//! `data` is the AES-GCM output (ciphertext followed by the 16-byte tag).
//! Byte arrays are serialized as integer arrays, not base64, so records
//! written by a browser host and by this crate are interchangeable.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Current record format tag.
pub const RECORD_VERSION: &str = "1.0";

/// AES-GCM nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// One encrypted, timestamped, versioned secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedRecord {
    /// Ciphertext + auth tag.
    pub data: Vec<u8>,
    /// Random nonce, fresh for every encryption.
    pub iv: Vec<u8>,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    pub version: String,
}

impl EncryptedRecord {
    /// Parse a record from its JSON transport string.
    pub fn from_json(serialized: &str) -> Option<Self> {
        serde_json::from_str(serialized).ok()
    }

    /// Whether the record is at least `max_age_ms` old at `now_ms`.
    pub fn is_expired(&self, now_ms: i64, max_age_ms: u64) -> bool {
        expired_at(self.timestamp, now_ms, max_age_ms)
    }
}

/// Shared expiry rule: `now - timestamp >= max_age`.
pub(crate) fn expired_at(timestamp: i64, now_ms: i64, max_age_ms: u64) -> bool {
    let age = now_ms.saturating_sub(timestamp);
    age >= 0 && age.unsigned_abs() >= max_age_ms
}

/// Metadata readable without the key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageInfo {
    pub timestamp: i64,
    pub version: String,
    pub is_expired: bool,
}

/// Only the fields needed for `StorageInfo`.  Parsing this instead of the
/// full record keeps metadata available even when the byte arrays are
/// damaged.
#[derive(Deserialize)]
pub(crate) struct RecordHeader {
    pub timestamp: i64,
    pub version: String,
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Source of "now" in epoch milliseconds.
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> i64;
}

/// Wall-clock time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// A clock that only moves when told to.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicI64,
}

impl ManualClock {
    pub fn new(start_ms: i64) -> Self {
        Self {
            now: AtomicI64::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: i64) {
        self.now.store(now_ms, Ordering::SeqCst);
    }

    pub fn advance(&self, delta_ms: i64) {
        self.now.fetch_add(delta_ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}
