//! Environment fingerprinting.
//!
//! The fingerprint stands in for a password: it is the input keying
//! material for PBKDF2.  It is composed from attributes of the running
//! environment (user agent, language, screen size, timezone offset,
//! origin), joined with `|` and hashed with SHA-256.
//!
//! Threat model: this only protects stored records against casual
//! inspection of the persistent store.  Anything able to run code in
//! the same environment can recompute the fingerprint.
//!
//! Hosts without those attributes must supply a custom fingerprint.
//! There is deliberately no fallback value: a guessed fingerprint would
//! derive a different key on the next load and every stored record
//! would silently stop decrypting.

use std::sync::Arc;

use sha2::{Digest, Sha256};

use crate::errors::{ByoaiError, Result};

/// Separator between fingerprint components.
const DELIMITER: &str = "|";

/// The environment attributes that feed the fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentInfo {
    pub user_agent: String,
    pub language: String,
    pub screen_width: u32,
    pub screen_height: u32,
    /// Offset from UTC in minutes, signed as the host reports it.
    pub timezone_offset_minutes: i32,
    /// Scheme + host + port of the running context.
    pub origin: String,
}

impl EnvironmentInfo {
    /// The delimited string that gets hashed.
    fn components(&self) -> String {
        [
            self.user_agent.clone(),
            self.language.clone(),
            format!("{}x{}", self.screen_width, self.screen_height),
            self.timezone_offset_minutes.to_string(),
            self.origin.clone(),
        ]
        .join(DELIMITER)
    }
}

/// Source of environment attributes.
///
/// A browser host implements this over `navigator`, `screen` and
/// `location`.  Returning `None` means the attributes are not available.
pub trait EnvironmentProbe: Send + Sync {
    fn probe(&self) -> Option<EnvironmentInfo>;
}

/// A probe for hosts that expose no environment at all (CLI, servers).
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEnvironment;

impl EnvironmentProbe for NoEnvironment {
    fn probe(&self) -> Option<EnvironmentInfo> {
        None
    }
}

/// A probe that always reports the same attributes.
#[derive(Debug, Clone)]
pub struct StaticEnvironment(pub EnvironmentInfo);

impl EnvironmentProbe for StaticEnvironment {
    fn probe(&self) -> Option<EnvironmentInfo> {
        Some(self.0.clone())
    }
}

/// Produces the fingerprint used for key derivation.
#[derive(Clone)]
pub struct FingerprintDeriver {
    custom: Option<String>,
    probe: Arc<dyn EnvironmentProbe>,
}

impl FingerprintDeriver {
    pub fn new(custom: Option<String>, probe: Arc<dyn EnvironmentProbe>) -> Self {
        Self { custom, probe }
    }

    /// Return the fingerprint for the current environment.
    ///
    /// A configured custom fingerprint is returned verbatim.  Otherwise
    /// the probed attributes are hashed to a 64-char lowercase hex string.
    pub fn fingerprint(&self) -> Result<String> {
        if let Some(custom) = self.custom.as_deref().filter(|c| !c.is_empty()) {
            return Ok(custom.to_string());
        }

        let info = self.probe.probe().ok_or_else(|| {
            ByoaiError::Environment(
                "no user agent, language, screen, timezone or origin to fingerprint".into(),
            )
        })?;

        Ok(hash_components(&info))
    }
}

/// SHA-256 of the delimited components, hex encoded.
fn hash_components(info: &EnvironmentInfo) -> String {
    let digest = Sha256::digest(info.components().as_bytes());
    hex::encode(digest)
}
