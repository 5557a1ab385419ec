//! Fingerprint-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! Input keying material is `fingerprint + salt_suffix`, the salt is
//! `salt_suffix` itself.  The same fingerprint and config always yield
//! the same key, so records survive restarts without any stored secret.

use hmac::Hmac;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::errors::{ByoaiError, Result};

/// Largest supported key (AES-256).
pub const MAX_KEY_LEN: usize = 32;

/// A derived AES key whose bytes are wiped on drop.
///
/// Only `len()` bytes of the buffer are meaningful (16 or 32).  The key
/// never leaves the crypto module in raw form.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    bytes: [u8; MAX_KEY_LEN],
    len: usize,
}

impl DerivedKey {
    /// Raw key bytes, exactly `key_length / 8` long.
    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    /// Key length in bytes.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Derive a symmetric key from a fingerprint.
///
/// `key_length_bits` must be 128 or 256.  `iterations` must be non-zero.
pub fn derive_key(
    fingerprint: &str,
    salt_suffix: &str,
    iterations: u32,
    key_length_bits: u32,
) -> Result<DerivedKey> {
    if iterations < 1 {
        return Err(ByoaiError::KeyDerivationFailed(
            "PBKDF2 iterations must be at least 1".into(),
        ));
    }
    let len = match key_length_bits {
        128 => 16,
        256 => 32,
        other => {
            return Err(ByoaiError::KeyDerivationFailed(format!(
                "unsupported key length {other} bits — use 128 or 256"
            )))
        }
    };

    let mut ikm = format!("{fingerprint}{salt_suffix}").into_bytes();

    let mut key = DerivedKey {
        bytes: [0u8; MAX_KEY_LEN],
        len,
    };
    let outcome = pbkdf2::pbkdf2::<Hmac<Sha256>>(
        &ikm,
        salt_suffix.as_bytes(),
        iterations,
        &mut key.bytes[..len],
    );
    ikm.zeroize();

    outcome.map_err(|e| ByoaiError::KeyDerivationFailed(format!("PBKDF2 failed: {e}")))?;
    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_inputs_same_key() {
        let a = derive_key("fp", "byoai_v1", 1_000, 256).unwrap();
        let b = derive_key("fp", "byoai_v1", 1_000, 256).unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn fingerprint_changes_key() {
        let a = derive_key("fp-one", "byoai_v1", 1_000, 256).unwrap();
        let b = derive_key("fp-two", "byoai_v1", 1_000, 256).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn salt_suffix_changes_key() {
        let a = derive_key("fp", "byoai_v1", 1_000, 256).unwrap();
        let b = derive_key("fp", "byoai_v2", 1_000, 256).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn iteration_count_changes_key() {
        let a = derive_key("fp", "byoai_v1", 1_000, 256).unwrap();
        let b = derive_key("fp", "byoai_v1", 1_001, 256).unwrap();
        assert_ne!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn aes128_key_is_16_bytes() {
        let key = derive_key("fp", "byoai_v1", 1_000, 128).unwrap();
        assert_eq!(key.as_bytes().len(), 16);
    }

    #[test]
    fn rejects_unsupported_key_length() {
        assert!(derive_key("fp", "s", 1_000, 192).is_err());
        assert!(derive_key("fp", "s", 1_000, 512).is_err());
    }

    #[test]
    fn rejects_zero_iterations() {
        assert!(derive_key("fp", "s", 0, 256).is_err());
    }

    #[test]
    fn matches_pbkdf2_reference_layout() {
        // ikm = fingerprint || suffix, salt = suffix
        let key = derive_key("abc", "xyz", 1, 256).unwrap();
        let mut expected = [0u8; 32];
        pbkdf2::pbkdf2::<Hmac<Sha256>>(b"abcxyz", b"xyz", 1, &mut expected).unwrap();
        assert_eq!(key.as_bytes(), &expected);
    }
}
