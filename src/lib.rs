//! Bring-your-own-AI key vault.
//!
//! Third-party API keys are encrypted with AES-GCM under a key derived
//! (PBKDF2) from an environment fingerprint, kept in a namespaced
//! key-value store, and handed to a provider adapter per call.
//!
//! The fingerprint is not a secret: this protects keys from casual
//! inspection of the store, not from code running in the same
//! environment, which can always re-derive it.

pub mod cli;
pub mod client;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod provider;
pub mod storage;

pub use client::{Byoai, ByoaiConfig};
pub use errors::{ByoaiError, Result};
