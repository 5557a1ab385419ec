use thiserror::Error;

/// All errors that can occur in BYOAI.
#[derive(Debug, Error)]
pub enum ByoaiError {
    // --- Crypto errors ---
    #[error(
        "Environment unavailable: {0} — provide a custom fingerprint (--fingerprint, BYOAI_FINGERPRINT or encryption.custom_fingerprint)"
    )]
    Environment(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed — record was tampered with, corrupted, or written in another environment")]
    DecryptionFailed,

    #[error("Stored data has expired")]
    Expired,

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Storage errors ---
    #[error("Storage write failed: {0}")]
    StorageWrite(String),

    #[error("Storage read failed: {0}")]
    StorageRead(String),

    // --- Provider errors ---
    #[error("Provider '{0}' is not registered")]
    ProviderNotFound(String),

    #[error("No provider configured")]
    NoProvider,

    #[error("Invalid API key: {0}")]
    InvalidApiKey(String),

    #[error("API request failed: {0}")]
    ProviderRequest(String),

    #[error("Authentication failed — API key may be invalid")]
    AuthenticationFailed,

    #[error("Unexpected API response structure")]
    UnexpectedResponse,

    #[error("HTTP transport not compiled — rebuild with `cargo build --features http`")]
    TransportUnavailable,

    #[error("No API key configured — run `byoai set-key` first")]
    NoApiKey,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for BYOAI results.
pub type Result<T> = std::result::Result<T, ByoaiError>;
