//! Error types for cryptographic operations.

use thiserror::Error;

/// Errors that can occur during cryptographic operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CryptoError {
    /// Encryption failed.
    #[error("Encryption failed: {0}")]
    Encryption(String),

    /// Decryption failed (authentication tag mismatch or wrong key).
    #[error("Decryption failed: invalid ciphertext or key")]
    Decryption,

    /// Ciphertext is shorter than the nonce and tag it must carry.
    #[error("Ciphertext too short: need at least {min} bytes, got {actual}")]
    CiphertextTooShort {
        /// Minimum accepted length.
        min: usize,
        /// Actual length.
        actual: usize,
    },

    /// Signature verification failed.
    #[error("Signature verification failed")]
    SignatureVerification,

    /// Bytes do not encode a valid public key.
    #[error("Invalid public key")]
    InvalidPublicKey,

    /// Invalid key length.
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length.
        expected: usize,
        /// Actual key length.
        actual: usize,
    },

    /// Invalid nonce length.
    #[error("Invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength {
        /// Expected nonce length.
        expected: usize,
        /// Actual nonce length.
        actual: usize,
    },

    /// Invalid signature length.
    #[error("Invalid signature length: expected {expected}, got {actual}")]
    InvalidSignatureLength {
        /// Expected signature length.
        expected: usize,
        /// Actual signature length.
        actual: usize,
    },

    /// Invalid hash length.
    #[error("Invalid hash length: expected {expected}, got {actual}")]
    InvalidHashLength {
        /// Expected hash length.
        expected: usize,
        /// Actual hash length.
        actual: usize,
    },

    /// Invalid hex string format.
    #[error("Invalid hex string: {0}")]
    InvalidHexFormat(String),
}

/// Result type for cryptographic operations.
pub type Result<T> = std::result::Result<T, CryptoError>;

/// Decode a hex string, mapping failures to [`CryptoError::InvalidHexFormat`].
pub(crate) fn decode_hex(s: &str) -> Result<Vec<u8>> {
    hex::decode(s).map_err(|e| CryptoError::InvalidHexFormat(e.to_string()))
}
