//! Error types for protocol operations.
//!
//! Every failure is a local, deterministic validation outcome. Each kind has
//! its own variant so callers can choose a policy without string matching.

use envoy_crypto::CryptoError;
use envoy_identity::IdentityError;
use thiserror::Error;

/// Errors that can occur during protocol operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// An identity name does not follow the `@@node[/sub...]` grammar.
    #[error("Malformed identity: {0}")]
    MalformedIdentity(String),

    /// A required builder input is empty, missing or out of range.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A content schema tag is not in the registry.
    #[error("Unknown schema: '{0}'")]
    UnknownSchema(String),

    /// The envelope bytes are not a structurally valid envelope.
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    /// The envelope declares a protocol version this crate does not speak.
    #[error("Unsupported protocol version: '{0}'")]
    UnsupportedVersion(String),

    /// Authenticated decryption failed (tampered data or wrong keys).
    #[error("Failed to decrypt message body")]
    DecryptionFailed,

    /// Ciphertext text is not `encrypted:<hex>` or is shorter than nonce and tag.
    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    /// Signature is missing, malformed or does not match the claimed sender.
    #[error("Invalid signature")]
    SignatureInvalid,

    /// A payload could not be serialized or parsed as JSON.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Any other cryptographic failure (for example a key of the wrong size).
    #[error("Crypto error: {0}")]
    Crypto(#[source] CryptoError),
}

impl From<CryptoError> for ProtocolError {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::Decryption => Self::DecryptionFailed,
            CryptoError::CiphertextTooShort { .. } => Self::MalformedCiphertext(err.to_string()),
            CryptoError::SignatureVerification => Self::SignatureInvalid,
            other => Self::Crypto(other),
        }
    }
}

impl From<IdentityError> for ProtocolError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MalformedIdentity { .. } => Self::MalformedIdentity(err.to_string()),
            IdentityError::MalformedInbox { .. } => Self::InvalidArgument(err.to_string()),
            IdentityError::Crypto(inner) => inner.into(),
        }
    }
}

/// Result type for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crypto_errors_map_to_protocol_kinds() {
        assert_eq!(
            ProtocolError::from(CryptoError::Decryption),
            ProtocolError::DecryptionFailed
        );
        assert!(matches!(
            ProtocolError::from(CryptoError::CiphertextTooShort { min: 28, actual: 3 }),
            ProtocolError::MalformedCiphertext(_)
        ));
        assert_eq!(
            ProtocolError::from(CryptoError::SignatureVerification),
            ProtocolError::SignatureInvalid
        );
        assert!(matches!(
            ProtocolError::from(CryptoError::InvalidKeyLength { expected: 32, actual: 1 }),
            ProtocolError::Crypto(_)
        ));
    }

    #[test]
    fn test_identity_errors_map_to_protocol_kinds() {
        let malformed = envoy_identity::IdentityName::parse("nope").unwrap_err();
        assert!(matches!(
            ProtocolError::from(malformed),
            ProtocolError::MalformedIdentity(_)
        ));

        let bad_inbox = envoy_identity::InboxName::parse("nope").unwrap_err();
        assert!(matches!(
            ProtocolError::from(bad_inbox),
            ProtocolError::InvalidArgument(_)
        ));
    }
}
