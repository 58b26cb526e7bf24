//! Ed25519 detached signatures.
//!
//! Signing is deterministic: one key and one message always give the same
//! 64 bytes. Public keys serialize as lowercase hex, the form they take in
//! registration payloads.

use std::fmt;

use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};

use crate::error::decode_hex;
use crate::{CryptoError, Result};

/// Public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Secret seed length in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// Signature length in bytes.
pub const SIGNATURE_SIZE: usize = 64;

/// Key that verifies envelope signatures.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ed25519PublicKey(VerifyingKey);

impl Ed25519PublicKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` for the wrong size, `InvalidPublicKey` when the
    /// bytes are not a curve point.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let raw = <[u8; PUBLIC_KEY_SIZE]>::try_from(bytes).map_err(|_| {
            CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            }
        })?;
        VerifyingKey::from_bytes(&raw)
            .map(Self)
            .map_err(|_| CryptoError::InvalidPublicKey)
    }

    /// Parse lowercase hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0.as_bytes())
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        self.0.as_bytes()
    }

    /// Check `signature` over `message`.
    ///
    /// # Errors
    ///
    /// `SignatureVerification` if it was not made by this key over exactly
    /// these bytes.
    pub fn verify(&self, message: &[u8], signature: &Ed25519Signature) -> Result<()> {
        self.0
            .verify(message, &Signature::from_bytes(&signature.0))
            .map_err(|_| CryptoError::SignatureVerification)
    }
}

impl TryFrom<String> for Ed25519PublicKey {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<Ed25519PublicKey> for String {
    fn from(key: Ed25519PublicKey) -> Self {
        key.to_hex()
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({}..)", hex::encode(&self.as_bytes()[..4]))
    }
}

/// Signing key, held as its 32-byte seed.
///
/// Zeroized on drop. Deliberately not `Clone`.
pub struct Ed25519PrivateKey(SigningKey);

impl Ed25519PrivateKey {
    /// Draw a key from the OS RNG.
    pub fn generate() -> Self {
        Self(SigningKey::generate(&mut OsRng))
    }

    /// Wrap a 32-byte seed.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` for any other size.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; PRIVATE_KEY_SIZE]>::try_from(bytes)
            .map(Self::from)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            })
    }

    /// The matching verification key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey(self.0.verifying_key())
    }

    /// Sign `message`.
    pub fn sign(&self, message: &[u8]) -> Ed25519Signature {
        Ed25519Signature(self.0.sign(message).to_bytes())
    }

    /// The seed, for export only.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        self.0.as_bytes()
    }
}

impl From<[u8; PRIVATE_KEY_SIZE]> for Ed25519PrivateKey {
    fn from(seed: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(SigningKey::from_bytes(&seed))
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ed25519PrivateKey([REDACTED])")
    }
}

/// A detached signature.
#[derive(Clone, PartialEq, Eq)]
pub struct Ed25519Signature([u8; SIGNATURE_SIZE]);

impl Ed25519Signature {
    /// Wrap raw signature bytes.
    ///
    /// # Errors
    ///
    /// `InvalidSignatureLength` unless `bytes` is exactly 64 long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; SIGNATURE_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidSignatureLength {
                expected: SIGNATURE_SIZE,
                actual: bytes.len(),
            })
    }

    /// Parse lowercase hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Lowercase hex, 128 characters.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw signature bytes.
    pub fn as_bytes(&self) -> &[u8; SIGNATURE_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Ed25519Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519Signature({}..)", hex::encode(&self.0[..4]))
    }
}
