//! X25519 key agreement between long-lived identities.
//!
//! Agreement is static-static: each side combines its own secret with the
//! peer's published key and both arrive at the same [`SharedSecret`]. Nothing
//! ephemeral travels with a message, so the same pair of identities always
//! derives the same key.
//!
//! Secrets wrap the `x25519-dalek` types and are zeroized on drop.

use std::fmt;

use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use x25519_dalek::{PublicKey, StaticSecret};

use crate::error::decode_hex;
use crate::{CryptoError, Result, SymmetricKey};

/// Public key length in bytes.
pub const PUBLIC_KEY_SIZE: usize = 32;

/// Secret key length in bytes.
pub const PRIVATE_KEY_SIZE: usize = 32;

/// A published X25519 key. Serializes as lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct X25519PublicKey([u8; PUBLIC_KEY_SIZE]);

impl X25519PublicKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` unless `bytes` is exactly 32 long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; PUBLIC_KEY_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: PUBLIC_KEY_SIZE,
                actual: bytes.len(),
            })
    }

    /// Parse the lowercase hex carried in message metadata.
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw key bytes.
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_SIZE] {
        &self.0
    }

    /// Copy of the raw key bytes.
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_SIZE] {
        self.0
    }
}

impl TryFrom<String> for X25519PublicKey {
    type Error = CryptoError;

    fn try_from(s: String) -> Result<Self> {
        Self::from_hex(&s)
    }
}

impl From<X25519PublicKey> for String {
    fn from(key: X25519PublicKey) -> Self {
        key.to_hex()
    }
}

impl fmt::Debug for X25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X25519PublicKey({}..)", hex::encode(&self.0[..4]))
    }
}

impl From<PublicKey> for X25519PublicKey {
    fn from(key: PublicKey) -> Self {
        Self(key.to_bytes())
    }
}

/// A long-lived X25519 secret.
///
/// Deliberately not `Clone`.
pub struct X25519StaticPrivateKey(StaticSecret);

impl X25519StaticPrivateKey {
    /// Draw a secret from the OS RNG.
    pub fn generate() -> Self {
        Self(StaticSecret::random_from_rng(OsRng))
    }

    /// Wrap raw secret bytes.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` unless `bytes` is exactly 32 long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; PRIVATE_KEY_SIZE]>::try_from(bytes)
            .map(Self::from)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: PRIVATE_KEY_SIZE,
                actual: bytes.len(),
            })
    }

    /// The matching public key.
    pub fn public_key(&self) -> X25519PublicKey {
        PublicKey::from(&self.0).into()
    }

    /// Agree on a secret with `peer`.
    pub fn diffie_hellman(&self, peer: &X25519PublicKey) -> SharedSecret {
        SharedSecret(self.0.diffie_hellman(&PublicKey::from(peer.0)))
    }

    /// Raw secret bytes, for export only.
    pub fn as_bytes(&self) -> &[u8; PRIVATE_KEY_SIZE] {
        self.0.as_bytes()
    }
}

impl From<[u8; PRIVATE_KEY_SIZE]> for X25519StaticPrivateKey {
    fn from(bytes: [u8; PRIVATE_KEY_SIZE]) -> Self {
        Self(StaticSecret::from(bytes))
    }
}

impl fmt::Debug for X25519StaticPrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("X25519StaticPrivateKey([REDACTED])")
    }
}

/// Raw output of [`X25519StaticPrivateKey::diffie_hellman`].
///
/// Feed it through [`SharedSecret::derive_key`] before use as a key.
pub struct SharedSecret(x25519_dalek::SharedSecret);

impl SharedSecret {
    /// Raw agreement bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        self.0.as_bytes()
    }

    /// BLAKE3 `derive_key` over the agreement, bound to `context`.
    pub fn derive_key(&self, context: &str) -> [u8; 32] {
        blake3::derive_key(context, self.0.as_bytes())
    }

    /// [`SharedSecret::derive_key`] as a ChaCha20-Poly1305 key.
    pub fn derive_symmetric_key(&self, context: &str) -> SymmetricKey {
        SymmetricKey::from(self.derive_key(context))
    }
}

impl fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SharedSecret([REDACTED])")
    }
}
