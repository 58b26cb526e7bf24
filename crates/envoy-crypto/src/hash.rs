//! BLAKE3 digests.
//!
//! [`Hash256`] is the digest that envelope signatures cover and the source of
//! fixed-width storage keys. Equality is constant time.

use std::fmt;

use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;

use crate::error::decode_hex;
use crate::{CryptoError, Result};

/// A 32-byte BLAKE3 digest.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct Hash256([u8; Hash256::SIZE]);

impl Hash256 {
    /// Digest length in bytes.
    pub const SIZE: usize = 32;

    /// Digest of `data`.
    pub fn hash(data: &[u8]) -> Self {
        Self(blake3::hash(data).into())
    }

    /// Digest of several inputs, each prefixed with its length so that
    /// `["ab", "c"]` and `["a", "bc"]` differ.
    pub fn hash_many(inputs: &[&[u8]]) -> Self {
        let mut hasher = blake3::Hasher::new();
        for input in inputs {
            hasher.update(&(input.len() as u64).to_le_bytes());
            hasher.update(input);
        }
        Self(hasher.finalize().into())
    }

    /// Wrap an existing digest.
    ///
    /// # Errors
    ///
    /// `InvalidHashLength` unless `bytes` is exactly 32 long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; Self::SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidHashLength {
                expected: Self::SIZE,
                actual: bytes.len(),
            })
    }

    /// Parse 64 hex characters.
    ///
    /// # Errors
    ///
    /// `InvalidHashLength` for any other length, `InvalidHexFormat` for
    /// non-hex input.
    pub fn from_hex(s: &str) -> Result<Self> {
        if s.len() != 2 * Self::SIZE {
            return Err(CryptoError::InvalidHashLength {
                expected: 2 * Self::SIZE,
                actual: s.len(),
            });
        }
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; Self::SIZE] {
        &self.0
    }

    /// Lowercase hex.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl ConstantTimeEq for Hash256 {
    fn ct_eq(&self, other: &Self) -> subtle::Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for Hash256 {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for Hash256 {}

impl fmt::Debug for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash256({})", hex::encode(&self.0[..8]))
    }
}

impl fmt::Display for Hash256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Hash256 {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
