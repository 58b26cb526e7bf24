//! Authenticated symmetric encryption.
//!
//! ChaCha20-Poly1305 (RFC 8439) with a 256-bit key and a random 96-bit nonce
//! drawn for every call to [`encrypt`]. The byte form of [`EncryptedData`] is
//!
//! ```text
//! nonce (12) || ciphertext || tag (16)
//! ```
//!
//! Key material is zeroized on drop.

use std::fmt;

use chacha20poly1305::aead::{Aead, KeyInit};
use chacha20poly1305::ChaCha20Poly1305;
use rand::rngs::OsRng;
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::decode_hex;
use crate::{CryptoError, Result};

/// Key length in bytes.
pub const KEY_SIZE: usize = 32;

/// Nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// Poly1305 tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// A ChaCha20-Poly1305 key.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SymmetricKey([u8; KEY_SIZE]);

impl SymmetricKey {
    /// Draw a key from the OS RNG.
    pub fn generate() -> Self {
        let mut key = Self([0u8; KEY_SIZE]);
        OsRng.fill_bytes(&mut key.0);
        key
    }

    /// Wrap raw key bytes.
    ///
    /// # Errors
    ///
    /// `InvalidKeyLength` unless `bytes` is exactly [`KEY_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; KEY_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidKeyLength {
                expected: KEY_SIZE,
                actual: bytes.len(),
            })
    }

    /// Parse the hex form produced by [`SymmetricKey::to_hex`].
    pub fn from_hex(s: &str) -> Result<Self> {
        let mut raw = decode_hex(s)?;
        let key = Self::from_bytes(&raw);
        raw.zeroize();
        key
    }

    /// Lowercase hex. Only meant for handing the key to a peer inside a
    /// sealed message.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Raw key bytes. Do not log or persist them.
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.0
    }

    fn cipher(&self) -> ChaCha20Poly1305 {
        ChaCha20Poly1305::new((&self.0).into())
    }
}

impl From<[u8; KEY_SIZE]> for SymmetricKey {
    fn from(bytes: [u8; KEY_SIZE]) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for SymmetricKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SymmetricKey([REDACTED])")
    }
}

/// A 96-bit nonce. Public, never reused under one key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Nonce([u8; NONCE_SIZE]);

impl Nonce {
    /// Draw a nonce from the OS RNG.
    pub fn random() -> Self {
        let mut nonce = Self([0u8; NONCE_SIZE]);
        OsRng.fill_bytes(&mut nonce.0);
        nonce
    }

    /// Wrap raw nonce bytes.
    ///
    /// # Errors
    ///
    /// `InvalidNonceLength` unless `bytes` is exactly [`NONCE_SIZE`] long.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        <[u8; NONCE_SIZE]>::try_from(bytes)
            .map(Self)
            .map_err(|_| CryptoError::InvalidNonceLength {
                expected: NONCE_SIZE,
                actual: bytes.len(),
            })
    }

    /// Raw nonce bytes.
    pub fn as_bytes(&self) -> &[u8; NONCE_SIZE] {
        &self.0
    }
}

impl fmt::Debug for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Nonce({})", hex::encode(self.0))
    }
}

/// Output of [`encrypt`]: the nonce plus ciphertext with the tag appended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedData {
    /// Nonce the ciphertext was produced under.
    pub nonce: Nonce,
    /// Ciphertext followed by the 16-byte tag.
    pub ciphertext: Vec<u8>,
}

impl EncryptedData {
    /// Smallest valid byte form: a nonce and a tag around empty plaintext.
    pub const MIN_LEN: usize = NONCE_SIZE + TAG_SIZE;

    /// Length of the plaintext this decrypts to.
    pub fn plaintext_len(&self) -> usize {
        self.ciphertext.len().saturating_sub(TAG_SIZE)
    }

    /// `nonce || ciphertext || tag`.
    pub fn to_bytes(&self) -> Vec<u8> {
        [self.nonce.as_bytes().as_slice(), &self.ciphertext].concat()
    }

    /// Split the byte form back into nonce and ciphertext.
    ///
    /// Only the length is checked here; authenticity is checked by [`decrypt`].
    ///
    /// # Errors
    ///
    /// `CiphertextTooShort` if `bytes` is shorter than [`EncryptedData::MIN_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < Self::MIN_LEN {
            return Err(CryptoError::CiphertextTooShort {
                min: Self::MIN_LEN,
                actual: bytes.len(),
            });
        }
        let (nonce, ciphertext) = bytes.split_at(NONCE_SIZE);
        Ok(Self {
            nonce: Nonce::from_bytes(nonce)?,
            ciphertext: ciphertext.to_vec(),
        })
    }
}

/// Encrypt `plaintext` under `key` with a fresh random nonce.
///
/// # Example
///
/// ```
/// use envoy_crypto::symmetric::{decrypt, encrypt, SymmetricKey};
///
/// let key = SymmetricKey::generate();
/// let sealed = encrypt(&key, b"meet at noon").unwrap();
/// assert_eq!(decrypt(&key, &sealed).unwrap(), b"meet at noon");
/// ```
pub fn encrypt(key: &SymmetricKey, plaintext: &[u8]) -> Result<EncryptedData> {
    let nonce = Nonce::random();
    let ciphertext = key
        .cipher()
        .encrypt((&nonce.0).into(), plaintext)
        .map_err(|_| CryptoError::Encryption("plaintext exceeds the ChaCha20-Poly1305 limit".into()))?;
    Ok(EncryptedData { nonce, ciphertext })
}

/// Authenticate and decrypt.
///
/// # Errors
///
/// `Decryption` for a wrong key or any modified byte. The two cases are
/// indistinguishable.
pub fn decrypt(key: &SymmetricKey, encrypted: &EncryptedData) -> Result<Vec<u8>> {
    key.cipher()
        .decrypt((&encrypted.nonce.0).into(), encrypted.ciphertext.as_slice())
        .map_err(|_| CryptoError::Decryption)
}
