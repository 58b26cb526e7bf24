//! # envoy-crypto
//!
//! Cryptographic primitives for the envoy message protocol.
//!
//! This crate provides:
//! - **X25519** static key agreement between long-lived identities
//! - **ChaCha20-Poly1305** authenticated symmetric encryption
//! - **Ed25519** detached signatures
//! - **BLAKE3** hashing and key derivation
//!
//! ## Security
//!
//! All secret data uses `zeroize` for secure memory cleanup.
//! Hash comparisons use constant-time operations via `subtle`.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod ed25519;
pub mod error;
pub mod hash;
pub mod symmetric;
pub mod x25519;

#[cfg(test)]
mod proptests;

pub use ed25519::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature};
pub use error::{CryptoError, Result};
pub use hash::Hash256;
pub use symmetric::{decrypt, encrypt, EncryptedData, Nonce, SymmetricKey, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use x25519::{SharedSecret, X25519PublicKey, X25519StaticPrivateKey};
