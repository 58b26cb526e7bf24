//! Static keypairs of an identity.
//!
//! Every identity holds two long-lived secrets:
//! - an X25519 key for deriving per-peer body encryption keys
//! - an Ed25519 key for signing envelopes
//!
//! Key generation and storage belong to the caller; this type only bundles
//! the two secrets so builders can take them as one argument.

use serde::{Deserialize, Serialize};

use envoy_crypto::{
    Ed25519PrivateKey, Ed25519PublicKey, Hash256, X25519PublicKey, X25519StaticPrivateKey,
};

use crate::Result;

/// Domain separation for deriving the encryption secret from a seed.
const SEED_ENCRYPTION_CONTEXT: &[u8] = b"ENVOY-SEED-ENCRYPTION-v1";

/// Domain separation for deriving the signing secret from a seed.
const SEED_SIGNING_CONTEXT: &[u8] = b"ENVOY-SEED-SIGNING-v1";

/// Public keys of an identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPublicKeys {
    /// X25519 public key for key agreement.
    pub encryption: X25519PublicKey,
    /// Ed25519 public key for signature verification.
    pub signing: Ed25519PublicKey,
}

/// An identity's encryption and signing secret keys.
///
/// Both secrets are zeroized on drop. Clone is not implemented.
pub struct IdentityKeyPair {
    encryption: X25519StaticPrivateKey,
    signing: Ed25519PrivateKey,
}

impl IdentityKeyPair {
    /// Generate fresh random keys.
    pub fn generate() -> Self {
        Self {
            encryption: X25519StaticPrivateKey::generate(),
            signing: Ed25519PrivateKey::generate(),
        }
    }

    /// Assemble from existing secret keys.
    pub fn from_keys(encryption: X25519StaticPrivateKey, signing: Ed25519PrivateKey) -> Self {
        Self {
            encryption,
            signing,
        }
    }

    /// Load from raw secret key bytes.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::Crypto` if either slice is not 32 bytes.
    pub fn from_secret_bytes(encryption: &[u8], signing: &[u8]) -> Result<Self> {
        Ok(Self {
            encryption: X25519StaticPrivateKey::from_bytes(encryption)?,
            signing: Ed25519PrivateKey::from_bytes(signing)?,
        })
    }

    /// Derive both secrets deterministically from a 32-byte seed.
    ///
    /// Intended for tests and reproducible fixtures.
    pub fn from_seed(seed: &[u8; 32]) -> Self {
        let encryption = Hash256::hash_many(&[SEED_ENCRYPTION_CONTEXT, seed]);
        let signing = Hash256::hash_many(&[SEED_SIGNING_CONTEXT, seed]);
        Self {
            encryption: X25519StaticPrivateKey::from(*encryption.as_bytes()),
            signing: Ed25519PrivateKey::from(*signing.as_bytes()),
        }
    }

    /// The X25519 secret key.
    pub fn encryption_secret(&self) -> &X25519StaticPrivateKey {
        &self.encryption
    }

    /// The Ed25519 secret key.
    pub fn signing_secret(&self) -> &Ed25519PrivateKey {
        &self.signing
    }

    /// The X25519 public key.
    pub fn encryption_public(&self) -> X25519PublicKey {
        self.encryption.public_key()
    }

    /// The Ed25519 public key.
    pub fn signing_public(&self) -> Ed25519PublicKey {
        self.signing.public_key()
    }

    /// Both public keys.
    pub fn public_keys(&self) -> IdentityPublicKeys {
        IdentityPublicKeys {
            encryption: self.encryption_public(),
            signing: self.signing_public(),
        }
    }
}

impl std::fmt::Debug for IdentityKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdentityKeyPair")
            .field("encryption_public", &self.encryption_public())
            .field("signing_public", &self.signing_public())
            .finish_non_exhaustive()
    }
}
