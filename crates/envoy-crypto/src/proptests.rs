//! Property-based tests for cryptographic primitives.
//!
//! These tests use proptest to verify properties hold for arbitrary inputs:
//!
//! - Roundtrip properties (encrypt/decrypt, hex encode/decode)
//! - Tamper detection (any flipped bit is rejected)
//! - Agreement (both sides of X25519 derive the same key)

use proptest::prelude::*;

use crate::{
    decrypt, encrypt, CryptoError, Ed25519PrivateKey, EncryptedData, Hash256, SymmetricKey,
    X25519StaticPrivateKey, NONCE_SIZE, TAG_SIZE,
};

// ==================== Symmetric Encryption Property Tests ====================

proptest! {
    /// Encryption followed by decryption should return the original plaintext.
    #[test]
    fn encrypt_decrypt_roundtrip(plaintext: Vec<u8>) {
        let key = SymmetricKey::generate();
        let encrypted = encrypt(&key, &plaintext).unwrap();
        let decrypted = decrypt(&key, &encrypted).unwrap();
        prop_assert_eq!(plaintext, decrypted);
    }

    /// Flipping any bit of the wire bytes must fail authentication.
    #[test]
    fn any_bit_flip_is_detected(
        plaintext in prop::collection::vec(any::<u8>(), 0..256),
        position in any::<prop::sample::Index>(),
        bit in 0u8..8,
    ) {
        let key = SymmetricKey::generate();
        let mut bytes = encrypt(&key, &plaintext).unwrap().to_bytes();
        let idx = position.index(bytes.len());
        bytes[idx] ^= 1 << bit;

        let tampered = EncryptedData::from_bytes(&bytes).unwrap();
        prop_assert!(matches!(decrypt(&key, &tampered), Err(CryptoError::Decryption)));
    }

    /// Inputs shorter than nonce + tag are rejected before decryption.
    #[test]
    fn short_inputs_rejected(bytes in prop::collection::vec(any::<u8>(), 0..(NONCE_SIZE + TAG_SIZE))) {
        let is_too_short = matches!(
            EncryptedData::from_bytes(&bytes),
            Err(CryptoError::CiphertextTooShort { .. })
        );
        prop_assert!(is_too_short);
    }
}

// ==================== Key Agreement Property Tests ====================

proptest! {
    /// Static-static X25519 agrees on both sides for arbitrary seeds.
    #[test]
    fn x25519_agreement(a in any::<[u8; 32]>(), b in any::<[u8; 32]>()) {
        let alice = X25519StaticPrivateKey::from_bytes(&a).unwrap();
        let bob = X25519StaticPrivateKey::from_bytes(&b).unwrap();

        let ab = alice.diffie_hellman(&bob.public_key());
        let ba = bob.diffie_hellman(&alice.public_key());
        prop_assert_eq!(ab.as_bytes(), ba.as_bytes());
    }
}

// ==================== Signature Property Tests ====================

proptest! {
    /// A signature verifies for its own message and seed.
    #[test]
    fn ed25519_sign_verify(seed in any::<[u8; 32]>(), message: Vec<u8>) {
        let key = Ed25519PrivateKey::from_bytes(&seed).unwrap();
        let signature = key.sign(&message);
        prop_assert!(key.public_key().verify(&message, &signature).is_ok());
    }

    /// Hash hex encoding roundtrips.
    #[test]
    fn hash_hex_roundtrip(data: Vec<u8>) {
        let hash = Hash256::hash(&data);
        prop_assert_eq!(Hash256::from_hex(&hash.to_hex()).unwrap(), hash);
    }
}
