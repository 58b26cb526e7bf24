//! Body encryption between two identities.
//!
//! `EncryptedExchange` bodies are sealed with ChaCha20-Poly1305 under a key
//! derived from the static X25519 agreement between sender and recipient:
//!
//! ```text
//! shared  = X25519(own_secret, peer_public)
//! key     = BLAKE3-derive-key("envoy body encryption v1", shared)
//! sealed  = "encrypted:" || hex(nonce || ciphertext || tag)
//! ```
//!
//! Agreement is symmetric, so the recipient opens with its own secret and the
//! sender's public key. A fresh random nonce is drawn for every seal.
//!
//! Bodies can also be sealed with a caller-held [`SymmetricKey`]
//! (for example one shared earlier through a `SymmetricKeyExchange` message).
//!
//! ## Usage
//!
//! ```
//! use envoy_identity::IdentityKeyPair;
//! use envoy_protocol::encryption::open_envelope;
//! use envoy_protocol::{MessageBuilder, MessageContext};
//!
//! let alice = IdentityKeyPair::from_seed(&[1u8; 32]);
//! let bob = IdentityKeyPair::from_seed(&[2u8; 32]);
//!
//! let ctx = MessageContext::new(&alice, "@@alice.x", "@@bob.x", 0)
//!     .unwrap()
//!     .with_recipient_key(bob.encryption_public());
//! let envelope = MessageBuilder::default()
//!     .custom(&ctx, "greeting", &"hello")
//!     .unwrap();
//! assert!(envelope.is_encrypted());
//!
//! let opened = open_envelope(&envelope, bob.encryption_secret(), &alice.encryption_public())
//!     .unwrap();
//! assert_eq!(opened.content().unwrap().message_raw_content, "\"hello\"");
//! ```
//!
//! [`SymmetricKey`]: envoy_crypto::SymmetricKey

pub mod exchange;

pub use exchange::{
    derive_exchange_key, open_body, open_body_with_key, open_envelope, seal_body,
    seal_body_with_key,
};
