//! # envoy-protocol
//!
//! Wire protocol and message envelopes for the envoy message protocol.
//!
//! This crate provides:
//! - **Envelope**: signed message unit with routing-visible external metadata
//! - **Schemas**: the registry of typed payloads carried in a message body
//! - **Encryption**: X25519 + ChaCha20-Poly1305 body sealing between two identities
//! - **MessageBuilder**: one constructor per operation over a single assembly pipeline
//! - **Codec**: canonical JSON wire form with structural checks on decode
//!
//! ## Trust Model
//!
//! Decoding never decrypts and never verifies. Callers open an encrypted body
//! with [`encryption::open_envelope`] and check the sender with
//! [`signing::verify_envelope`] before acting on a message.
//!
//! ```
//! use envoy_identity::IdentityKeyPair;
//! use envoy_protocol::{codec, signing, MessageBuilder, MessageContext};
//!
//! let sender = IdentityKeyPair::from_seed(&[1u8; 32]);
//! let ctx = MessageContext::new(&sender, "@@sender.shinkai", "@@receiver.shinkai", 1_700_000_000_000)
//!     .unwrap();
//!
//! let ack = MessageBuilder::default().ack(&ctx).unwrap();
//! let bytes = codec::serialize(&ack).unwrap();
//!
//! let received = codec::deserialize(&bytes).unwrap();
//! signing::verify_envelope(&received, &sender.signing_public()).unwrap();
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builder;
pub mod codec;
pub mod config;
pub mod domain_separation;
pub mod encryption;
pub mod envelope;
pub mod error;
pub mod limits;
pub mod schemas;
pub mod signing;

#[cfg(test)]
mod proptests;

pub use builder::{MessageBuilder, MessageContext, Operation, PingPong};
pub use config::{ConfigError, ProtocolConfig, ProtocolConfigBuilder};
pub use envelope::{
    EncryptionMode, Envelope, ExternalMetadata, InternalMetadata, MessageBody, MessageData,
    ProtocolVersion, SealedBody, UnencryptedBody,
};
pub use error::{ProtocolError, Result};
pub use schemas::{MessageContent, SchemaPayload, SchemaType};
