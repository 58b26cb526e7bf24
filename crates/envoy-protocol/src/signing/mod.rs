//! Envelope signatures.
//!
//! Every envelope is signed with the sender's Ed25519 key over:
//!
//! ```text
//! "ENVOY-v1.ENVELOPE-SIG." || len(digest) || BLAKE3(canonical bytes with signature "")
//! ```
//!
//! Decoding never verifies. Callers check a received envelope against the
//! claimed sender's signature key with [`verify_envelope`] before trusting it.
//!
//! ## Usage
//!
//! ```
//! use envoy_identity::IdentityKeyPair;
//! use envoy_protocol::signing::verify_envelope;
//! use envoy_protocol::{MessageBuilder, MessageContext};
//!
//! let sender = IdentityKeyPair::from_seed(&[3u8; 32]);
//! let ctx = MessageContext::new(&sender, "@@a.x", "@@b.x", 0).unwrap();
//! let envelope = MessageBuilder::default().ack(&ctx).unwrap();
//!
//! verify_envelope(&envelope, &sender.signing_public()).unwrap();
//! ```

pub mod envelope_sig;

pub use envelope_sig::{sign_envelope, signing_digest, signing_input, verify_envelope};
