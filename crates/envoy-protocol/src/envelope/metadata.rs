//! Envelope metadata.

use envoy_identity::{IdentityName, InboxName};
use serde::{Deserialize, Serialize};

/// Routing-visible metadata. Never encrypted, always signed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalMetadata {
    /// Sending node or profile.
    pub sender: IdentityName,
    /// Receiving node or profile.
    pub recipient: IdentityName,
    /// Epoch milliseconds, supplied by the caller.
    pub scheduled_time: u64,
    /// Auxiliary addressing, usually the sender's encryption public key in hex.
    #[serde(default)]
    pub other: String,
    /// Sub-identity the sender acts for, empty when none.
    #[serde(default)]
    pub intra_sender: String,
}

/// Body-level encryption recorded in internal metadata.
///
/// Only `None` exists: internal metadata either travels in the clear beside
/// the content or inside the envelope's ciphertext, never wrapped twice.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodyEncryption {
    /// The content is not encrypted at the body level.
    #[default]
    None,
}

/// Sub-identity and inbox details, hidden whenever the body is encrypted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalMetadata {
    /// Sub-identity path below the sender, empty for the sender itself.
    pub sender_subidentity: String,
    /// Sub-identity path below the recipient, empty for the recipient itself.
    pub recipient_subidentity: String,
    /// Conversation channel.
    pub inbox: InboxName,
    /// Body-level encryption.
    pub encryption: BodyEncryption,
}
