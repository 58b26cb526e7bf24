//! The top-level envelope.

use envoy_identity::{IdentityName, InboxName};
use serde::{Deserialize, Serialize};

use super::body::{MessageBody, UnencryptedBody};
use super::metadata::{ExternalMetadata, InternalMetadata};
use crate::error::ProtocolError;
use crate::schemas::MessageContent;

/// Protocol version tag.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProtocolVersion {
    /// The only version.
    #[default]
    V1_0,
}

/// Envelope-level encryption mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncryptionMode {
    /// Body in the clear, authenticated only by the signature.
    None,
    /// Body sealed for one recipient with an ECDH-derived key.
    EncryptedExchange,
}

/// A complete message.
///
/// Built by [`crate::MessageBuilder`], moved over the wire by [`crate::codec`].
/// The `encryption` tag is not stored; it is derived from the body variant
/// and written on serialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WireEnvelope", into = "WireEnvelope")]
pub struct Envelope {
    /// Protocol version.
    pub version: ProtocolVersion,
    /// Plaintext or sealed body.
    pub body: MessageBody,
    /// Routing metadata.
    pub external_metadata: ExternalMetadata,
    /// Lowercase hex Ed25519 signature, empty before signing.
    pub signature: String,
}

impl Envelope {
    /// Assemble an unsigned envelope.
    pub fn unsigned(body: MessageBody, external_metadata: ExternalMetadata) -> Self {
        Self {
            version: ProtocolVersion::V1_0,
            body,
            external_metadata,
            signature: String::new(),
        }
    }

    /// Encryption mode implied by the body.
    pub fn encryption(&self) -> EncryptionMode {
        match self.body {
            MessageBody::Unencrypted(_) => EncryptionMode::None,
            MessageBody::Encrypted(_) => EncryptionMode::EncryptedExchange,
        }
    }

    /// Whether the body is sealed.
    pub fn is_encrypted(&self) -> bool {
        self.body.is_encrypted()
    }

    /// Whether a signature is attached.
    pub fn is_signed(&self) -> bool {
        !self.signature.is_empty()
    }

    /// Plaintext body, if visible.
    pub fn unencrypted_body(&self) -> Option<&UnencryptedBody> {
        self.body.as_unencrypted()
    }

    /// Content, if visible.
    pub fn content(&self) -> Option<&MessageContent> {
        self.unencrypted_body().map(UnencryptedBody::content)
    }

    /// Internal metadata, if visible.
    pub fn internal_metadata(&self) -> Option<&InternalMetadata> {
        self.unencrypted_body().map(|body| &body.internal_metadata)
    }

    /// Inbox, if visible.
    pub fn inbox(&self) -> Option<&InboxName> {
        self.internal_metadata().map(|meta| &meta.inbox)
    }

    /// Claimed sender.
    pub fn sender(&self) -> &IdentityName {
        &self.external_metadata.sender
    }

    /// Recipient.
    pub fn recipient(&self) -> &IdentityName {
        &self.external_metadata.recipient
    }

    /// Full sender identity including the sub-identity, when visible.
    ///
    /// Falls back to the external sender when the body is sealed or the
    /// sub-identity is empty.
    pub fn full_sender(&self) -> IdentityName {
        self.internal_metadata()
            .and_then(|meta| {
                self.external_metadata
                    .sender
                    .with_subidentity(&meta.sender_subidentity)
                    .ok()
            })
            .unwrap_or_else(|| self.external_metadata.sender.clone())
    }

    /// Copy of this envelope with the signature cleared.
    pub(crate) fn without_signature(&self) -> Self {
        Self {
            signature: String::new(),
            ..self.clone()
        }
    }
}

/// Serialized field order: version, encryption, body, external_metadata, signature.
#[derive(Serialize, Deserialize)]
struct WireEnvelope {
    version: ProtocolVersion,
    encryption: EncryptionMode,
    body: MessageBody,
    external_metadata: ExternalMetadata,
    signature: String,
}

impl From<Envelope> for WireEnvelope {
    fn from(envelope: Envelope) -> Self {
        Self {
            version: envelope.version,
            encryption: envelope.encryption(),
            body: envelope.body,
            external_metadata: envelope.external_metadata,
            signature: envelope.signature,
        }
    }
}

impl TryFrom<WireEnvelope> for Envelope {
    type Error = ProtocolError;

    fn try_from(wire: WireEnvelope) -> Result<Self, Self::Error> {
        let envelope = Self {
            version: wire.version,
            body: wire.body,
            external_metadata: wire.external_metadata,
            signature: wire.signature,
        };
        if envelope.encryption() != wire.encryption {
            return Err(ProtocolError::MalformedEnvelope(format!(
                "encryption tag {:?} does not match a {} body",
                wire.encryption,
                if envelope.is_encrypted() { "sealed" } else { "plaintext" }
            )));
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{BodyEncryption, SealedBody};

    fn external() -> ExternalMetadata {
        ExternalMetadata {
            sender: IdentityName::parse("@@sender.shinkai").unwrap(),
            recipient: IdentityName::parse("@@receiver.shinkai").unwrap(),
            scheduled_time: 1_700_000_000_000,
            other: String::new(),
            intra_sender: String::new(),
        }
    }

    fn plain_body(sender_sub: &str) -> MessageBody {
        MessageBody::Unencrypted(UnencryptedBody::new(
            MessageContent::ack(),
            InternalMetadata {
                sender_subidentity: sender_sub.into(),
                recipient_subidentity: String::new(),
                inbox: InboxName::parse("inbox::@@receiver.shinkai::@@sender.shinkai::false")
                    .unwrap(),
                encryption: BodyEncryption::None,
            },
        ))
    }

    #[test]
    fn test_encryption_follows_body() {
        let plain = Envelope::unsigned(plain_body(""), external());
        assert_eq!(plain.encryption(), EncryptionMode::None);
        assert!(plain.content().is_some());

        let sealed = Envelope::unsigned(
            MessageBody::Encrypted(SealedBody::from_text("encrypted:00")),
            external(),
        );
        assert_eq!(sealed.encryption(), EncryptionMode::EncryptedExchange);
        assert!(sealed.content().is_none());
        assert!(sealed.inbox().is_none());
    }

    #[test]
    fn test_wire_field_order() {
        let envelope = Envelope::unsigned(plain_body(""), external());
        let json = serde_json::to_string(&envelope).unwrap();

        let positions: Vec<usize> = [
            "\"version\"",
            "\"encryption\"",
            "\"body\"",
            "\"external_metadata\"",
            "\"signature\"",
        ]
        .iter()
        .map(|key| json.find(key).unwrap())
        .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_mismatched_encryption_tag_rejected() {
        let envelope = Envelope::unsigned(plain_body(""), external());
        let mut value = serde_json::to_value(&envelope).unwrap();
        value["encryption"] = serde_json::json!("EncryptedExchange");

        assert!(serde_json::from_value::<Envelope>(value).is_err());
    }

    #[test]
    fn test_full_sender() {
        let envelope = Envelope::unsigned(plain_body("main/device/phone"), external());
        assert_eq!(
            envelope.full_sender().as_str(),
            "@@sender.shinkai/main/device/phone"
        );

        let top = Envelope::unsigned(plain_body(""), external());
        assert_eq!(top.full_sender().as_str(), "@@sender.shinkai");
    }
}
