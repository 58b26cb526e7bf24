//! Canonical wire form of an envelope.
//!
//! The wire form is JSON with a fixed field order, integer epoch timestamps
//! and no insignificant whitespace. Serializing the same envelope always
//! yields the same bytes, which is what the signature covers.
//!
//! Decoding checks structure only:
//!
//! 1. input size against [`ProtocolConfig::max_envelope_len`]
//! 2. well-formed JSON object
//! 3. `version` is `V1_0` (other strings fail with `UnsupportedVersion`)
//! 4. a visible content schema tag is registered (else `UnknownSchema`)
//! 5. the full shape: identity names, inbox names, the `encryption` tag
//!    agreeing with the body, internal encryption `None`
//!
//! It never decrypts and never verifies the signature.

use serde_json::Value;
use tracing::debug;

use crate::config::ProtocolConfig;
use crate::envelope::{Envelope, UnencryptedBody};
use crate::error::{ProtocolError, Result};
use crate::limits::PROTOCOL_VERSION_TAG;
use crate::schemas::SchemaType;

const ENVELOPE_SCHEMA_POINTER: &str =
    "/body/unencrypted/message_data/unencrypted/message_content_schema";

const BODY_SCHEMA_POINTER: &str = "/message_data/unencrypted/message_content_schema";

/// Serialize an envelope to canonical bytes.
pub fn serialize(envelope: &Envelope) -> Result<Vec<u8>> {
    serde_json::to_vec(envelope).map_err(|e| ProtocolError::Serialization(e.to_string()))
}

/// Serialize an envelope to its canonical text.
pub fn serialize_to_string(envelope: &Envelope) -> Result<String> {
    serde_json::to_string(envelope).map_err(|e| ProtocolError::Serialization(e.to_string()))
}

/// Decode an envelope with default limits.
///
/// # Errors
///
/// `MalformedEnvelope`, `UnsupportedVersion` or `UnknownSchema`.
pub fn deserialize(bytes: &[u8]) -> Result<Envelope> {
    deserialize_with_config(bytes, &ProtocolConfig::default())
}

/// Decode an envelope with explicit limits.
pub fn deserialize_with_config(bytes: &[u8], config: &ProtocolConfig) -> Result<Envelope> {
    if bytes.len() > config.max_envelope_len {
        return Err(ProtocolError::MalformedEnvelope(format!(
            "envelope is {} bytes, limit is {}",
            bytes.len(),
            config.max_envelope_len
        )));
    }

    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))?;
    if !value.is_object() {
        return Err(ProtocolError::MalformedEnvelope(
            "envelope is not a JSON object".into(),
        ));
    }

    check_version(&value)?;
    check_schema_tag(&value, ENVELOPE_SCHEMA_POINTER)?;

    let envelope: Envelope = serde_json::from_value(value)
        .map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))?;

    debug!(
        encryption = ?envelope.encryption(),
        sender = %envelope.external_metadata.sender,
        recipient = %envelope.external_metadata.recipient,
        "decoded envelope"
    );
    Ok(envelope)
}

/// Serialize a plaintext body, the input to body encryption.
pub(crate) fn serialize_body(body: &UnencryptedBody) -> Result<Vec<u8>> {
    serde_json::to_vec(body).map_err(|e| ProtocolError::Serialization(e.to_string()))
}

/// Decode a decrypted body.
///
/// Runs the same schema check as envelope decoding.
pub(crate) fn deserialize_body(bytes: &[u8]) -> Result<UnencryptedBody> {
    let value: Value = serde_json::from_slice(bytes)
        .map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))?;
    check_schema_tag(&value, BODY_SCHEMA_POINTER)?;
    serde_json::from_value(value).map_err(|e| ProtocolError::MalformedEnvelope(e.to_string()))
}

fn check_version(value: &Value) -> Result<()> {
    match value.get("version") {
        Some(Value::String(tag)) if tag == PROTOCOL_VERSION_TAG => Ok(()),
        Some(Value::String(tag)) => Err(ProtocolError::UnsupportedVersion(tag.clone())),
        Some(_) => Err(ProtocolError::MalformedEnvelope(
            "version is not a string".into(),
        )),
        None => Err(ProtocolError::MalformedEnvelope("missing version".into())),
    }
}

fn check_schema_tag(value: &Value, pointer: &str) -> Result<()> {
    match value.pointer(pointer) {
        Some(Value::String(tag)) => SchemaType::parse(tag).map(|_| ()),
        // Absent or mistyped tags are reported by the structural decode.
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{
        BodyEncryption, ExternalMetadata, InternalMetadata, MessageBody, SealedBody,
    };
    use crate::schemas::MessageContent;
    use envoy_identity::{IdentityName, InboxName};

    fn envelope(content: MessageContent) -> Envelope {
        Envelope::unsigned(
            MessageBody::Unencrypted(UnencryptedBody::new(
                content,
                InternalMetadata {
                    sender_subidentity: String::new(),
                    recipient_subidentity: String::new(),
                    inbox: InboxName::parse("inbox::@@b.x::@@a.x::false").unwrap(),
                    encryption: BodyEncryption::None,
                },
            )),
            ExternalMetadata {
                sender: IdentityName::parse("@@a.x").unwrap(),
                recipient: IdentityName::parse("@@b.x").unwrap(),
                scheduled_time: 42,
                other: String::new(),
                intra_sender: String::new(),
            },
        )
    }

    #[test]
    fn test_roundtrip() {
        let original = envelope(MessageContent::ack());
        let bytes = serialize(&original).unwrap();
        assert_eq!(deserialize(&bytes).unwrap(), original);
    }

    #[test]
    fn test_serialization_is_deterministic() {
        let original = envelope(MessageContent::text("hello"));
        assert_eq!(serialize(&original).unwrap(), serialize(&original).unwrap());
        assert_eq!(
            serialize_to_string(&original).unwrap().into_bytes(),
            serialize(&original).unwrap()
        );
    }

    #[test]
    fn test_sealed_body_shape_not_checked_on_decode() {
        let mut sealed = envelope(MessageContent::ack());
        sealed.body = MessageBody::Encrypted(SealedBody::from_text("encrypted:00"));
        let bytes = serialize(&sealed).unwrap();
        assert!(deserialize(&bytes).is_ok());
    }

    #[test]
    fn test_unknown_schema() {
        let mut value = serde_json::to_value(envelope(MessageContent::ack())).unwrap();
        *value.pointer_mut(ENVELOPE_SCHEMA_POINTER).unwrap() = Value::from("Mystery");
        let bytes = serde_json::to_vec(&value).unwrap();

        assert!(matches!(
            deserialize(&bytes),
            Err(ProtocolError::UnknownSchema(ref tag)) if tag == "Mystery"
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let mut value = serde_json::to_value(envelope(MessageContent::ack())).unwrap();
        value["version"] = Value::from("V2_0");
        let bytes = serde_json::to_vec(&value).unwrap();

        assert!(matches!(
            deserialize(&bytes),
            Err(ProtocolError::UnsupportedVersion(ref v)) if v == "V2_0"
        ));
    }

    #[test]
    fn test_malformed_inputs() {
        for input in [
            &b"not json"[..],
            b"[]",
            b"{}",
            br#"{"version":1}"#,
            br#"{"version":"V1_0"}"#,
        ] {
            assert!(
                matches!(deserialize(input), Err(ProtocolError::MalformedEnvelope(_))),
                "input {:?}",
                String::from_utf8_lossy(input)
            );
        }
    }

    #[test]
    fn test_bad_identity_is_malformed() {
        let mut value = serde_json::to_value(envelope(MessageContent::ack())).unwrap();
        value["external_metadata"]["sender"] = Value::from("no-prefix");
        let bytes = serde_json::to_vec(&value).unwrap();

        assert!(matches!(
            deserialize(&bytes),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_size_limit() {
        let bytes = serialize(&envelope(MessageContent::ack())).unwrap();
        let config = ProtocolConfig::builder()
            .with_max_raw_content_len(8)
            .with_max_envelope_len(bytes.len() - 1)
            .build();

        assert!(matches!(
            deserialize_with_config(&bytes, &config),
            Err(ProtocolError::MalformedEnvelope(_))
        ));
    }

    #[test]
    fn test_body_roundtrip_and_schema_check() {
        let body = envelope(MessageContent::text("hi"))
            .unencrypted_body()
            .cloned()
            .unwrap();
        let bytes = serialize_body(&body).unwrap();
        assert_eq!(deserialize_body(&bytes).unwrap(), body);

        let mut value: Value = serde_json::from_slice(&bytes).unwrap();
        *value.pointer_mut(BODY_SCHEMA_POINTER).unwrap() = Value::from("Mystery");
        assert!(matches!(
            deserialize_body(&serde_json::to_vec(&value).unwrap()),
            Err(ProtocolError::UnknownSchema(_))
        ));
    }
}
