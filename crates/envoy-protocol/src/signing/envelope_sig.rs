//! Signing and verifying envelopes.

use envoy_crypto::{Ed25519PrivateKey, Ed25519PublicKey, Ed25519Signature, Hash256};
use tracing::debug;

use crate::codec;
use crate::domain_separation::{build_domain_label, purposes};
use crate::envelope::Envelope;
use crate::error::{ProtocolError, Result};

/// BLAKE3 digest of the envelope serialized with an empty signature.
pub fn signing_digest(envelope: &Envelope) -> Result<Hash256> {
    let unsigned = codec::serialize(&envelope.without_signature())?;
    Ok(Hash256::hash(&unsigned))
}

/// The exact bytes passed to Ed25519.
pub fn signing_input(envelope: &Envelope) -> Result<Vec<u8>> {
    let digest = signing_digest(envelope)?;
    Ok(build_domain_label(purposes::ENVELOPE_SIG, digest.as_bytes()))
}

/// Sign an envelope, replacing any existing signature.
pub fn sign_envelope(mut envelope: Envelope, signing_key: &Ed25519PrivateKey) -> Result<Envelope> {
    let input = signing_input(&envelope)?;
    envelope.signature = signing_key.sign(&input).to_hex();

    debug!(
        encryption = ?envelope.encryption(),
        sender = %envelope.external_metadata.sender,
        "signed envelope"
    );
    Ok(envelope)
}

/// Verify an envelope against the claimed sender's signature key.
///
/// # Errors
///
/// Returns `SignatureInvalid` if the signature is missing, not a hex
/// Ed25519 signature, or does not match.
pub fn verify_envelope(envelope: &Envelope, sender_public: &Ed25519PublicKey) -> Result<()> {
    let signature = Ed25519Signature::from_hex(&envelope.signature)
        .map_err(|_| ProtocolError::SignatureInvalid)?;
    let input = signing_input(envelope)?;
    sender_public
        .verify(&input, &signature)
        .map_err(|_| ProtocolError::SignatureInvalid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{
        BodyEncryption, ExternalMetadata, InternalMetadata, MessageBody, UnencryptedBody,
    };
    use crate::schemas::MessageContent;
    use envoy_identity::{IdentityName, InboxName};

    fn unsigned() -> Envelope {
        Envelope::unsigned(
            MessageBody::Unencrypted(UnencryptedBody::new(
                MessageContent::ack(),
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
                scheduled_time: 7,
                other: String::new(),
                intra_sender: String::new(),
            },
        )
    }

    #[test]
    fn test_sign_and_verify() {
        let key = Ed25519PrivateKey::generate();
        let signed = sign_envelope(unsigned(), &key).unwrap();

        assert!(signed.is_signed());
        assert_eq!(signed.signature.len(), 128);
        assert!(verify_envelope(&signed, &key.public_key()).is_ok());
    }

    #[test]
    fn test_digest_ignores_signature() {
        let key = Ed25519PrivateKey::generate();
        let signed = sign_envelope(unsigned(), &key).unwrap();
        assert_eq!(
            signing_digest(&signed).unwrap(),
            signing_digest(&unsigned()).unwrap()
        );
    }

    #[test]
    fn test_wrong_key_rejected() {
        let signed = sign_envelope(unsigned(), &Ed25519PrivateKey::generate()).unwrap();
        let other = Ed25519PrivateKey::generate().public_key();
        assert_eq!(
            verify_envelope(&signed, &other),
            Err(ProtocolError::SignatureInvalid)
        );
    }

    #[test]
    fn test_modified_metadata_rejected() {
        let key = Ed25519PrivateKey::generate();
        let mut signed = sign_envelope(unsigned(), &key).unwrap();
        signed.external_metadata.scheduled_time += 1;

        assert_eq!(
            verify_envelope(&signed, &key.public_key()),
            Err(ProtocolError::SignatureInvalid)
        );
    }

    #[test]
    fn test_missing_or_garbage_signature_rejected() {
        let key = Ed25519PrivateKey::generate();
        let mut envelope = unsigned();
        assert_eq!(
            verify_envelope(&envelope, &key.public_key()),
            Err(ProtocolError::SignatureInvalid)
        );

        envelope.signature = "not hex".into();
        assert_eq!(
            verify_envelope(&envelope, &key.public_key()),
            Err(ProtocolError::SignatureInvalid)
        );
    }

    #[test]
    fn test_signing_input_is_domain_separated() {
        let input = signing_input(&unsigned()).unwrap();
        assert!(input.starts_with(b"ENVOY-v1.ENVELOPE-SIG."));
    }
}
