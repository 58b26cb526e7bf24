//! Sealing and opening message bodies.

use envoy_crypto::{decrypt, encrypt, SymmetricKey, X25519PublicKey, X25519StaticPrivateKey};
use tracing::debug;

use crate::codec::{deserialize_body, serialize_body};
use crate::envelope::{Envelope, MessageBody, SealedBody, UnencryptedBody};
use crate::error::Result;
use crate::limits::BODY_ENCRYPTION_CONTEXT;

/// Derive the body key shared by `own_secret` and `peer_public`.
///
/// Both parties derive the same key: the sender from its secret and the
/// recipient's public key, the recipient from the reverse pair.
pub fn derive_exchange_key(
    own_secret: &X25519StaticPrivateKey,
    peer_public: &X25519PublicKey,
) -> SymmetricKey {
    own_secret
        .diffie_hellman(peer_public)
        .derive_symmetric_key(BODY_ENCRYPTION_CONTEXT)
}

/// Seal a plaintext body for a recipient.
pub fn seal_body(
    sender_secret: &X25519StaticPrivateKey,
    recipient_public: &X25519PublicKey,
    body: &UnencryptedBody,
) -> Result<SealedBody> {
    let key = derive_exchange_key(sender_secret, recipient_public);
    seal_body_with_key(&key, body)
}

/// Open a body sealed by `sender_public` for the holder of `recipient_secret`.
///
/// # Errors
///
/// - `MalformedCiphertext` if the text is not `encrypted:<hex>` of at least
///   nonce plus tag bytes
/// - `DecryptionFailed` if authentication fails (tampering or wrong keys)
/// - `UnknownSchema` or `MalformedEnvelope` if the plaintext is not a body
pub fn open_body(
    recipient_secret: &X25519StaticPrivateKey,
    sender_public: &X25519PublicKey,
    sealed: &SealedBody,
) -> Result<UnencryptedBody> {
    let key = derive_exchange_key(recipient_secret, sender_public);
    open_body_with_key(&key, sealed)
}

/// Seal a plaintext body with a caller-held key.
pub fn seal_body_with_key(key: &SymmetricKey, body: &UnencryptedBody) -> Result<SealedBody> {
    let plaintext = serialize_body(body)?;
    let encrypted = encrypt(key, &plaintext)?;

    debug!(
        schema = %body.content().message_content_schema,
        inbox = %body.internal_metadata.inbox,
        "sealed message body"
    );
    Ok(SealedBody::from_encrypted(&encrypted))
}

/// Open a body sealed with a caller-held key.
pub fn open_body_with_key(key: &SymmetricKey, sealed: &SealedBody) -> Result<UnencryptedBody> {
    let encrypted = sealed.encrypted_data()?;
    let plaintext = decrypt(key, &encrypted)?;
    let body = deserialize_body(&plaintext)?;

    debug!(
        schema = %body.content().message_content_schema,
        inbox = %body.internal_metadata.inbox,
        "opened message body"
    );
    Ok(body)
}

/// Return `envelope` with its body opened.
///
/// External metadata and signature are kept as received, so the signature
/// still has to be checked against the original wire form. A plaintext
/// envelope is returned unchanged.
pub fn open_envelope(
    envelope: &Envelope,
    recipient_secret: &X25519StaticPrivateKey,
    sender_public: &X25519PublicKey,
) -> Result<Envelope> {
    let body = match &envelope.body {
        MessageBody::Unencrypted(_) => return Ok(envelope.clone()),
        MessageBody::Encrypted(sealed) => open_body(recipient_secret, sender_public, sealed)?,
    };
    Ok(Envelope {
        body: MessageBody::Unencrypted(body),
        ..envelope.clone()
    })
}
