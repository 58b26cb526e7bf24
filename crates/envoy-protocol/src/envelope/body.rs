//! Message bodies.

use std::fmt;

use envoy_crypto::EncryptedData;
use serde::{Deserialize, Serialize};

use super::metadata::InternalMetadata;
use crate::error::{ProtocolError, Result};
use crate::limits::CIPHERTEXT_PREFIX;
use crate::schemas::MessageContent;

/// Content wrapper. Serializes as `{"unencrypted": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageData {
    /// Plain content.
    Unencrypted(MessageContent),
}

impl MessageData {
    /// The content.
    pub fn content(&self) -> &MessageContent {
        match self {
            Self::Unencrypted(content) => content,
        }
    }
}

/// Plaintext body: content plus internal metadata.
///
/// This is also exactly what an encrypted body decrypts to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnencryptedBody {
    /// The content.
    pub message_data: MessageData,
    /// Sub-identities and inbox.
    pub internal_metadata: InternalMetadata,
}

impl UnencryptedBody {
    /// Build a body from content and metadata.
    pub fn new(content: MessageContent, internal_metadata: InternalMetadata) -> Self {
        Self {
            message_data: MessageData::Unencrypted(content),
            internal_metadata,
        }
    }

    /// The content.
    pub fn content(&self) -> &MessageContent {
        self.message_data.content()
    }
}

/// Ciphertext text `encrypted:<hex(nonce || ciphertext || tag)>`.
///
/// Decoding an envelope does not check the ciphertext's shape; that happens
/// when the body is opened.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SealedBody(String);

impl SealedBody {
    /// Wrap an AEAD output.
    pub fn from_encrypted(data: &EncryptedData) -> Self {
        Self(format!("{CIPHERTEXT_PREFIX}{}", hex::encode(data.to_bytes())))
    }

    /// Wrap ciphertext text as received.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The text form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split the text into nonce and ciphertext.
    ///
    /// # Errors
    ///
    /// Returns `MalformedCiphertext` if the prefix is missing, the payload is
    /// not hex, or it is shorter than nonce plus tag.
    pub fn encrypted_data(&self) -> Result<EncryptedData> {
        let hex_part = self.0.strip_prefix(CIPHERTEXT_PREFIX).ok_or_else(|| {
            ProtocolError::MalformedCiphertext(format!("missing '{CIPHERTEXT_PREFIX}' prefix"))
        })?;
        let bytes = hex::decode(hex_part)
            .map_err(|e| ProtocolError::MalformedCiphertext(format!("invalid hex: {e}")))?;
        Ok(EncryptedData::from_bytes(&bytes)?)
    }
}

impl fmt::Debug for SealedBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SealedBody({} chars)", self.0.len())
    }
}

/// Envelope body: plaintext with visible internal metadata, or ciphertext.
///
/// Serializes as `{"unencrypted": {...}}` or `{"encrypted": "encrypted:..."}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageBody {
    /// Plaintext body.
    Unencrypted(UnencryptedBody),
    /// Opaque ciphertext.
    Encrypted(SealedBody),
}

impl MessageBody {
    /// The plaintext body, if not encrypted.
    pub fn as_unencrypted(&self) -> Option<&UnencryptedBody> {
        match self {
            Self::Unencrypted(body) => Some(body),
            Self::Encrypted(_) => None,
        }
    }

    /// The ciphertext, if encrypted.
    pub fn as_sealed(&self) -> Option<&SealedBody> {
        match self {
            Self::Unencrypted(_) => None,
            Self::Encrypted(sealed) => Some(sealed),
        }
    }

    /// Whether the body is ciphertext.
    pub fn is_encrypted(&self) -> bool {
        matches!(self, Self::Encrypted(_))
    }
}
