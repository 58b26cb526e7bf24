//! Message construction.
//!
//! Every operation goes through one assembly pipeline:
//!
//! 1. check content size against [`ProtocolConfig`]
//! 2. compute the inbox from the full sender and recipient names (or the job id)
//! 3. place internal metadata beside the content
//! 4. seal the body for the recipient when [`Operation::encryption_mode`] says so
//! 5. attach external metadata and sign
//! 6. check the serialized envelope against [`ProtocolConfig::max_envelope_len`]
//!
//! The per-operation constructors in [`operations`] and [`filesystem`] only
//! choose the payload, the inbox target and the auxiliary metadata fields.
//! A build either returns a complete signed envelope or an error.

pub mod filesystem;
pub mod operations;
pub mod policy;

use envoy_crypto::X25519PublicKey;
use envoy_identity::{compute_inbox_name, compute_job_inbox_name, IdentityKeyPair, IdentityName};
use tracing::debug;

use crate::codec;
use crate::config::{ConfigError, ProtocolConfig};
use crate::encryption::seal_body;
use crate::envelope::{
    BodyEncryption, EncryptionMode, Envelope, ExternalMetadata, InternalMetadata, MessageBody,
    UnencryptedBody,
};
use crate::error::{ProtocolError, Result};
use crate::schemas::MessageContent;
use crate::signing::sign_envelope;

pub use operations::PingPong;
pub use policy::Operation;

/// Who is talking to whom, with which keys, and when.
///
/// # Example
///
/// ```
/// use envoy_identity::IdentityKeyPair;
/// use envoy_protocol::MessageContext;
///
/// let device = IdentityKeyPair::from_seed(&[9u8; 32]);
/// let node = IdentityKeyPair::from_seed(&[8u8; 32]);
///
/// let ctx = MessageContext::new(&device, "@@alice.x", "@@alice.x", 1_700_000_000_000)
///     .unwrap()
///     .with_sender_subidentity("main/device/phone")
///     .unwrap()
///     .with_recipient_key(node.encryption_public());
/// assert_eq!(ctx.full_sender().unwrap().as_str(), "@@alice.x/main/device/phone");
/// ```
#[derive(Clone, Debug)]
pub struct MessageContext<'a> {
    keys: &'a IdentityKeyPair,
    sender: IdentityName,
    recipient: IdentityName,
    recipient_key: Option<X25519PublicKey>,
    sender_subidentity: String,
    recipient_subidentity: String,
    scheduled_time: u64,
}

impl<'a> MessageContext<'a> {
    /// Create a context.
    ///
    /// `scheduled_time` is epoch milliseconds; the caller supplies it.
    ///
    /// # Errors
    ///
    /// Returns `MalformedIdentity` if either name does not parse.
    pub fn new(
        keys: &'a IdentityKeyPair,
        sender: &str,
        recipient: &str,
        scheduled_time: u64,
    ) -> Result<Self> {
        Ok(Self {
            keys,
            sender: IdentityName::parse(sender)?,
            recipient: IdentityName::parse(recipient)?,
            recipient_key: None,
            sender_subidentity: String::new(),
            recipient_subidentity: String::new(),
            scheduled_time,
        })
    }

    /// Set the recipient's encryption key, required by sealed operations.
    pub fn with_recipient_key(mut self, key: X25519PublicKey) -> Self {
        self.recipient_key = Some(key);
        self
    }

    /// Act on behalf of a sub-identity of the sender, e.g. `main/device/phone`.
    pub fn with_sender_subidentity(mut self, path: &str) -> Result<Self> {
        self.sender.with_subidentity(path)?;
        self.sender_subidentity = path.to_string();
        Ok(self)
    }

    /// Address a sub-identity of the recipient.
    pub fn with_recipient_subidentity(mut self, path: &str) -> Result<Self> {
        self.recipient.with_subidentity(path)?;
        self.recipient_subidentity = path.to_string();
        Ok(self)
    }

    /// Sender keys.
    pub fn keys(&self) -> &IdentityKeyPair {
        self.keys
    }

    /// Sender name as it appears in external metadata.
    pub fn sender(&self) -> &IdentityName {
        &self.sender
    }

    /// Recipient name as it appears in external metadata.
    pub fn recipient(&self) -> &IdentityName {
        &self.recipient
    }

    /// Sender sub-identity path, empty if none.
    pub fn sender_subidentity(&self) -> &str {
        &self.sender_subidentity
    }

    /// Recipient sub-identity path, empty if none.
    pub fn recipient_subidentity(&self) -> &str {
        &self.recipient_subidentity
    }

    /// Epoch milliseconds.
    pub fn scheduled_time(&self) -> u64 {
        self.scheduled_time
    }

    /// Sender name including the sub-identity.
    pub fn full_sender(&self) -> Result<IdentityName> {
        Ok(self.sender.with_subidentity(&self.sender_subidentity)?)
    }

    /// Recipient name including the sub-identity.
    pub fn full_recipient(&self) -> Result<IdentityName> {
        Ok(self.recipient.with_subidentity(&self.recipient_subidentity)?)
    }

    fn sender_encryption_hex(&self) -> String {
        self.keys.encryption_public().to_hex()
    }
}

/// Where a message is filed.
#[derive(Clone, Debug)]
pub(crate) enum InboxTarget {
    /// Direct inbox between the full recipient and sender names.
    Direct,
    /// A job's inbox.
    Job(String),
}

/// Operation-specific inputs to the assembly pipeline.
#[derive(Clone, Debug)]
pub(crate) struct Draft {
    operation: Operation,
    content: MessageContent,
    target: InboxTarget,
    other: String,
    intra_sender: String,
}

impl Draft {
    pub(crate) fn direct(operation: Operation, content: MessageContent) -> Self {
        Self {
            operation,
            content,
            target: InboxTarget::Direct,
            other: String::new(),
            intra_sender: String::new(),
        }
    }

    pub(crate) fn in_job(mut self, job_id: impl Into<String>) -> Self {
        self.target = InboxTarget::Job(job_id.into());
        self
    }

    /// Carry the sender's encryption public key in `other`.
    pub(crate) fn with_sender_key(mut self, ctx: &MessageContext<'_>) -> Self {
        self.other = ctx.sender_encryption_hex();
        self
    }

    /// Carry the sender sub-identity in `intra_sender`.
    pub(crate) fn with_intra_sender(mut self, ctx: &MessageContext<'_>) -> Self {
        self.intra_sender = ctx.sender_subidentity.clone();
        self
    }
}

/// Builds signed envelopes for every [`Operation`].
#[derive(Clone, Debug, Default)]
pub struct MessageBuilder {
    config: ProtocolConfig,
}

impl MessageBuilder {
    /// Create a builder with validated limits.
    pub fn new(config: ProtocolConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Active limits.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    pub(crate) fn assemble(&self, ctx: &MessageContext<'_>, draft: Draft) -> Result<Envelope> {
        let Draft {
            operation,
            content,
            target,
            other,
            intra_sender,
        } = draft;

        let raw_len = content.message_raw_content.len();
        if raw_len > self.config.max_raw_content_len {
            return Err(ProtocolError::InvalidArgument(format!(
                "raw content is {raw_len} bytes, limit is {}",
                self.config.max_raw_content_len
            )));
        }

        let inbox = match target {
            InboxTarget::Direct => {
                compute_inbox_name(&ctx.full_recipient()?, &ctx.full_sender()?, false)
            }
            InboxTarget::Job(job_id) if job_id.is_empty() => {
                return Err(ProtocolError::InvalidArgument(
                    "job id must not be empty".into(),
                ));
            }
            InboxTarget::Job(job_id) => compute_job_inbox_name(&job_id, false)?,
        };

        let schema = content.message_content_schema.clone();
        let plain = UnencryptedBody::new(
            content,
            InternalMetadata {
                sender_subidentity: ctx.sender_subidentity.clone(),
                recipient_subidentity: ctx.recipient_subidentity.clone(),
                inbox,
                encryption: BodyEncryption::None,
            },
        );

        let mode = operation.encryption_mode();
        let body = match mode {
            EncryptionMode::None => MessageBody::Unencrypted(plain),
            EncryptionMode::EncryptedExchange => {
                let recipient_key = ctx.recipient_key.as_ref().ok_or_else(|| {
                    ProtocolError::InvalidArgument(format!(
                        "{operation} is encrypted and needs the recipient's encryption key"
                    ))
                })?;
                MessageBody::Encrypted(seal_body(
                    ctx.keys.encryption_secret(),
                    recipient_key,
                    &plain,
                )?)
            }
        };

        let external = ExternalMetadata {
            sender: ctx.sender.clone(),
            recipient: ctx.recipient.clone(),
            scheduled_time: ctx.scheduled_time,
            other,
            intra_sender,
        };
        let envelope = sign_envelope(Envelope::unsigned(body, external), ctx.keys.signing_secret())?;

        let wire_len = codec::serialize(&envelope)?.len();
        if wire_len > self.config.max_envelope_len {
            return Err(ProtocolError::InvalidArgument(format!(
                "envelope is {wire_len} bytes, limit is {}",
                self.config.max_envelope_len
            )));
        }

        debug!(
            %operation,
            %schema,
            encryption = ?mode,
            sender = %ctx.sender,
            recipient = %ctx.recipient,
            "assembled envelope"
        );
        Ok(envelope)
    }
}
