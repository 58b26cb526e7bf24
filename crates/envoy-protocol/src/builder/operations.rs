//! One constructor per operation.

use envoy_crypto::SymmetricKey;
use envoy_identity::{IdentityName, IdentityPublicKeys, InboxName};
use serde::Serialize;

use super::{Draft, MessageBuilder, MessageContext, Operation};
use crate::envelope::Envelope;
use crate::error::{ProtocolError, Result};
use crate::limits::TERMINATE_CONTENT;
use crate::schemas::{
    AddProviderRequest, ErrorReport, GetMessagesFromInboxRequest, IdentityPermissions,
    IdentityType, JobCreationInfo, JobMessage, JobScope, MessageContent, ProviderSpec,
    ReadUpToTimeRequest, RegistrationCode, RegistrationCodeRequest, RegistrationCodeType,
    SchemaType, SymmetricKeyExchange,
};

/// Liveness probe content.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PingPong {
    /// Probe.
    Ping,
    /// Answer.
    Pong,
}

impl PingPong {
    /// Raw content.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ping => "Ping",
            Self::Pong => "Pong",
        }
    }
}

impl MessageBuilder {
    /// Acknowledge a message. Sent in the clear.
    pub fn ack(&self, ctx: &MessageContext<'_>) -> Result<Envelope> {
        let draft = Draft::direct(Operation::Ack, MessageContent::ack()).with_sender_key(ctx);
        self.assemble(ctx, draft)
    }

    /// Liveness probe or answer. Sent in the clear.
    pub fn ping_pong(&self, ctx: &MessageContext<'_>, message: PingPong) -> Result<Envelope> {
        let draft = Draft::direct(Operation::PingPong, MessageContent::text(message.as_str()));
        self.assemble(ctx, draft)
    }

    /// End a conversation. Sent in the clear.
    pub fn terminate(&self, ctx: &MessageContext<'_>) -> Result<Envelope> {
        let draft = Draft::direct(Operation::Terminate, MessageContent::text(TERMINATE_CONTENT));
        self.assemble(ctx, draft)
    }

    /// Report an error to a peer. Sent in the clear.
    pub fn error_report(&self, ctx: &MessageContext<'_>, error: &str) -> Result<Envelope> {
        let content = MessageContent::encode(&ErrorReport {
            error: error.to_string(),
        })?;
        self.assemble(ctx, Draft::direct(Operation::ErrorReport, content))
    }

    /// First registration of a device, before any registration code exists.
    ///
    /// The context holds the device keys. The payload carries the public keys
    /// of both the device and its profile, requests admin permissions and
    /// travels in the clear.
    pub fn registration_without_code(
        &self,
        ctx: &MessageContext<'_>,
        profile_keys: &IdentityPublicKeys,
        registration_name: &str,
    ) -> Result<Envelope> {
        require_non_empty("registration name", registration_name)?;
        let device_keys = ctx.keys().public_keys();
        let code = RegistrationCode {
            code: String::new(),
            registration_name: registration_name.to_string(),
            device_identity_pk: device_keys.signing.to_hex(),
            device_encryption_pk: device_keys.encryption.to_hex(),
            profile_identity_pk: profile_keys.signing.to_hex(),
            profile_encryption_pk: profile_keys.encryption.to_hex(),
            identity_type: IdentityType::Device,
            permission_type: IdentityPermissions::Admin,
        };
        let draft = Draft::direct(Operation::RegistrationWithoutCode, MessageContent::encode(&code)?)
            .with_sender_key(ctx);
        self.assemble(ctx, draft)
    }

    /// Redeem a registration code for a profile. The context holds the profile keys.
    pub fn use_code_registration_for_profile(
        &self,
        ctx: &MessageContext<'_>,
        code: &str,
        permission_type: IdentityPermissions,
        registration_name: &str,
    ) -> Result<Envelope> {
        require_non_empty("registration code", code)?;
        require_non_empty("registration name", registration_name)?;
        let profile_keys = ctx.keys().public_keys();
        let payload = RegistrationCode {
            code: code.to_string(),
            registration_name: registration_name.to_string(),
            device_identity_pk: String::new(),
            device_encryption_pk: String::new(),
            profile_identity_pk: profile_keys.signing.to_hex(),
            profile_encryption_pk: profile_keys.encryption.to_hex(),
            identity_type: IdentityType::Profile,
            permission_type,
        };
        self.send_to_node(ctx, Operation::RegistrationWithCode, MessageContent::encode(&payload)?)
    }

    /// Redeem a registration code for a device. The context holds the device keys.
    pub fn use_code_registration_for_device(
        &self,
        ctx: &MessageContext<'_>,
        profile_keys: &IdentityPublicKeys,
        code: &str,
        permission_type: IdentityPermissions,
        registration_name: &str,
    ) -> Result<Envelope> {
        require_non_empty("registration code", code)?;
        require_non_empty("registration name", registration_name)?;
        let device_keys = ctx.keys().public_keys();
        let payload = RegistrationCode {
            code: code.to_string(),
            registration_name: registration_name.to_string(),
            device_identity_pk: device_keys.signing.to_hex(),
            device_encryption_pk: device_keys.encryption.to_hex(),
            profile_identity_pk: profile_keys.signing.to_hex(),
            profile_encryption_pk: profile_keys.encryption.to_hex(),
            identity_type: IdentityType::Device,
            permission_type,
        };
        self.send_to_node(ctx, Operation::RegistrationWithCode, MessageContent::encode(&payload)?)
    }

    /// Ask the recipient node to mint a registration code.
    ///
    /// A device code must name its device.
    pub fn request_registration_code(
        &self,
        ctx: &MessageContext<'_>,
        permissions: IdentityPermissions,
        code_type: RegistrationCodeType,
    ) -> Result<Envelope> {
        if let RegistrationCodeType::Device(name) = &code_type {
            require_non_empty("device name", name)?;
        }
        let request = RegistrationCodeRequest {
            permissions,
            code_type,
        };
        self.send_to_node(
            ctx,
            Operation::RequestRegistrationCode,
            MessageContent::encode(&request)?,
        )
    }

    /// Create a job.
    pub fn job_creation(
        &self,
        ctx: &MessageContext<'_>,
        scope: JobScope,
        is_hidden: bool,
    ) -> Result<Envelope> {
        let info = JobCreationInfo {
            scope,
            is_hidden: Some(is_hidden),
        };
        let draft = Draft::direct(Operation::JobCreation, MessageContent::encode(&info)?)
            .with_intra_sender(ctx);
        self.assemble(ctx, draft)
    }

    /// Post into a job. Filed in the job's inbox.
    ///
    /// Workflow, sheet and callback variants are expressed through the
    /// fields of [`JobMessage`].
    pub fn job_message(&self, ctx: &MessageContext<'_>, message: &JobMessage) -> Result<Envelope> {
        require_non_empty("job id", &message.job_id)?;
        let draft = Draft::direct(Operation::JobMessage, MessageContent::encode(message)?)
            .in_job(message.job_id.clone())
            .with_intra_sender(ctx);
        self.assemble(ctx, draft)
    }

    /// Read the latest `count` messages of `inbox`.
    pub fn last_messages_from_inbox(
        &self,
        ctx: &MessageContext<'_>,
        inbox: &str,
        count: usize,
        offset: Option<String>,
    ) -> Result<Envelope> {
        self.inbox_query(
            ctx,
            Operation::LastMessagesFromInbox,
            SchemaType::APIGetMessagesFromInboxRequest,
            inbox,
            count,
            offset,
        )
    }

    /// Read the latest `count` unread messages of `inbox`.
    pub fn last_unread_messages_from_inbox(
        &self,
        ctx: &MessageContext<'_>,
        inbox: &str,
        count: usize,
        offset: Option<String>,
    ) -> Result<Envelope> {
        self.inbox_query(
            ctx,
            Operation::LastUnreadMessagesFromInbox,
            SchemaType::APIGetUnreadMessagesFromInboxRequest,
            inbox,
            count,
            offset,
        )
    }

    /// Mark `inbox` read up to `up_to_time` (epoch milliseconds).
    pub fn read_up_to_time(
        &self,
        ctx: &MessageContext<'_>,
        inbox: &str,
        up_to_time: u64,
    ) -> Result<Envelope> {
        let request = ReadUpToTimeRequest {
            inbox_name: InboxName::parse(inbox)?,
            up_to_time,
        };
        self.send_to_node(ctx, Operation::ReadUpToTime, MessageContent::encode(&request)?)
    }

    /// List every inbox of `profile` (a full profile name such as `@@node.x/main`).
    pub fn all_inboxes_for_profile(
        &self,
        ctx: &MessageContext<'_>,
        profile: &str,
    ) -> Result<Envelope> {
        let profile = IdentityName::parse(profile)?;
        if !profile.has_profile() {
            return Err(ProtocolError::InvalidArgument(format!(
                "{profile} does not name a profile"
            )));
        }
        let draft = Draft::direct(
            Operation::AllInboxesForProfile,
            MessageContent::text(profile.as_str()),
        )
        .with_intra_sender(ctx);
        self.assemble(ctx, draft)
    }

    /// Register a model provider.
    pub fn add_provider(&self, ctx: &MessageContext<'_>, provider: ProviderSpec) -> Result<Envelope> {
        require_non_empty("provider id", &provider.id)?;
        let request = AddProviderRequest { agent: provider };
        self.send_to_node(ctx, Operation::AddProvider, MessageContent::encode(&request)?)
    }

    /// Hand a symmetric key to the recipient, e.g. to open a shared files inbox.
    pub fn symmetric_key_exchange(
        &self,
        ctx: &MessageContext<'_>,
        key: &SymmetricKey,
    ) -> Result<Envelope> {
        let exchange = SymmetricKeyExchange {
            shared_secret_key: key.to_hex(),
        };
        self.send_to_node(
            ctx,
            Operation::SymmetricKeyExchange,
            MessageContent::encode(&exchange)?,
        )
    }

    /// Send a caller-defined payload tagged `custom:<schema_name>`.
    pub fn custom<T: Serialize + ?Sized>(
        &self,
        ctx: &MessageContext<'_>,
        schema_name: &str,
        payload: &T,
    ) -> Result<Envelope> {
        let content = MessageContent::encode_as(SchemaType::custom(schema_name)?, payload)?;
        self.send_to_node(ctx, Operation::Custom, content)
    }

    fn inbox_query(
        &self,
        ctx: &MessageContext<'_>,
        operation: Operation,
        schema: SchemaType,
        inbox: &str,
        count: usize,
        offset: Option<String>,
    ) -> Result<Envelope> {
        let max = self.config().max_inbox_query_count;
        if count == 0 || count > max {
            return Err(ProtocolError::InvalidArgument(format!(
                "count must be between 1 and {max}, got {count}"
            )));
        }
        let request = GetMessagesFromInboxRequest {
            inbox: InboxName::parse(inbox)?,
            count,
            offset,
        };
        self.send_to_node(ctx, operation, MessageContent::encode_as(schema, &request)?)
    }

    /// Sealed request to a node, carrying the sender's encryption key in `other`.
    fn send_to_node(
        &self,
        ctx: &MessageContext<'_>,
        operation: Operation,
        content: MessageContent,
    ) -> Result<Envelope> {
        self.assemble(ctx, Draft::direct(operation, content).with_sender_key(ctx))
    }
}

pub(crate) fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ProtocolError::InvalidArgument(format!(
            "{field} must not be empty"
        )));
    }
    Ok(())
}
