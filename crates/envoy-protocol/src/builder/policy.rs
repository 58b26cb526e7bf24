//! Which operations are encrypted.
//!
//! Operations that happen before two parties share a trust context go out in
//! the clear and rely on the signature alone. Everything that touches an
//! established inbox or private state is sealed for the recipient.

use std::fmt;

use crate::envelope::EncryptionMode;

/// Every message the builder can produce.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Acknowledgement.
    Ack,
    /// Liveness probe.
    PingPong,
    /// End of conversation.
    Terminate,
    /// Error reported to a peer.
    ErrorReport,
    /// First device registration, before any code exists.
    RegistrationWithoutCode,
    /// Redeem a registration code for a profile or device.
    RegistrationWithCode,
    /// Ask a node to mint a registration code.
    RequestRegistrationCode,
    /// Create a job.
    JobCreation,
    /// Post into a job.
    JobMessage,
    /// Read the latest messages of an inbox.
    LastMessagesFromInbox,
    /// Read the latest unread messages of an inbox.
    LastUnreadMessagesFromInbox,
    /// Mark an inbox read.
    ReadUpToTime,
    /// List a profile's inboxes.
    AllInboxesForProfile,
    /// Register a model provider.
    AddProvider,
    /// Hand a symmetric key to a peer.
    SymmetricKeyExchange,
    /// Vector file-system operation.
    FileSystem,
    /// Caller-defined payload.
    Custom,
}

impl Operation {
    /// All operations, in declaration order.
    pub const ALL: [Operation; 17] = [
        Operation::Ack,
        Operation::PingPong,
        Operation::Terminate,
        Operation::ErrorReport,
        Operation::RegistrationWithoutCode,
        Operation::RegistrationWithCode,
        Operation::RequestRegistrationCode,
        Operation::JobCreation,
        Operation::JobMessage,
        Operation::LastMessagesFromInbox,
        Operation::LastUnreadMessagesFromInbox,
        Operation::ReadUpToTime,
        Operation::AllInboxesForProfile,
        Operation::AddProvider,
        Operation::SymmetricKeyExchange,
        Operation::FileSystem,
        Operation::Custom,
    ];

    /// Envelope encryption used for this operation.
    pub fn encryption_mode(self) -> EncryptionMode {
        match self {
            Self::Ack
            | Self::PingPong
            | Self::Terminate
            | Self::ErrorReport
            | Self::RegistrationWithoutCode => EncryptionMode::None,

            Self::RegistrationWithCode
            | Self::RequestRegistrationCode
            | Self::JobCreation
            | Self::JobMessage
            | Self::LastMessagesFromInbox
            | Self::LastUnreadMessagesFromInbox
            | Self::ReadUpToTime
            | Self::AllInboxesForProfile
            | Self::AddProvider
            | Self::SymmetricKeyExchange
            | Self::FileSystem
            | Self::Custom => EncryptionMode::EncryptedExchange,
        }
    }

    /// Whether the operation needs the recipient's encryption key.
    pub fn requires_recipient_key(self) -> bool {
        self.encryption_mode() == EncryptionMode::EncryptedExchange
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
