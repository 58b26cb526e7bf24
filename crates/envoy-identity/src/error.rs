//! Error types for identity operations.

use thiserror::Error;

/// Errors that can occur during identity operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    /// Cryptographic operation failed.
    #[error("Crypto error: {0}")]
    Crypto(#[from] envoy_crypto::CryptoError),

    /// Identity name does not follow the `@@node[/sub...]` grammar.
    #[error("Malformed identity '{input}': {reason}")]
    MalformedIdentity {
        /// The rejected input.
        input: String,
        /// Reason for rejection.
        reason: String,
    },

    /// Inbox name does not follow either inbox grammar.
    #[error("Malformed inbox name '{input}': {reason}")]
    MalformedInbox {
        /// The rejected input.
        input: String,
        /// Reason for rejection.
        reason: String,
    },
}

impl IdentityError {
    pub(crate) fn malformed_identity(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedIdentity {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed_inbox(input: &str, reason: impl Into<String>) -> Self {
        Self::MalformedInbox {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for identity operations.
pub type Result<T> = std::result::Result<T, IdentityError>;
