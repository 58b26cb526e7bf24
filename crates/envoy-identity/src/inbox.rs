//! Canonical inbox names.
//!
//! Inbox names identify a conversation channel and are always computed from
//! the participants (or a job id), never chosen freely:
//!
//! ```text
//! inbox::<receiver>::<sender>::<true|false>
//! job_inbox::<job_id>::<true|false>
//! ```
//!
//! The receiver is always listed first. The order is fixed rather than sorted,
//! so the inbox a node writes to is the one its peer reads from.

use std::fmt;
use std::str::FromStr;

use envoy_crypto::Hash256;
use serde::{Deserialize, Serialize};

use crate::limits::{DIRECT_INBOX_PREFIX, INBOX_SEPARATOR, JOB_INBOX_PREFIX, MAX_JOB_ID_LEN};
use crate::{IdentityError, IdentityName, Result};

/// What an inbox is scoped to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum InboxScope {
    /// A direct conversation between two identities.
    Direct {
        /// The identity the inbox is addressed to.
        receiver: IdentityName,
        /// The identity writing into the inbox.
        sender: IdentityName,
    },
    /// A channel belonging to a job.
    Job {
        /// The job id.
        job_id: String,
    },
}

/// A canonical inbox name.
///
/// Serializes as the plain string form.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InboxName {
    value: String,
    scope: InboxScope,
    is_e2e: bool,
}

/// Compute the direct inbox name between two identities.
///
/// The receiver is listed before the sender.
///
/// # Example
///
/// ```
/// use envoy_identity::{compute_inbox_name, IdentityName};
///
/// let receiver = IdentityName::parse("@@receiver.x").unwrap();
/// let sender = IdentityName::parse("@@sender.x").unwrap();
///
/// let inbox = compute_inbox_name(&receiver, &sender, false);
/// assert_eq!(inbox.as_str(), "inbox::@@receiver.x::@@sender.x::false");
/// ```
pub fn compute_inbox_name(receiver: &IdentityName, sender: &IdentityName, is_e2e: bool) -> InboxName {
    let value = format!(
        "{prefix}{sep}{receiver}{sep}{sender}{sep}{is_e2e}",
        prefix = DIRECT_INBOX_PREFIX,
        sep = INBOX_SEPARATOR,
    );
    InboxName {
        value,
        scope: InboxScope::Direct {
            receiver: receiver.clone(),
            sender: sender.clone(),
        },
        is_e2e,
    }
}

/// Compute the inbox name of a job.
///
/// # Errors
///
/// Returns `IdentityError::MalformedInbox` if the job id is empty, too long,
/// contains whitespace, or contains the `::` separator.
pub fn compute_job_inbox_name(job_id: &str, is_e2e: bool) -> Result<InboxName> {
    validate_job_id(job_id)?;
    let value = format!(
        "{prefix}{sep}{job_id}{sep}{is_e2e}",
        prefix = JOB_INBOX_PREFIX,
        sep = INBOX_SEPARATOR,
    );
    Ok(InboxName {
        value,
        scope: InboxScope::Job {
            job_id: job_id.to_string(),
        },
        is_e2e,
    })
}

fn validate_job_id(job_id: &str) -> Result<()> {
    if job_id.is_empty() {
        return Err(IdentityError::malformed_inbox(job_id, "job id is empty"));
    }
    if job_id.len() > MAX_JOB_ID_LEN {
        return Err(IdentityError::malformed_inbox(
            job_id,
            format!("job id too long: maximum {} bytes", MAX_JOB_ID_LEN),
        ));
    }
    if job_id.contains(INBOX_SEPARATOR) {
        return Err(IdentityError::malformed_inbox(
            job_id,
            "job id contains the '::' separator",
        ));
    }
    if job_id.chars().any(char::is_whitespace) {
        return Err(IdentityError::malformed_inbox(job_id, "job id contains whitespace"));
    }
    Ok(())
}

impl InboxName {
    /// Parse an inbox name produced by [`compute_inbox_name`] or
    /// [`compute_job_inbox_name`].
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MalformedInbox` if the input matches neither
    /// grammar, the trailing flag is not `true`/`false`, or an embedded
    /// identity or job id is invalid.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split(INBOX_SEPARATOR).collect();
        let (flag, body) = match parts.split_last() {
            Some((flag, body)) if !body.is_empty() => (*flag, body),
            _ => return Err(IdentityError::malformed_inbox(input, "missing components")),
        };

        let is_e2e = match flag {
            "true" => true,
            "false" => false,
            other => {
                return Err(IdentityError::malformed_inbox(
                    input,
                    format!("trailing flag must be 'true' or 'false', got '{}'", other),
                ))
            }
        };

        let parsed = match body {
            [DIRECT_INBOX_PREFIX, receiver, sender] => {
                let receiver = IdentityName::parse(receiver)
                    .map_err(|e| IdentityError::malformed_inbox(input, e.to_string()))?;
                let sender = IdentityName::parse(sender)
                    .map_err(|e| IdentityError::malformed_inbox(input, e.to_string()))?;
                compute_inbox_name(&receiver, &sender, is_e2e)
            }
            [JOB_INBOX_PREFIX, job_id] => compute_job_inbox_name(job_id, is_e2e)
                .map_err(|e| IdentityError::malformed_inbox(input, e.to_string()))?,
            _ => {
                return Err(IdentityError::malformed_inbox(
                    input,
                    "expected 'inbox::<receiver>::<sender>::<flag>' or 'job_inbox::<job_id>::<flag>'",
                ))
            }
        };

        Ok(parsed)
    }

    /// Get the canonical string form.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// What this inbox is scoped to.
    pub fn scope(&self) -> &InboxScope {
        &self.scope
    }

    /// The end-to-end flag carried in the name.
    pub fn is_e2e(&self) -> bool {
        self.is_e2e
    }

    /// Whether this is a job inbox.
    pub fn is_job(&self) -> bool {
        matches!(self.scope, InboxScope::Job { .. })
    }

    /// The job id for job inboxes.
    pub fn job_id(&self) -> Option<&str> {
        match &self.scope {
            InboxScope::Job { job_id } => Some(job_id),
            InboxScope::Direct { .. } => None,
        }
    }

    /// Receiver and sender for direct inboxes.
    pub fn identities(&self) -> Option<(&IdentityName, &IdentityName)> {
        match &self.scope {
            InboxScope::Direct { receiver, sender } => Some((receiver, sender)),
            InboxScope::Job { .. } => None,
        }
    }

    /// First half of the BLAKE3 hex digest of the name.
    ///
    /// A fixed-width key for storage layers that cannot hold arbitrary strings.
    pub fn hash_prefix(&self) -> String {
        let digest = Hash256::hash(self.value.as_bytes()).to_hex();
        digest[..digest.len() / 2].to_string()
    }
}

impl fmt::Display for InboxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for InboxName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InboxName({})", self.value)
    }
}

impl FromStr for InboxName {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for InboxName {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<InboxName> for String {
    fn from(inbox: InboxName) -> Self {
        inbox.value
    }
}

impl AsRef<str> for InboxName {
    fn as_ref(&self) -> &str {
        &self.value
    }
}
