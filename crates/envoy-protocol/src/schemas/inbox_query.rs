//! Inbox history queries.

use envoy_identity::InboxName;
use serde::{Deserialize, Serialize};

use super::{SchemaPayload, SchemaType};

/// Fetch the latest `count` messages of an inbox, optionally before `offset`.
///
/// The same record serves both the "last messages" and the "last unread
/// messages" schemas; the tag decides which.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetMessagesFromInboxRequest {
    /// Inbox to read.
    pub inbox: InboxName,
    /// Number of messages to return.
    pub count: usize,
    /// Key of the message to page back from.
    pub offset: Option<String>,
}

impl SchemaPayload for GetMessagesFromInboxRequest {
    const SCHEMA: SchemaType = SchemaType::APIGetMessagesFromInboxRequest;

    fn accepts(schema: &SchemaType) -> bool {
        matches!(
            schema,
            SchemaType::APIGetMessagesFromInboxRequest
                | SchemaType::APIGetUnreadMessagesFromInboxRequest
        )
    }
}

/// Mark an inbox as read up to a point in time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadUpToTimeRequest {
    /// Inbox to mark.
    pub inbox_name: InboxName,
    /// Epoch milliseconds.
    pub up_to_time: u64,
}

impl SchemaPayload for ReadUpToTimeRequest {
    const SCHEMA: SchemaType = SchemaType::APIReadUpToTimeRequest;
}
