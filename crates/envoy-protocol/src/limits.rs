//! Protocol limits and constants.
//!
//! All protocol constants are defined here for consistent enforcement.

// === Wire format ===

/// Version tag written into every envelope.
pub const PROTOCOL_VERSION_TAG: &str = "V1_0";

/// Prefix of the text form of an encrypted body.
pub const CIPHERTEXT_PREFIX: &str = "encrypted:";

/// Prefix of the wire tag of a custom schema.
pub const CUSTOM_SCHEMA_PREFIX: &str = "custom:";

/// BLAKE3 context for deriving body keys from an X25519 shared secret.
pub const BODY_ENCRYPTION_CONTEXT: &str = "envoy body encryption v1";

// === Fixed contents ===

/// Raw content of an acknowledgement.
pub const ACK_CONTENT: &str = "ACK";

/// Raw content of a terminate message.
pub const TERMINATE_CONTENT: &str = "terminate";

/// Workflow name placeholder that decodes as "no workflow".
pub const UNDEFINED_WORKFLOW_NAME: &str = "undefined:::undefined";

// === Defaults ===

/// Default maximum raw content size in bytes (16 MiB).
pub const DEFAULT_MAX_RAW_CONTENT_LEN: usize = 16 * 1024 * 1024;

/// Room for metadata, signature and JSON framing around a body.
pub const ENVELOPE_OVERHEAD_ALLOWANCE: usize = 64 * 1024;

/// Default maximum serialized envelope size in bytes (32 MiB + 64 KiB).
///
/// A sealed body is hex text, twice the size of the serialized plaintext, and
/// the plaintext carries the raw content plus its internal metadata. Content
/// at the raw limit fits when it needs no JSON escaping; content that escapes
/// heavily can still exceed this, and the builder refuses such envelopes
/// instead of emitting them.
pub const DEFAULT_MAX_ENVELOPE_LEN: usize =
    2 * DEFAULT_MAX_RAW_CONTENT_LEN + ENVELOPE_OVERHEAD_ALLOWANCE;

/// Default maximum `count` of an inbox history query.
pub const DEFAULT_MAX_INBOX_QUERY_COUNT: usize = 1000;
