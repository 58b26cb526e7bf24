//! Identity and inbox limits.

/// Prefix every identity name starts with.
pub const NODE_PREFIX: &str = "@@";

/// Separator between identity segments.
pub const SEGMENT_SEPARATOR: char = '/';

/// Separator between inbox name components.
pub const INBOX_SEPARATOR: &str = "::";

/// Leading component of a direct inbox name.
pub const DIRECT_INBOX_PREFIX: &str = "inbox";

/// Leading component of a job inbox name.
pub const JOB_INBOX_PREFIX: &str = "job_inbox";

/// Maximum length of an identity name in bytes.
pub const MAX_IDENTITY_NAME_LEN: usize = 255;

/// Maximum length of a job id in bytes.
pub const MAX_JOB_ID_LEN: usize = 255;
