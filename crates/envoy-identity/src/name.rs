//! Hierarchical identity names.
//!
//! An identity name addresses a node or one of its sub-identities:
//!
//! ```text
//! @@alice.shinkai
//! @@alice.shinkai/main
//! @@alice.shinkai/main/device/phone
//! @@alice.shinkai/main/agent/helper
//! ```
//!
//! ## Validation Rules
//!
//! - Starts with `@@` followed by a non-empty node name
//! - Segments are separated by `/`; no segment may be empty (so no trailing slash)
//! - Allowed characters: alphanumeric (a-z, A-Z, 0-9), underscore (_), hyphen (-), dot (.)
//! - At most 255 bytes

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::limits::{MAX_IDENTITY_NAME_LEN, NODE_PREFIX, SEGMENT_SEPARATOR};
use crate::{IdentityError, Result};

/// Kind of sub-identity named by the third segment of an identity name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubidentityKind {
    /// An agent acting for a profile (`.../agent/<name>`).
    Agent,
    /// A device belonging to a profile (`.../device/<name>`).
    Device,
}

impl SubidentityKind {
    /// The path segment for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Agent => "agent",
            Self::Device => "device",
        }
    }
}

impl fmt::Display for SubidentityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validated identity name.
///
/// Immutable once constructed. Serializes as the plain string.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct IdentityName(String);

impl IdentityName {
    /// Parse and validate an identity name.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MalformedIdentity` if:
    /// - The `@@` node prefix is missing or the node name is empty
    /// - Any path segment is empty (including a trailing slash)
    /// - A segment contains characters outside `[A-Za-z0-9_.-]`
    /// - The name is longer than 255 bytes
    ///
    /// # Examples
    ///
    /// ```
    /// use envoy_identity::IdentityName;
    ///
    /// let name = IdentityName::parse("@@alice.shinkai/main").unwrap();
    /// assert_eq!(name.node(), "@@alice.shinkai");
    ///
    /// assert!(IdentityName::parse("alice.shinkai").is_err()); // Missing @@
    /// assert!(IdentityName::parse("@@alice.shinkai//x").is_err()); // Empty segment
    /// ```
    pub fn parse(input: &str) -> Result<Self> {
        Self::validate(input)?;
        Ok(Self(input.to_string()))
    }

    /// Validate an identity string without creating an `IdentityName`.
    pub fn validate(input: &str) -> Result<()> {
        if input.len() > MAX_IDENTITY_NAME_LEN {
            return Err(IdentityError::malformed_identity(
                input,
                format!(
                    "too long: maximum {} bytes, got {}",
                    MAX_IDENTITY_NAME_LEN,
                    input.len()
                ),
            ));
        }

        let rest = input.strip_prefix(NODE_PREFIX).ok_or_else(|| {
            IdentityError::malformed_identity(input, "missing '@@' node prefix")
        })?;

        for (index, segment) in rest.split(SEGMENT_SEPARATOR).enumerate() {
            if segment.is_empty() {
                let reason = if index == 0 {
                    "node name is empty".to_string()
                } else {
                    format!("path segment {} is empty", index)
                };
                return Err(IdentityError::malformed_identity(input, reason));
            }

            if let Some(c) = segment.chars().find(|c| !is_segment_char(*c)) {
                return Err(IdentityError::malformed_identity(
                    input,
                    format!("invalid character '{}' in segment '{}'", c, segment),
                ));
            }
        }

        Ok(())
    }

    /// Get the full name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The node segment, including its `@@` prefix.
    pub fn node(&self) -> &str {
        match self.0.split_once(SEGMENT_SEPARATOR) {
            Some((node, _)) => node,
            None => &self.0,
        }
    }

    /// The node this identity belongs to, as an identity name of its own.
    pub fn node_name(&self) -> IdentityName {
        Self(self.node().to_string())
    }

    /// Everything after the node segment, or `None` for a bare node.
    pub fn subidentity_path(&self) -> Option<&str> {
        self.0.split_once(SEGMENT_SEPARATOR).map(|(_, path)| path)
    }

    /// Iterate over the path segments after the node.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.subidentity_path()
            .into_iter()
            .flat_map(|path| path.split(SEGMENT_SEPARATOR))
    }

    /// The profile segment, if present.
    pub fn profile(&self) -> Option<&str> {
        self.segments().next()
    }

    /// Whether this name addresses something below the node.
    pub fn has_profile(&self) -> bool {
        self.profile().is_some()
    }

    /// Whether this name is a bare node.
    pub fn is_node(&self) -> bool {
        self.subidentity_path().is_none()
    }

    /// The sub-identity kind named by the third segment, if it is `agent` or `device`.
    pub fn subidentity_kind(&self) -> Option<SubidentityKind> {
        match self.segments().nth(1) {
            Some("agent") => Some(SubidentityKind::Agent),
            Some("device") => Some(SubidentityKind::Device),
            _ => None,
        }
    }

    /// The device or agent name (fourth segment), if any.
    pub fn subidentity_name(&self) -> Option<&str> {
        self.subidentity_kind()?;
        self.segments().nth(2)
    }

    /// Node plus profile, dropping any device or agent segments.
    ///
    /// # Errors
    ///
    /// Returns `IdentityError::MalformedIdentity` if there is no profile segment.
    pub fn extract_profile(&self) -> Result<IdentityName> {
        let profile = self.profile().ok_or_else(|| {
            IdentityError::malformed_identity(&self.0, "identity has no profile segment")
        })?;
        Ok(Self(format!("{}{}{}", self.node(), SEGMENT_SEPARATOR, profile)))
    }

    /// Append a sub-identity path below this name.
    ///
    /// An empty `path` returns a copy of `self`.
    pub fn with_subidentity(&self, path: &str) -> Result<IdentityName> {
        if path.is_empty() {
            return Ok(self.clone());
        }
        Self::parse(&format!("{}{}{}", self.0, SEGMENT_SEPARATOR, path))
    }

    /// Whether `self` equals `other` or is one of its ancestors.
    ///
    /// `@@a.shinkai` contains `@@a.shinkai/main/device/phone`; the reverse is false.
    pub fn contains(&self, other: &IdentityName) -> bool {
        let mut theirs = other.0.split(SEGMENT_SEPARATOR);
        self.0
            .split(SEGMENT_SEPARATOR)
            .all(|ours| theirs.next() == Some(ours))
    }
}

fn is_segment_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')
}

impl fmt::Display for IdentityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for IdentityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityName({})", self.0)
    }
}

impl FromStr for IdentityName {
    type Err = IdentityError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for IdentityName {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self> {
        Self::validate(&value)?;
        Ok(Self(value))
    }
}

impl From<IdentityName> for String {
    fn from(name: IdentityName) -> Self {
        name.0
    }
}

impl AsRef<str> for IdentityName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
