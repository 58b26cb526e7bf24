//! Configuration for message building and decoding.
//!
//! Only size limits are configurable. Nothing is read from the environment
//! or from files.
//!
//! # Example
//!
//! ```
//! use envoy_protocol::config::{ProtocolConfig, ProtocolConfigBuilder};
//!
//! // Use defaults
//! let config = ProtocolConfig::default();
//!
//! // Or use builder for customization
//! let config = ProtocolConfigBuilder::new()
//!     .with_max_raw_content_len(64 * 1024)
//!     .with_max_envelope_len(256 * 1024)
//!     .with_max_inbox_query_count(50)
//!     .build();
//! assert!(config.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::limits::{
    DEFAULT_MAX_ENVELOPE_LEN, DEFAULT_MAX_INBOX_QUERY_COUNT, DEFAULT_MAX_RAW_CONTENT_LEN,
};

/// Protocol configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Largest accepted raw content, in bytes.
    ///
    /// The builder rejects larger content with `InvalidArgument`.
    pub max_raw_content_len: usize,

    /// Largest accepted serialized envelope, in bytes.
    ///
    /// The codec rejects larger input with `MalformedEnvelope` before parsing,
    /// and the builder refuses to produce a larger envelope with
    /// `InvalidArgument`.
    pub max_envelope_len: usize,

    /// Largest `count` accepted by an inbox history query.
    pub max_inbox_query_count: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            max_raw_content_len: DEFAULT_MAX_RAW_CONTENT_LEN,
            max_envelope_len: DEFAULT_MAX_ENVELOPE_LEN,
            max_inbox_query_count: DEFAULT_MAX_INBOX_QUERY_COUNT,
        }
    }
}

impl ProtocolConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a configuration builder.
    pub fn builder() -> ProtocolConfigBuilder {
        ProtocolConfigBuilder::new()
    }

    /// Validate the configuration.
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_raw_content_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_raw_content_len".into(),
                reason: "content limit must be greater than zero".into(),
            });
        }

        if self.max_envelope_len == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_envelope_len".into(),
                reason: "envelope limit must be greater than zero".into(),
            });
        }

        if self.max_envelope_len < self.max_raw_content_len {
            return Err(ConfigError::InvalidValue {
                field: "max_envelope_len".into(),
                reason: "envelope limit cannot be smaller than the content limit".into(),
            });
        }

        if self.max_inbox_query_count == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_inbox_query_count".into(),
                reason: "query count limit must be greater than zero".into(),
            });
        }

        Ok(())
    }
}

/// Builder for [`ProtocolConfig`].
#[derive(Clone, Debug, Default)]
pub struct ProtocolConfigBuilder {
    config: ProtocolConfig,
}

impl ProtocolConfigBuilder {
    /// Create a new builder with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the final configuration.
    pub fn build(self) -> ProtocolConfig {
        self.config
    }

    /// Build and validate the configuration.
    ///
    /// Returns an error if validation fails.
    pub fn build_validated(self) -> Result<ProtocolConfig, ConfigError> {
        let config = self.build();
        config.validate()?;
        Ok(config)
    }

    /// Set the largest accepted raw content size.
    pub fn with_max_raw_content_len(mut self, len: usize) -> Self {
        self.config.max_raw_content_len = len;
        self
    }

    /// Set the largest accepted serialized envelope size.
    pub fn with_max_envelope_len(mut self, len: usize) -> Self {
        self.config.max_envelope_len = len;
        self
    }

    /// Set the largest accepted inbox query count.
    pub fn with_max_inbox_query_count(mut self, count: usize) -> Self {
        self.config.max_inbox_query_count = count;
        self
    }
}

/// Configuration errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        /// The field name.
        field: String,
        /// The reason it's invalid.
        reason: String,
    },
}
