//! Provider registration.

use std::fmt;

use envoy_identity::IdentityName;
use serde::{Deserialize, Serialize};

use super::{SchemaPayload, SchemaType};

/// A model provider an agent sub-identity talks to.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderSpec {
    /// Provider identifier, unique per profile.
    pub id: String,
    /// Full agent identity, e.g. `@@node.x/main/agent/gpt`.
    pub full_identity_name: IdentityName,
    /// Model reference, e.g. `openai:gpt-4o`.
    pub model: String,
    /// Endpoint override.
    pub external_url: Option<String>,
    /// Provider credential.
    pub api_key: Option<String>,
}

impl fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("id", &self.id)
            .field("full_identity_name", &self.full_identity_name)
            .field("model", &self.model)
            .field("external_url", &self.external_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Register a provider with a node.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddProviderRequest {
    /// The provider to add.
    pub agent: ProviderSpec,
}

impl SchemaPayload for AddProviderRequest {
    const SCHEMA: SchemaType = SchemaType::APIAddAgentRequest;
}
