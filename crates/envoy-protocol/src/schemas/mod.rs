//! Content schema registry.
//!
//! A [`SchemaType`] names the shape of a message's raw content. The set of
//! built-in tags is closed; `Custom(name)` lets collaborators carry their own
//! payloads under an explicit `custom:<name>` tag without touching the decode
//! path. Any other tag fails with [`ProtocolError::UnknownSchema`].
//!
//! Typed payloads implement [`SchemaPayload`], which binds each record to the
//! tag it travels under. [`MessageContent::encode`] and
//! [`MessageContent::decode`] move between the two.

pub mod filesystem;
pub mod inbox_query;
pub mod job;
pub mod provider;
pub mod registration;

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ProtocolError, Result};
use crate::limits::{ACK_CONTENT, CUSTOM_SCHEMA_PREFIX};

pub use filesystem::{
    ConvertFilesAndSaveToFolder, VecFsCopyFolder, VecFsCopyItem, VecFsCreateFolder,
    VecFsMoveFolder, VecFsMoveItem, VecFsRetrievePath, VecFsVectorSearch,
};
pub use inbox_query::{GetMessagesFromInboxRequest, ReadUpToTimeRequest};
pub use job::{
    CallbackAction, JobCreationInfo, JobMessage, JobScope, SheetJobAction, SheetManagerAction,
};
pub use provider::{AddProviderRequest, ProviderSpec};
pub use registration::{
    IdentityPermissions, IdentityType, RegistrationCode, RegistrationCodeRequest,
    RegistrationCodeType,
};

/// Tag identifying the shape of a message's raw content.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SchemaType {
    /// No payload. Raw content is the literal `ACK`.
    Empty,
    /// Free text.
    TextContent,
    /// [`JobCreationInfo`].
    JobCreationSchema,
    /// [`JobMessage`].
    JobMessageSchema,
    /// [`RegistrationCodeRequest`].
    CreateRegistrationCode,
    /// [`RegistrationCode`].
    UseRegistrationCode,
    /// [`GetMessagesFromInboxRequest`] for the latest messages.
    APIGetMessagesFromInboxRequest,
    /// [`GetMessagesFromInboxRequest`] for the latest unread messages.
    APIGetUnreadMessagesFromInboxRequest,
    /// [`ReadUpToTimeRequest`].
    APIReadUpToTimeRequest,
    /// [`AddProviderRequest`].
    APIAddAgentRequest,
    /// [`SymmetricKeyExchange`].
    SymmetricKeyExchange,
    /// [`VecFsCreateFolder`].
    VecFsCreateFolder,
    /// [`VecFsMoveFolder`].
    VecFsMoveFolder,
    /// [`VecFsCopyFolder`].
    VecFsCopyFolder,
    /// [`VecFsMoveItem`].
    VecFsMoveItem,
    /// [`VecFsCopyItem`].
    VecFsCopyItem,
    /// [`VecFsRetrievePath`].
    VecFsRetrievePathSimplifiedJson,
    /// [`VecFsVectorSearch`].
    VecFsRetrieveVectorSearchSimplifiedJson,
    /// [`ConvertFilesAndSaveToFolder`].
    ConvertFilesAndSaveToFolder,
    /// Caller-defined payload, wire form `custom:<name>`.
    Custom(String),
}

impl SchemaType {
    /// Every built-in tag, in declaration order.
    pub const BUILTIN: &'static [SchemaType] = &[
        SchemaType::Empty,
        SchemaType::TextContent,
        SchemaType::JobCreationSchema,
        SchemaType::JobMessageSchema,
        SchemaType::CreateRegistrationCode,
        SchemaType::UseRegistrationCode,
        SchemaType::APIGetMessagesFromInboxRequest,
        SchemaType::APIGetUnreadMessagesFromInboxRequest,
        SchemaType::APIReadUpToTimeRequest,
        SchemaType::APIAddAgentRequest,
        SchemaType::SymmetricKeyExchange,
        SchemaType::VecFsCreateFolder,
        SchemaType::VecFsMoveFolder,
        SchemaType::VecFsCopyFolder,
        SchemaType::VecFsMoveItem,
        SchemaType::VecFsCopyItem,
        SchemaType::VecFsRetrievePathSimplifiedJson,
        SchemaType::VecFsRetrieveVectorSearchSimplifiedJson,
        SchemaType::ConvertFilesAndSaveToFolder,
    ];

    /// Create a custom schema tag.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the name is empty or contains whitespace.
    pub fn custom(name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || name.chars().any(char::is_whitespace) {
            return Err(ProtocolError::InvalidArgument(format!(
                "custom schema name '{name}' must be non-empty and contain no whitespace"
            )));
        }
        Ok(Self::Custom(name))
    }

    /// Parse a wire tag.
    ///
    /// # Errors
    ///
    /// Returns `UnknownSchema` for any tag outside the registry.
    pub fn parse(tag: &str) -> Result<Self> {
        if let Some(name) = tag.strip_prefix(CUSTOM_SCHEMA_PREFIX) {
            return Self::custom(name).map_err(|_| ProtocolError::UnknownSchema(tag.to_string()));
        }
        Self::BUILTIN
            .iter()
            .find(|schema| schema.builtin_tag() == Some(tag))
            .cloned()
            .ok_or_else(|| ProtocolError::UnknownSchema(tag.to_string()))
    }

    /// The wire tag.
    pub fn wire_tag(&self) -> String {
        match self {
            Self::Custom(name) => format!("{CUSTOM_SCHEMA_PREFIX}{name}"),
            builtin => builtin.builtin_tag().unwrap_or_default().to_string(),
        }
    }

    /// Whether this is a caller-defined schema.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    fn builtin_tag(&self) -> Option<&'static str> {
        let tag = match self {
            Self::Empty => "",
            Self::TextContent => "TextContent",
            Self::JobCreationSchema => "JobCreationSchema",
            Self::JobMessageSchema => "JobMessageSchema",
            Self::CreateRegistrationCode => "CreateRegistrationCode",
            Self::UseRegistrationCode => "UseRegistrationCode",
            Self::APIGetMessagesFromInboxRequest => "APIGetMessagesFromInboxRequest",
            Self::APIGetUnreadMessagesFromInboxRequest => "APIGetUnreadMessagesFromInboxRequest",
            Self::APIReadUpToTimeRequest => "APIReadUpToTimeRequest",
            Self::APIAddAgentRequest => "APIAddAgentRequest",
            Self::SymmetricKeyExchange => "SymmetricKeyExchange",
            Self::VecFsCreateFolder => "VecFsCreateFolder",
            Self::VecFsMoveFolder => "VecFsMoveFolder",
            Self::VecFsCopyFolder => "VecFsCopyFolder",
            Self::VecFsMoveItem => "VecFsMoveItem",
            Self::VecFsCopyItem => "VecFsCopyItem",
            Self::VecFsRetrievePathSimplifiedJson => "VecFsRetrievePathSimplifiedJson",
            Self::VecFsRetrieveVectorSearchSimplifiedJson => {
                "VecFsRetrieveVectorSearchSimplifiedJson"
            }
            Self::ConvertFilesAndSaveToFolder => "ConvertFilesAndSaveToFolder",
            Self::Custom(_) => return None,
        };
        Some(tag)
    }
}

impl fmt::Display for SchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("Empty"),
            other => f.write_str(&other.wire_tag()),
        }
    }
}

impl Serialize for SchemaType {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.wire_tag())
    }
}

impl<'de> Deserialize<'de> for SchemaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Self::parse(&tag).map_err(serde::de::Error::custom)
    }
}

/// A typed payload bound to the schema tag it travels under.
pub trait SchemaPayload: Serialize + DeserializeOwned {
    /// Tag written when this payload is encoded.
    const SCHEMA: SchemaType;

    /// Whether content tagged `schema` may be decoded as this payload.
    fn accepts(schema: &SchemaType) -> bool {
        *schema == Self::SCHEMA
    }
}

/// Raw content plus its schema tag: the plaintext of a message body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageContent {
    /// Serialized payload (JSON for structured schemas, free text otherwise).
    pub message_raw_content: String,
    /// Shape of `message_raw_content`.
    pub message_content_schema: SchemaType,
}

impl MessageContent {
    /// Create content from raw parts.
    pub fn new(raw_content: impl Into<String>, schema: SchemaType) -> Self {
        Self {
            message_raw_content: raw_content.into(),
            message_content_schema: schema,
        }
    }

    /// The acknowledgement content: `ACK` under the `Empty` schema.
    pub fn ack() -> Self {
        Self::new(ACK_CONTENT, SchemaType::Empty)
    }

    /// Free text under the `TextContent` schema.
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text, SchemaType::TextContent)
    }

    /// Encode a typed payload under its own schema tag.
    pub fn encode<P: SchemaPayload>(payload: &P) -> Result<Self> {
        Self::encode_as(P::SCHEMA, payload)
    }

    /// Encode any serializable payload under an explicit schema tag.
    pub fn encode_as<P: Serialize + ?Sized>(schema: SchemaType, payload: &P) -> Result<Self> {
        let raw = serde_json::to_string(payload)
            .map_err(|e| ProtocolError::Serialization(e.to_string()))?;
        Ok(Self::new(raw, schema))
    }

    /// Decode the raw content as a typed payload.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the content is tagged with a schema the
    /// payload does not accept, or `Serialization` if the JSON does not match.
    pub fn decode<P: SchemaPayload>(&self) -> Result<P> {
        if !P::accepts(&self.message_content_schema) {
            return Err(ProtocolError::InvalidArgument(format!(
                "content schema {} does not match expected {}",
                self.message_content_schema,
                P::SCHEMA
            )));
        }
        self.decode_json()
    }

    /// Decode a caller-defined payload carried under `custom:<name>`.
    pub fn decode_custom<P: DeserializeOwned>(&self, name: &str) -> Result<P> {
        match &self.message_content_schema {
            SchemaType::Custom(tag) if tag == name => self.decode_json(),
            other => Err(ProtocolError::InvalidArgument(format!(
                "content schema {other} is not custom:{name}"
            ))),
        }
    }

    fn decode_json<P: DeserializeOwned>(&self) -> Result<P> {
        serde_json::from_str(&self.message_raw_content)
            .map_err(|e| ProtocolError::Serialization(e.to_string()))
    }
}

/// Hex-encoded symmetric key handed to a peer.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymmetricKeyExchange {
    /// Key bytes as lowercase hex.
    pub shared_secret_key: String,
}

impl fmt::Debug for SymmetricKeyExchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SymmetricKeyExchange")
            .field("shared_secret_key", &"[REDACTED]")
            .finish()
    }
}

impl SchemaPayload for SymmetricKeyExchange {
    const SCHEMA: SchemaType = SchemaType::SymmetricKeyExchange;
}

/// Error text reported to a peer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    /// Human-readable error.
    pub error: String,
}

impl SchemaPayload for ErrorReport {
    const SCHEMA: SchemaType = SchemaType::TextContent;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_tags_parse_back() {
        for schema in SchemaType::BUILTIN {
            assert_eq!(&SchemaType::parse(&schema.wire_tag()).unwrap(), schema);
        }
    }

    #[test]
    fn test_empty_schema_is_empty_string() {
        assert_eq!(SchemaType::Empty.wire_tag(), "");
        assert_eq!(SchemaType::parse("").unwrap(), SchemaType::Empty);
        assert_eq!(
            serde_json::to_string(&SchemaType::Empty).unwrap(),
            "\"\""
        );
    }

    #[test]
    fn test_custom_tag() {
        let schema = SchemaType::custom("weather").unwrap();
        assert_eq!(schema.wire_tag(), "custom:weather");
        assert_eq!(SchemaType::parse("custom:weather").unwrap(), schema);
        assert!(schema.is_custom());
    }

    #[test]
    fn test_custom_name_rejected_when_empty() {
        assert!(matches!(
            SchemaType::custom(""),
            Err(ProtocolError::InvalidArgument(_))
        ));
        assert!(matches!(
            SchemaType::parse("custom:"),
            Err(ProtocolError::UnknownSchema(_))
        ));
    }

    #[test]
    fn test_unknown_tag_rejected() {
        assert!(matches!(
            SchemaType::parse("NotASchema"),
            Err(ProtocolError::UnknownSchema(ref tag)) if tag == "NotASchema"
        ));
        assert!(serde_json::from_str::<SchemaType>("\"NotASchema\"").is_err());
    }

    #[test]
    fn test_ack_content() {
        let ack = MessageContent::ack();
        assert_eq!(ack.message_raw_content, "ACK");
        assert_eq!(ack.message_content_schema, SchemaType::Empty);
    }

    #[test]
    fn test_encode_decode_payload() {
        let exchange = SymmetricKeyExchange {
            shared_secret_key: "ab".repeat(32),
        };
        let content = MessageContent::encode(&exchange).unwrap();
        assert_eq!(content.message_content_schema, SchemaType::SymmetricKeyExchange);

        let decoded: SymmetricKeyExchange = content.decode().unwrap();
        assert_eq!(decoded, exchange);
    }

    #[test]
    fn test_decode_with_wrong_schema_fails() {
        let content = MessageContent::text("hello");
        let result: Result<SymmetricKeyExchange> = content.decode();
        assert!(matches!(result, Err(ProtocolError::InvalidArgument(_))));
    }

    #[test]
    fn test_decode_custom() {
        #[derive(Serialize, Deserialize, PartialEq, Debug)]
        struct Forecast {
            city: String,
            celsius: i32,
        }

        let forecast = Forecast {
            city: "Lisbon".into(),
            celsius: 21,
        };
        let content =
            MessageContent::encode_as(SchemaType::custom("forecast").unwrap(), &forecast).unwrap();

        let decoded: Forecast = content.decode_custom("forecast").unwrap();
        assert_eq!(decoded, forecast);
        assert!(content.decode_custom::<Forecast>("other").is_err());
    }

    #[test]
    fn test_error_report_shape() {
        let content = MessageContent::encode(&ErrorReport {
            error: "boom".into(),
        })
        .unwrap();
        assert_eq!(content.message_raw_content, r#"{"error":"boom"}"#);
        assert_eq!(content.message_content_schema, SchemaType::TextContent);
    }

    #[test]
    fn test_symmetric_key_debug_redacted() {
        let exchange = SymmetricKeyExchange {
            shared_secret_key: "deadbeef".into(),
        };
        let debug = format!("{exchange:?}");
        assert!(!debug.contains("deadbeef"));
        assert!(debug.contains("REDACTED"));
    }
}
