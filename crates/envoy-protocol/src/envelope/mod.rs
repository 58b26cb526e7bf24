//! The envelope: the signed unit exchanged between identities.
//!
//! ## Layout
//!
//! ```text
//! +----------------------+
//! | Envelope             |
//! +----------------------+
//! | - version            |   always V1_0
//! | - encryption         |   derived from the body variant
//! | - body               | --+
//! | - external_metadata  |   | sender, recipient, scheduled_time,
//! | - signature          |   | other, intra_sender (never encrypted)
//! +----------------------+   |
//!                            v
//!        +-------------------------------+
//!        | MessageBody::Unencrypted      |  encryption == None
//!        |  - message_data (content)     |
//!        |  - internal_metadata          |  visible beside the content
//!        +-------------------------------+
//!        | MessageBody::Encrypted        |  encryption == EncryptedExchange
//!        |  - "encrypted:<hex>"          |  decrypts to the shape above
//!        +-------------------------------+
//! ```
//!
//! Where internal metadata lives is a property of the body variant, so an
//! envelope whose `encryption` tag disagrees with its body cannot be built or
//! decoded.
//!
//! ## Modules
//!
//! - [`metadata`]: external and internal metadata
//! - [`body`]: the body union and its sealed form
//! - [`message`]: the top-level [`Envelope`]

pub mod body;
pub mod message;
pub mod metadata;

pub use body::{MessageBody, MessageData, SealedBody, UnencryptedBody};
pub use message::{EncryptionMode, Envelope, ProtocolVersion};
pub use metadata::{BodyEncryption, ExternalMetadata, InternalMetadata};
