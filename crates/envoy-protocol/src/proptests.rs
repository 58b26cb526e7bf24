//! Property-based tests for envelope construction and transport.

use proptest::prelude::*;

use envoy_identity::{
    compute_inbox_name, compute_job_inbox_name, IdentityKeyPair, IdentityName, InboxName,
};

use crate::codec;
use crate::encryption::open_envelope;
use crate::envelope::{MessageBody, SealedBody};
use crate::error::ProtocolError;
use crate::schemas::{
    AddProviderRequest, ConvertFilesAndSaveToFolder, ErrorReport, GetMessagesFromInboxRequest,
    IdentityPermissions, IdentityType, JobCreationInfo, JobMessage, JobScope, MessageContent,
    ProviderSpec, ReadUpToTimeRequest, RegistrationCode, RegistrationCodeRequest,
    RegistrationCodeType, SchemaPayload, SchemaType, SheetJobAction, SymmetricKeyExchange,
    VecFsCopyFolder, VecFsCopyItem, VecFsCreateFolder, VecFsMoveFolder, VecFsMoveItem,
    VecFsRetrievePath, VecFsVectorSearch,
};
use crate::signing::verify_envelope;
use crate::{MessageBuilder, MessageContext};

fn keys(seed: u8) -> IdentityKeyPair {
    IdentityKeyPair::from_seed(&[seed; 32])
}

/// Encode `payload` as message content and decode it back.
fn reencode<P: SchemaPayload>(payload: &P) -> P {
    let content = MessageContent::encode(payload).unwrap();
    assert_eq!(content.message_content_schema, P::SCHEMA);
    content.decode().unwrap()
}

fn identity_name() -> impl Strategy<Value = IdentityName> {
    ("[a-z0-9_]{1,10}\\.[a-z]{2,6}", proptest::option::of("[a-z0-9_]{1,10}"))
        .prop_map(|(node, sub)| {
            let raw = match sub {
                Some(sub) => format!("@@{node}/{sub}"),
                None => format!("@@{node}"),
            };
            IdentityName::parse(&raw).unwrap()
        })
}

fn inbox_name() -> impl Strategy<Value = InboxName> {
    prop_oneof![
        (identity_name(), identity_name(), any::<bool>())
            .prop_map(|(a, b, e2e)| compute_inbox_name(&a, &b, e2e)),
        ("[a-z0-9_]{1,20}", any::<bool>())
            .prop_map(|(job, e2e)| compute_job_inbox_name(&job, e2e).unwrap()),
    ]
}

fn permissions() -> impl Strategy<Value = IdentityPermissions> {
    prop_oneof![
        Just(IdentityPermissions::Admin),
        Just(IdentityPermissions::Standard),
        Just(IdentityPermissions::None),
    ]
}

fn code_type() -> impl Strategy<Value = RegistrationCodeType> {
    prop_oneof![
        Just(RegistrationCodeType::Profile),
        ".{1,24}".prop_map(RegistrationCodeType::Device),
    ]
}

fn path() -> impl Strategy<Value = String> {
    "(/[A-Za-z0-9 _.-]{1,12}){0,4}"
}

// ==================== Codec Property Tests ====================

proptest! {
    /// Clear envelopes survive the codec unchanged and still verify.
    #[test]
    fn clear_envelope_roundtrip(text in ".{0,200}", time in any::<u64>()) {
        let sender = keys(1);
        let ctx = MessageContext::new(&sender, "@@a.x", "@@b.x", time).unwrap();
        let envelope = MessageBuilder::default().error_report(&ctx, &text).unwrap();

        let bytes = codec::serialize(&envelope).unwrap();
        let decoded = codec::deserialize(&bytes).unwrap();

        prop_assert_eq!(&decoded, &envelope);
        prop_assert!(verify_envelope(&decoded, &sender.signing_public()).is_ok());
    }

    /// Sealed envelopes decode, open to the original content, and verify.
    #[test]
    fn sealed_envelope_roundtrip(text in ".{0,200}") {
        let sender = keys(1);
        let recipient = keys(2);
        let ctx = MessageContext::new(&sender, "@@a.x", "@@b.x", 0)
            .unwrap()
            .with_recipient_key(recipient.encryption_public());
        let envelope = MessageBuilder::default().custom(&ctx, "note", &text).unwrap();

        let decoded = codec::deserialize(&codec::serialize(&envelope).unwrap()).unwrap();
        prop_assert!(verify_envelope(&decoded, &sender.signing_public()).is_ok());

        let opened = open_envelope(
            &decoded,
            recipient.encryption_secret(),
            &sender.encryption_public(),
        )
        .unwrap();
        let content = opened.content().unwrap();
        prop_assert_eq!(content.decode_custom::<String>("note").unwrap(), text);
    }

    /// Flipping any bit of a sealed body makes opening fail authentication.
    #[test]
    fn sealed_body_bit_flip_detected(bit in 0usize..(8 * 64)) {
        let sender = keys(1);
        let recipient = keys(2);
        let ctx = MessageContext::new(&sender, "@@a.x", "@@b.x", 0)
            .unwrap()
            .with_recipient_key(recipient.encryption_public());
        let envelope = MessageBuilder::default().custom(&ctx, "note", &"payload").unwrap();

        let sealed = envelope.body.as_sealed().unwrap();
        let mut bytes = sealed.encrypted_data().unwrap().to_bytes();
        let bit = bit % (bytes.len() * 8);
        bytes[bit / 8] ^= 1 << (bit % 8);

        let tampered = crate::Envelope {
            body: MessageBody::Encrypted(SealedBody::from_text(format!(
                "encrypted:{}",
                hex::encode(bytes)
            ))),
            ..envelope
        };
        let result = open_envelope(
            &tampered,
            recipient.encryption_secret(),
            &sender.encryption_public(),
        );
        prop_assert_eq!(result, Err(ProtocolError::DecryptionFailed));
    }
}

// ==================== Schema Property Tests ====================

proptest! {
    /// Job messages survive encode and decode.
    #[test]
    fn job_message_roundtrip(
        job_id in "[a-z0-9_-]{1,20}",
        content in ".{0,100}",
        parent in proptest::option::of("[a-f0-9]{8}"),
        row in any::<u64>(),
        col in any::<u64>(),
    ) {
        let mut message = JobMessage::new(job_id, content);
        message.parent = parent;
        message.sheet_job_data = Some(
            serde_json::to_string(&SheetJobAction { sheet_id: "s".into(), row, col }).unwrap(),
        );

        let encoded = MessageContent::encode(&message).unwrap();
        let decoded: JobMessage = encoded.decode().unwrap();
        prop_assert_eq!(decoded, message);
    }

    /// Custom schema tags parse back to the same name.
    #[test]
    fn custom_schema_tag_roundtrip(name in "[A-Za-z0-9_.:-]{1,30}") {
        let schema = SchemaType::custom(name.clone()).unwrap();
        prop_assert_eq!(SchemaType::parse(&schema.wire_tag()).unwrap(), schema);
    }

    /// Tags outside the registry are never accepted.
    #[test]
    fn unknown_schema_rejected(tag in "[A-Z][a-z]{3,12}Zz") {
        prop_assert!(
            matches!(SchemaType::parse(&tag), Err(ProtocolError::UnknownSchema(_))),
            "unexpected parse of {}", tag
        );
    }
}

// ==================== Schema Payload Property Tests ====================

proptest! {
    /// Registration code requests keep their permissions and code type,
    /// including any device name.
    #[test]
    fn registration_code_request_roundtrip(
        permissions in permissions(),
        code_type in code_type(),
    ) {
        let request = RegistrationCodeRequest { permissions, code_type };
        prop_assert_eq!(reencode(&request), request);
    }

    /// Registration code redemptions keep every field.
    #[test]
    fn registration_code_roundtrip(
        code in "[A-Za-z0-9]{0,16}",
        registration_name in ".{1,20}",
        keys in prop::collection::vec("[a-f0-9]{64}", 4),
        device in any::<bool>(),
        permission_type in permissions(),
    ) {
        let code = RegistrationCode {
            code,
            registration_name,
            device_identity_pk: keys[0].clone(),
            device_encryption_pk: keys[1].clone(),
            profile_identity_pk: keys[2].clone(),
            profile_encryption_pk: keys[3].clone(),
            identity_type: if device { IdentityType::Device } else { IdentityType::Profile },
            permission_type,
        };
        prop_assert_eq!(reencode(&code), code);
    }

    /// Job creation keeps its scope and hidden flag.
    #[test]
    fn job_creation_roundtrip(
        local_items in prop::collection::vec(path(), 0..4),
        local_folders in prop::collection::vec(path(), 0..4),
        network_folders in prop::collection::vec(path(), 0..4),
        is_hidden in proptest::option::of(any::<bool>()),
    ) {
        let info = JobCreationInfo {
            scope: JobScope { local_items, local_folders, network_folders },
            is_hidden,
        };
        prop_assert_eq!(reencode(&info), info);
    }

    /// Inbox history and read-marker requests keep their inbox.
    #[test]
    fn inbox_requests_roundtrip(
        inbox in inbox_name(),
        count in 0usize..1000,
        offset in proptest::option::of("[a-f0-9]{8}"),
        up_to_time in any::<u64>(),
    ) {
        let query = GetMessagesFromInboxRequest { inbox: inbox.clone(), count, offset };
        prop_assert_eq!(reencode(&query), query);

        let read = ReadUpToTimeRequest { inbox_name: inbox, up_to_time };
        prop_assert_eq!(reencode(&read), read);
    }

    /// Provider registrations keep every field, credentials included.
    #[test]
    fn add_provider_roundtrip(
        id in "[a-z0-9_-]{1,16}",
        full_identity_name in identity_name(),
        model in "[a-z]{2,8}:[a-z0-9.-]{1,12}",
        external_url in proptest::option::of("https://[a-z]{1,10}\\.[a-z]{2,4}"),
        api_key in proptest::option::of("[A-Za-z0-9-]{8,40}"),
    ) {
        let request = AddProviderRequest {
            agent: ProviderSpec { id, full_identity_name, model, external_url, api_key },
        };
        prop_assert_eq!(reencode(&request), request);
    }

    /// Folder and item operations keep their paths.
    #[test]
    fn file_system_paths_roundtrip(
        origin_path in path(),
        destination_path in path(),
        folder_name in "[A-Za-z0-9 _.-]{1,16}",
    ) {
        let create = VecFsCreateFolder { path: origin_path.clone(), folder_name };
        prop_assert_eq!(reencode(&create), create);

        let retrieve = VecFsRetrievePath { path: origin_path.clone() };
        prop_assert_eq!(reencode(&retrieve), retrieve);

        let move_folder = VecFsMoveFolder {
            origin_path: origin_path.clone(),
            destination_path: destination_path.clone(),
        };
        prop_assert_eq!(reencode(&move_folder), move_folder);

        let copy_folder = VecFsCopyFolder {
            origin_path: origin_path.clone(),
            destination_path: destination_path.clone(),
        };
        prop_assert_eq!(reencode(&copy_folder), copy_folder);

        let move_item = VecFsMoveItem {
            origin_path: origin_path.clone(),
            destination_path: destination_path.clone(),
        };
        prop_assert_eq!(reencode(&move_item), move_item);

        let copy_item = VecFsCopyItem { origin_path, destination_path };
        prop_assert_eq!(reencode(&copy_item), copy_item);
    }

    /// Vector search and file conversion keep their optional fields.
    #[test]
    fn file_system_search_roundtrip(
        search in ".{0,40}",
        path in proptest::option::of(path()),
        max_results in proptest::option::of(any::<u64>()),
        max_files_to_scan in proptest::option::of(any::<u64>()),
        file_inbox in "[a-z0-9_]{1,20}",
        file_datetime in proptest::option::of(any::<u64>()),
    ) {
        let query = VecFsVectorSearch {
            search,
            path: path.clone(),
            max_results,
            max_files_to_scan,
        };
        prop_assert_eq!(reencode(&query), query);

        let convert = ConvertFilesAndSaveToFolder {
            path: path.unwrap_or_else(|| "/".into()),
            file_inbox,
            file_datetime,
        };
        prop_assert_eq!(reencode(&convert), convert);
    }

    /// Error reports and key exchanges keep their text.
    #[test]
    fn error_and_key_exchange_roundtrip(error in ".{0,80}", key in "[a-f0-9]{64}") {
        let report = ErrorReport { error };
        prop_assert_eq!(reencode(&report), report);

        let exchange = SymmetricKeyExchange { shared_secret_key: key };
        prop_assert!(reencode(&exchange) == exchange);
    }
}
