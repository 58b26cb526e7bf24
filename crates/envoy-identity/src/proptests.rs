//! Property-based tests for identity addressing.

use proptest::prelude::*;

use crate::{compute_inbox_name, compute_job_inbox_name, IdentityName, InboxName};

/// Strategy for a valid identity name: node plus up to four sub segments.
fn identity_name() -> impl Strategy<Value = String> {
    (
        "[a-z0-9_]{1,12}\\.[a-z]{2,8}",
        prop::collection::vec("[A-Za-z0-9_.-]{1,10}", 0..4),
    )
        .prop_map(|(node, segments)| {
            let mut name = format!("@@{}", node);
            for segment in segments {
                name.push('/');
                name.push_str(&segment);
            }
            name
        })
}

proptest! {
    /// Every generated name parses and keeps its exact text.
    #[test]
    fn identity_parse_roundtrip(raw in identity_name()) {
        let name = IdentityName::parse(&raw).unwrap();
        prop_assert_eq!(name.as_str(), raw.as_str());
        prop_assert!(name.node().starts_with("@@"));
    }

    /// A trailing slash is always rejected.
    #[test]
    fn trailing_slash_rejected(raw in identity_name()) {
        let with_slash = format!("{}/", raw);
        prop_assert!(IdentityName::parse(&with_slash).is_err());
    }

    /// Direct inbox names are deterministic, receiver-first and reparseable.
    #[test]
    fn direct_inbox_receiver_first(r in identity_name(), s in identity_name(), e2e: bool) {
        let receiver = IdentityName::parse(&r).unwrap();
        let sender = IdentityName::parse(&s).unwrap();

        let inbox = compute_inbox_name(&receiver, &sender, e2e);
        prop_assert_eq!(inbox.as_str(), format!("inbox::{}::{}::{}", r, s, e2e));
        prop_assert_eq!(&inbox, &compute_inbox_name(&receiver, &sender, e2e));
        prop_assert_eq!(InboxName::parse(inbox.as_str()).unwrap(), inbox);
    }

    /// Job inbox names follow `job_inbox::<id>::<flag>`.
    #[test]
    fn job_inbox_format(job_id in "[A-Za-z0-9_-]{1,40}", e2e: bool) {
        let inbox = compute_job_inbox_name(&job_id, e2e).unwrap();
        prop_assert_eq!(inbox.as_str(), format!("job_inbox::{}::{}", job_id, e2e));
        prop_assert_eq!(inbox.job_id(), Some(job_id.as_str()));
    }
}
