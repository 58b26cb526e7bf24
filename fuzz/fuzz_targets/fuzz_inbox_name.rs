//! Fuzz target for inbox name parsing.
//!
//! Accepted names must re-render to the exact input.

#![no_main]

use envoy_identity::{compute_inbox_name, compute_job_inbox_name, InboxName};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(inbox) = InboxName::parse(s) else {
        return;
    };
    assert_eq!(inbox.as_str(), s);

    let rebuilt = match inbox.job_id() {
        Some(job_id) => compute_job_inbox_name(job_id, inbox.is_e2e()).unwrap(),
        None => {
            let (receiver, sender) = inbox.identities().unwrap();
            compute_inbox_name(receiver, sender, inbox.is_e2e())
        }
    };
    assert_eq!(rebuilt, inbox);
});
