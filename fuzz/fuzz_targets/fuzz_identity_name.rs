//! Fuzz target for identity name parsing.

#![no_main]

use envoy_identity::IdentityName;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(name) = IdentityName::parse(s) {
            assert_eq!(name.as_str(), s);
            assert!(s.starts_with("@@"));

            // The node part is itself a valid name.
            let node = name.node_name();
            assert!(IdentityName::parse(node.as_str()).is_ok());
            assert!(s.starts_with(node.as_str()));
        }
    }
});
