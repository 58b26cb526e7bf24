//! Fuzz target for envelope decoding.
//!
//! Arbitrary bytes must decode or fail with an error, never panic. Decoded
//! envelopes must survive a re-encode.

#![no_main]

use envoy_protocol::codec;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = codec::deserialize(data) {
        let bytes = codec::serialize(&envelope).unwrap();
        let again = codec::deserialize(&bytes).unwrap();
        assert_eq!(again, envelope);
    }
});
