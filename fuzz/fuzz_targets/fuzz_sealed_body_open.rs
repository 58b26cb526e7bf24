//! Fuzz target for opening sealed bodies.
//!
//! Ciphertext from the wire is attacker-controlled; opening it must return
//! an error rather than panic.

#![no_main]

use envoy_identity::IdentityKeyPair;
use envoy_protocol::encryption::open_body;
use envoy_protocol::SealedBody;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let recipient = IdentityKeyPair::from_seed(&[1; 32]);
    let sender = IdentityKeyPair::from_seed(&[2; 32]);

    let text = match std::str::from_utf8(data) {
        Ok(s) => format!("encrypted:{s}"),
        Err(_) => format!("encrypted:{}", hex::encode(data)),
    };
    let sealed = SealedBody::from_text(text);
    let _ = open_body(
        recipient.encryption_secret(),
        &sender.encryption_public(),
        &sealed,
    );
});
