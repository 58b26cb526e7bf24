//! Structured domain separation for signing input.
//!
//! Format: `"ENVOY-v1." || purpose || "." || context_length || context`
//!
//! A signature produced for one purpose can never verify for another.

/// Build a domain-separated label.
///
/// Format: `"ENVOY-v1." || purpose || "." || len(context) as 4-byte BE || context`
///
/// # Example
///
/// ```
/// use envoy_protocol::domain_separation::build_domain_label;
///
/// let label = build_domain_label("ENVELOPE-SIG", b"digest");
/// assert!(label.starts_with(b"ENVOY-v1.ENVELOPE-SIG."));
/// ```
pub fn build_domain_label(purpose: &str, context: &[u8]) -> Vec<u8> {
    let mut label = Vec::with_capacity(PREFIX.len() + purpose.len() + 1 + 4 + context.len());
    label.extend_from_slice(PREFIX);
    label.extend_from_slice(purpose.as_bytes());
    label.extend_from_slice(b".");
    label.extend_from_slice(&(context.len() as u32).to_be_bytes());
    label.extend_from_slice(context);
    label
}

const PREFIX: &[u8] = b"ENVOY-v1.";

/// Well-known domain separation purposes.
pub mod purposes {
    /// Envelope signature.
    pub const ENVELOPE_SIG: &str = "ENVELOPE-SIG";
}
