//! # envoy-identity
//!
//! Identity addressing for the envoy message protocol.
//!
//! This crate provides:
//! - **IdentityName**: validated `@@node[/sub...]` addresses
//! - **InboxName**: canonical conversation and job channel names
//! - **IdentityKeyPair**: the static encryption and signature keys of an identity
//!
//! All values are immutable once validated; every operation here is a pure
//! function over its inputs.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod inbox;
pub mod keypair;
pub mod limits;
pub mod name;

#[cfg(test)]
mod proptests;

pub use error::{IdentityError, Result};
pub use inbox::{compute_inbox_name, compute_job_inbox_name, InboxName};
pub use keypair::{IdentityKeyPair, IdentityPublicKeys};
pub use name::{IdentityName, SubidentityKind};
