//! Cosmos chain support for abstract accounts.
//!
//! Provides secp256k1 account addresses, ADR-036 envelopes, the two-stage
//! signature check, and hand-encoded protobuf for the transaction pieces an
//! abstract-account signer needs (sign docs, routing auth info, tx raw).

pub mod address;
pub mod adr36;
pub mod error;
pub mod msgs;
pub mod proto;
pub mod tx;
pub mod verify;

pub use error::CosmosError;
pub use verify::verify_secp256k1_signature;
