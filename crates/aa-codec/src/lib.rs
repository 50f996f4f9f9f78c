//! # aa-codec
//!
//! Canonicalization and validation of the encodings that flow into the
//! abstract-account crypto layer: hex strings, bech32 addresses, and the
//! signature/public-key formats shared by every authenticator.

pub mod bech32_codec;
pub mod error;
pub mod format;
pub mod hex_codec;

pub use error::CodecError;
