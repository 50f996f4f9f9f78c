//! Ethereum primitives used by the abstract-account layer.
//!
//! - Address normalization and EIP-55 checksums
//! - EIP-191 personal_sign hashing, local signing and signer recovery
//! - `verify_eth_wallet_signature`, the predicate used for EthWallet
//!   authenticators

pub mod address;
pub mod error;
pub mod personal_sign;

pub use error::EthError;
pub use personal_sign::verify_eth_wallet_signature;
