//! # aa-core
//!
//! Authentication and signing for abstract accounts: smart-contract wallets
//! with no keypair of their own that delegate authorization to registered
//! authenticators.
//!
//! - [`salt`] and [`address`]: deterministic account salts and address
//!   prediction
//! - [`signer`]: the bind-then-sign signer and one strategy per
//!   authenticator kind
//! - [`client`]: the transaction pipeline that emits the routing `AuthInfo`
//!   and the id-prefixed signature
//! - [`query`], [`api`], [`msgs`], [`config`]: collaborators, service shapes,
//!   contract messages and network settings

pub mod address;
pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod msgs;
pub mod query;
pub mod salt;
pub mod signer;
pub mod types;

pub use address::{AddressPredictor, Instantiate2Hasher, SmartAccountAddressConfig};
pub use client::{AAClient, SignerData, StandardSigner};
pub use error::{AaError, ErrorCategory};
pub use query::{resolve_authenticator_id, AuthenticatorIndexer, BaseAccount, ChainQuerier};
pub use salt::{
    calculate_eth_wallet_salt, calculate_jwt_salt, calculate_salt, calculate_salt_for,
    calculate_secp256k1_salt,
};
pub use signer::{AbstractSigner, Bound, DirectSignResponse, SigningStrategy, Unbound};
pub use types::{AAccountData, AuthenticatorKind, Credential, Salt};

pub use chain_cosmos::verify_secp256k1_signature;
pub use chain_eth::verify_eth_wallet_signature;
