//! Deterministic account salts, one formula per authenticator kind.
//!
//! These must agree bit-for-bit with the account-creation service and the
//! account contract, otherwise account discovery silently breaks.
//!
//! ```text
//! EthWallet                          SHA256(raw 20 address bytes)
//! Secp256K1                          SHA256(UTF8(canonical base64 pubkey))
//! Ed25519, Sr25519, Passkey, ZKEmail SHA256(UTF8(credential))   (provisional)
//! JWT                                SHA256(UTF8(aud + "." + sub))
//! ```

use sha2::{Digest, Sha256};

use crate::error::AaError;
use crate::types::{AuthenticatorKind, Credential, Salt};
use chain_eth::address::eth_address_bytes;

/// Salt for `credential` under `kind`.
///
/// `credential` is hashed as given; pass the canonical form (see
/// [`Credential::canonical`]) or use [`calculate_salt_for`].
pub fn calculate_salt(kind: AuthenticatorKind, credential: &str) -> Result<Salt, AaError> {
    match kind {
        AuthenticatorKind::EthWallet => calculate_eth_wallet_salt(credential),
        AuthenticatorKind::Secp256K1 => calculate_secp256k1_salt(credential),
        // Provisional: these kinds share the string formula until the
        // service and the contract move together.
        AuthenticatorKind::Ed25519
        | AuthenticatorKind::Sr25519
        | AuthenticatorKind::Passkey
        | AuthenticatorKind::ZkEmail => calculate_secp256k1_salt(credential),
        AuthenticatorKind::Jwt => hash_string(credential, "jwt"),
    }
}

/// Canonicalizes `credential` and derives its salt.
pub fn calculate_salt_for(credential: &Credential) -> Result<Salt, AaError> {
    calculate_salt(credential.kind, &credential.canonical()?)
}

/// `SHA256` of the raw 20 address bytes. Case and repeated `0x` prefixes do
/// not matter.
pub fn calculate_eth_wallet_salt(address: &str) -> Result<Salt, AaError> {
    let bytes = eth_address_bytes(address)?;
    Ok(Salt::from_bytes(Sha256::digest(bytes).into()))
}

/// `SHA256` of the pubkey string itself, not the decoded key bytes.
pub fn calculate_secp256k1_salt(pubkey: &str) -> Result<Salt, AaError> {
    hash_string(pubkey, "pubkey")
}

/// `SHA256("aud.sub")` for already-extracted JWT claims.
pub fn calculate_jwt_salt(aud: &str, sub: &str) -> Result<Salt, AaError> {
    if aud.is_empty() || sub.is_empty() {
        return Err(AaError::InvalidInput(
            "jwt: aud and sub must not be empty".into(),
        ));
    }
    hash_string(&format!("{aud}.{sub}"), "jwt")
}

fn hash_string(value: &str, field: &str) -> Result<Salt, AaError> {
    if value.is_empty() {
        return Err(AaError::InvalidInput(format!("{field}: value must not be empty")));
    }
    Ok(Salt::from_bytes(Sha256::digest(value.as_bytes()).into()))
}
