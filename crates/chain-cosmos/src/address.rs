use aa_codec::bech32_codec::{encode_bech32, validate_bech32_address};
use k256::ecdsa::VerifyingKey;
use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

use crate::error::CosmosError;

/// Parses a SEC1 secp256k1 public key (33 or 65 bytes).
pub fn parse_pubkey(pubkey: &[u8]) -> Result<VerifyingKey, CosmosError> {
    VerifyingKey::from_sec1_bytes(pubkey)
        .map_err(|e| CosmosError::InvalidPublicKey(format!("not a secp256k1 point: {e}")))
}

/// Cosmos account address of a verifying key.
///
/// `RIPEMD160(SHA256(compressed_pubkey))`, bech32-encoded with `prefix`.
pub fn address_from_verifying_key(key: &VerifyingKey, prefix: &str) -> Result<String, CosmosError> {
    let compressed = key.to_encoded_point(true);
    let sha = Sha256::digest(compressed.as_bytes());
    let hash = Ripemd160::digest(sha);
    Ok(encode_bech32(prefix, &hash, "address")?)
}

/// Cosmos account address of a SEC1 public key.
///
/// Uncompressed keys are compressed first, so both encodings of the same key
/// map to the same address.
pub fn pubkey_to_address(pubkey: &[u8], prefix: &str) -> Result<String, CosmosError> {
    let key = parse_pubkey(pubkey)?;
    address_from_verifying_key(&key, prefix)
}

/// Raw bytes behind a bech32 address.
pub fn address_bytes(address: &str) -> Result<Vec<u8>, CosmosError> {
    Ok(validate_bech32_address(address, "address", None)?.data)
}
