use aa_codec::hex_codec::{decode_hex_array, validate_hex_string, HexRules};
use k256::ecdsa::VerifyingKey;
use sha3::{Digest, Keccak256};

use crate::error::EthError;

/// Length of a raw Ethereum address.
pub const ETH_ADDRESS_LEN: usize = 20;

/// Canonical form of an Ethereum address: `0x` + 40 lowercase hex chars.
///
/// Accepts any case and any number of leading `0x` prefixes. Anything that is
/// not exactly 20 bytes of hex is rejected.
pub fn normalize_eth_address(value: &str) -> Result<String, EthError> {
    let digits = validate_hex_string(value, "address", HexRules::exact(ETH_ADDRESS_LEN))?;
    Ok(format!("0x{}", digits.to_ascii_lowercase()))
}

/// Raw 20 bytes of an Ethereum address.
pub fn eth_address_bytes(value: &str) -> Result<[u8; ETH_ADDRESS_LEN], EthError> {
    Ok(decode_hex_array::<ETH_ADDRESS_LEN>(value, "address")?)
}

/// Lowercase `0x` address of a secp256k1 verifying key.
///
/// Keccak-256 over the 64-byte uncompressed point (without the 0x04 tag),
/// last 20 bytes.
pub fn address_from_verifying_key(key: &VerifyingKey) -> String {
    let point = key.to_encoded_point(false);
    let hash = Keccak256::digest(&point.as_bytes()[1..]);
    format!("0x{}", hex::encode(&hash[12..]))
}

/// Applies EIP-55 mixed-case checksum encoding.
pub fn checksum_address(value: &str) -> Result<String, EthError> {
    let lower = normalize_eth_address(value)?;
    let digits = &lower[2..];

    let hash = Keccak256::digest(digits.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in digits.chars().enumerate() {
        // Nibble i of the hash decides the case of character i.
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }

    Ok(out)
}

/// Case-insensitive comparison of two addresses after normalization.
pub fn addresses_equal(a: &str, b: &str) -> Result<bool, EthError> {
    Ok(normalize_eth_address(a)? == normalize_eth_address(b)?)
}
