//! Lossless conversion of signatures and public keys between hex, base64 and
//! raw bytes.
//!
//! Input detection rules, shared by every formatter:
//!
//! ```text
//! 1. strip all leading 0x/0X prefixes
//! 2. all hex digits, and length == 2 * an accepted byte length  -> hex
//! 3. all hex digits, prefixed or not a plausible base64 length   -> hex (length error)
//! 4. otherwise                                                   -> base64
//! ```
//!
//! Every formatter is idempotent: feeding its output back in returns the same
//! value. Wrong lengths and undecodable input are rejected; nothing is ever
//! truncated or silently cleaned up, surrounding whitespace included.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::error::CodecError;
use crate::hex_codec::{is_hex, normalize_hex_prefix};

/// Ethereum signature: r (32) || s (32) || v (1).
pub const ETH_SIGNATURE_LEN: usize = 65;
/// Cosmos secp256k1 signature: r (32) || s (32), no recovery byte.
pub const SECP256K1_SIGNATURE_LEN: usize = 64;
/// SEC1 compressed secp256k1 public key.
pub const SECP256K1_COMPRESSED_PUBKEY_LEN: usize = 33;
/// SEC1 uncompressed secp256k1 public key.
pub const SECP256K1_UNCOMPRESSED_PUBKEY_LEN: usize = 65;

const PUBKEY_LENS: &[usize] = &[
    SECP256K1_COMPRESSED_PUBKEY_LEN,
    SECP256K1_UNCOMPRESSED_PUBKEY_LEN,
];

/// Textual encoding of a binary value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    Hex,
    Base64,
}

/// Decides how `value` should be read given the byte lengths it may decode to.
pub fn detect_encoding(value: &str, lengths: &[usize]) -> Encoding {
    let digits = normalize_hex_prefix(value);
    let had_prefix = digits.len() != value.len();

    if !digits.is_empty() && is_hex(digits) {
        let hex_len_matches = lengths.iter().any(|l| digits.len() == l * 2);
        let base64_plausible =
            !had_prefix && lengths.iter().any(|l| digits.len() == base64_len(*l));
        if hex_len_matches || !base64_plausible {
            return Encoding::Hex;
        }
    }

    Encoding::Base64
}

/// Decodes `value` (hex or base64) and checks it is one of `lengths` bytes.
pub fn decode_exact(value: &str, field: &str, lengths: &[usize]) -> Result<Vec<u8>, CodecError> {
    if normalize_hex_prefix(value).is_empty() {
        return Err(CodecError::Empty {
            field: field.to_string(),
        });
    }

    let bytes = match detect_encoding(value, lengths) {
        Encoding::Hex => {
            let digits = normalize_hex_prefix(value);
            if !lengths.iter().any(|l| digits.len() == l * 2) {
                return Err(CodecError::InvalidLength {
                    field: field.to_string(),
                    expected: describe_lengths(lengths, 2, "hex chars"),
                    actual: digits.len(),
                });
            }
            hex::decode(digits).map_err(|e| CodecError::InvalidHex {
                field: field.to_string(),
                detail: e.to_string(),
            })?
        }
        Encoding::Base64 => STANDARD.decode(value).map_err(|e| CodecError::InvalidBase64 {
            field: field.to_string(),
            detail: e.to_string(),
        })?,
    };

    check_length(&bytes, field, lengths)?;
    Ok(bytes)
}

fn check_length(bytes: &[u8], field: &str, lengths: &[usize]) -> Result<(), CodecError> {
    if lengths.contains(&bytes.len()) {
        Ok(())
    } else {
        Err(CodecError::InvalidLength {
            field: field.to_string(),
            expected: describe_lengths(lengths, 1, "bytes"),
            actual: bytes.len(),
        })
    }
}

fn describe_lengths(lengths: &[usize], scale: usize, unit: &str) -> String {
    let parts: Vec<String> = lengths.iter().map(|l| (l * scale).to_string()).collect();
    format!("{} {unit}", parts.join(" or "))
}

/// Padded base64 length for `n` bytes.
fn base64_len(n: usize) -> usize {
    n.div_ceil(3) * 4
}

fn to_prefixed_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// ---------------------------------------------------------------------------
// Ethereum signatures (65 bytes)
// ---------------------------------------------------------------------------

/// Decodes an Ethereum signature given as hex or base64.
pub fn eth_signature_bytes(value: &str) -> Result<[u8; ETH_SIGNATURE_LEN], CodecError> {
    let bytes = decode_exact(value, "signature", &[ETH_SIGNATURE_LEN])?;
    let mut out = [0u8; ETH_SIGNATURE_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Canonical base64 form of an Ethereum signature.
pub fn format_eth_signature_to_base64(value: &str) -> Result<String, CodecError> {
    Ok(STANDARD.encode(eth_signature_bytes(value)?))
}

/// Canonical `0x`-prefixed lowercase hex form of an Ethereum signature.
pub fn format_eth_signature_to_hex(value: &str) -> Result<String, CodecError> {
    Ok(to_prefixed_hex(&eth_signature_bytes(value)?))
}

/// Base64 form of raw Ethereum signature bytes.
pub fn eth_signature_from_bytes(bytes: &[u8]) -> Result<String, CodecError> {
    check_length(bytes, "signature", &[ETH_SIGNATURE_LEN])?;
    Ok(STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Secp256k1 signatures (64 bytes)
// ---------------------------------------------------------------------------

/// Decodes a 64-byte secp256k1 signature given as hex or base64.
pub fn secp256k1_signature_bytes(
    value: &str,
) -> Result<[u8; SECP256K1_SIGNATURE_LEN], CodecError> {
    let bytes = decode_exact(value, "signature", &[SECP256K1_SIGNATURE_LEN])?;
    let mut out = [0u8; SECP256K1_SIGNATURE_LEN];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Canonical base64 form of a secp256k1 signature.
pub fn format_secp256k1_signature_to_base64(value: &str) -> Result<String, CodecError> {
    Ok(STANDARD.encode(secp256k1_signature_bytes(value)?))
}

/// Canonical `0x`-prefixed lowercase hex form of a secp256k1 signature.
pub fn format_secp256k1_signature_to_hex(value: &str) -> Result<String, CodecError> {
    Ok(to_prefixed_hex(&secp256k1_signature_bytes(value)?))
}

/// Base64 form of raw secp256k1 signature bytes.
pub fn secp256k1_signature_from_bytes(bytes: &[u8]) -> Result<String, CodecError> {
    check_length(bytes, "signature", &[SECP256K1_SIGNATURE_LEN])?;
    Ok(STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Secp256k1 public keys (33 or 65 bytes)
// ---------------------------------------------------------------------------

/// Decodes a secp256k1 public key given as hex (66/130 chars) or base64.
///
/// Only the encoding and length are checked here; curve membership is the
/// verifier's concern.
pub fn secp256k1_pubkey_bytes(value: &str) -> Result<Vec<u8>, CodecError> {
    decode_exact(value, "pubkey", PUBKEY_LENS)
}

/// Canonical base64 form of a secp256k1 public key.
///
/// This is the string form that salts are computed over, so the same key
/// entered as hex or base64 always yields the same salt.
pub fn format_secp256k1_pubkey(value: &str) -> Result<String, CodecError> {
    Ok(STANDARD.encode(secp256k1_pubkey_bytes(value)?))
}

/// Canonical `0x`-prefixed lowercase hex form of a secp256k1 public key.
pub fn format_secp256k1_pubkey_to_hex(value: &str) -> Result<String, CodecError> {
    Ok(to_prefixed_hex(&secp256k1_pubkey_bytes(value)?))
}

/// Base64 form of raw public key bytes.
pub fn secp256k1_pubkey_from_bytes(bytes: &[u8]) -> Result<String, CodecError> {
    check_length(bytes, "pubkey", PUBKEY_LENS)?;
    Ok(STANDARD.encode(bytes))
}

// ---------------------------------------------------------------------------
// Plain base64 helpers
// ---------------------------------------------------------------------------

/// Standard padded base64.
pub fn to_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decodes standard padded base64, naming `field` on failure.
pub fn from_base64(value: &str, field: &str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(value)
        .map_err(|e| CodecError::InvalidBase64 {
            field: field.to_string(),
            detail: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Generator point G, i.e. the public key of private key 1.
    const G_COMPRESSED_HEX: &str =
        "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
    const G_UNCOMPRESSED_HEX: &str = "0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";
    const G_COMPRESSED_B64: &str = "Anm+Zn753LusVaBilc6HCwcCm/zbLc4o2VnygVsW+BeY";

    fn eth_sig_hex() -> String {
        let mut sig = "ab".repeat(64);
        sig.push_str("1b");
        sig
    }

    #[test]
    fn pubkey_hex_and_base64_normalize_identically() {
        let from_hex = format_secp256k1_pubkey(G_COMPRESSED_HEX).unwrap();
        let from_b64 = format_secp256k1_pubkey(G_COMPRESSED_B64).unwrap();
        assert_eq!(from_hex, G_COMPRESSED_B64);
        assert_eq!(from_hex, from_b64);
    }

    #[test]
    fn pubkey_uppercase_and_prefixed_hex_accepted() {
        let upper = format!("0X{}", G_COMPRESSED_HEX.to_uppercase());
        assert_eq!(format_secp256k1_pubkey(&upper).unwrap(), G_COMPRESSED_B64);
    }

    #[test]
    fn pubkey_uncompressed_accepted() {
        let b64 = format_secp256k1_pubkey(G_UNCOMPRESSED_HEX).unwrap();
        assert_eq!(secp256k1_pubkey_bytes(&b64).unwrap().len(), 65);
        assert_eq!(
            format_secp256k1_pubkey_to_hex(&b64).unwrap(),
            format!("0x{G_UNCOMPRESSED_HEX}")
        );
    }

    #[test]
    fn pubkey_wrong_length_rejected() {
        let err = format_secp256k1_pubkey(&"02".repeat(32)).unwrap_err();
        assert!(err.to_string().contains("pubkey"));
        assert!(matches!(err, CodecError::InvalidLength { .. }));

        let short_b64 = to_base64(&[2u8; 32]);
        let err = format_secp256k1_pubkey(&short_b64).unwrap_err();
        assert_eq!(err.to_string(), "pubkey: expected 33 or 65 bytes, got 32");
    }

    #[test]
    fn pubkey_garbage_rejected() {
        let err = format_secp256k1_pubkey("not a key!!").unwrap_err();
        assert!(matches!(err, CodecError::InvalidBase64 { .. }));
    }

    #[test]
    fn eth_signature_hex_base64_roundtrip() {
        let b64 = format_eth_signature_to_base64(&eth_sig_hex()).unwrap();
        let hex = format_eth_signature_to_hex(&b64).unwrap();
        assert_eq!(hex, format!("0x{}", eth_sig_hex()));
    }

    #[test]
    fn eth_signature_wrong_length_rejected() {
        let err = format_eth_signature_to_base64(&"ab".repeat(64)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "signature: expected 130 hex chars, got 128"
        );

        let err = eth_signature_from_bytes(&[0u8; 64]).unwrap_err();
        assert_eq!(err.to_string(), "signature: expected 65 bytes, got 64");
    }

    #[test]
    fn eth_signature_invalid_characters_rejected() {
        let mut bad = eth_sig_hex();
        bad.replace_range(0..2, "zz");
        assert!(format_eth_signature_to_base64(&bad).is_err());
    }

    #[test]
    fn secp256k1_signature_lengths_enforced() {
        let ok = "cd".repeat(64);
        assert!(format_secp256k1_signature_to_base64(&ok).is_ok());

        let err = format_secp256k1_signature_to_base64(&"cd".repeat(65)).unwrap_err();
        assert!(err.to_string().contains("128 hex chars"));

        let err = secp256k1_signature_from_bytes(&[0u8; 65]).unwrap_err();
        assert_eq!(err.to_string(), "signature: expected 64 bytes, got 65");
    }

    #[test]
    fn formatters_are_idempotent() {
        let eth = eth_sig_hex();
        let secp = "cd".repeat(64);

        let f = format_eth_signature_to_base64(&eth).unwrap();
        assert_eq!(format_eth_signature_to_base64(&f).unwrap(), f);
        let f = format_eth_signature_to_hex(&eth).unwrap();
        assert_eq!(format_eth_signature_to_hex(&f).unwrap(), f);

        let f = format_secp256k1_signature_to_base64(&secp).unwrap();
        assert_eq!(format_secp256k1_signature_to_base64(&f).unwrap(), f);
        let f = format_secp256k1_signature_to_hex(&secp).unwrap();
        assert_eq!(format_secp256k1_signature_to_hex(&f).unwrap(), f);

        for key in [G_COMPRESSED_HEX, G_UNCOMPRESSED_HEX, G_COMPRESSED_B64] {
            let f = format_secp256k1_pubkey(key).unwrap();
            assert_eq!(format_secp256k1_pubkey(&f).unwrap(), f);
            let f = format_secp256k1_pubkey_to_hex(key).unwrap();
            assert_eq!(format_secp256k1_pubkey_to_hex(&f).unwrap(), f);
        }
    }

    #[test]
    fn repeated_prefixes_normalize_like_single_prefix() {
        let eth = eth_sig_hex();
        let secp = "cd".repeat(64);

        assert_eq!(
            format_eth_signature_to_base64(&format!("0x0x{eth}")).unwrap(),
            format_eth_signature_to_base64(&format!("0x{eth}")).unwrap()
        );
        assert_eq!(
            format_eth_signature_to_hex(&format!("0x0x{eth}")).unwrap(),
            format_eth_signature_to_hex(&format!("0x{eth}")).unwrap()
        );
        assert_eq!(
            format_secp256k1_signature_to_base64(&format!("0x0x{secp}")).unwrap(),
            format_secp256k1_signature_to_base64(&format!("0x{secp}")).unwrap()
        );
        assert_eq!(
            format_secp256k1_signature_to_hex(&format!("0x0x{secp}")).unwrap(),
            format_secp256k1_signature_to_hex(&format!("0x{secp}")).unwrap()
        );
        assert_eq!(
            format_secp256k1_pubkey(&format!("0x0x{G_COMPRESSED_HEX}")).unwrap(),
            format_secp256k1_pubkey(&format!("0x{G_COMPRESSED_HEX}")).unwrap()
        );
        assert_eq!(
            format_secp256k1_pubkey_to_hex(&format!("0x0x{G_COMPRESSED_HEX}")).unwrap(),
            format_secp256k1_pubkey_to_hex(&format!("0x{G_COMPRESSED_HEX}")).unwrap()
        );
    }

    #[test]
    fn hex_wins_at_exact_pubkey_lengths() {
        assert_eq!(detect_encoding(G_COMPRESSED_HEX, PUBKEY_LENS), Encoding::Hex);
        assert_eq!(detect_encoding(G_UNCOMPRESSED_HEX, PUBKEY_LENS), Encoding::Hex);
        assert_eq!(detect_encoding(G_COMPRESSED_B64, PUBKEY_LENS), Encoding::Base64);
    }

    #[test]
    fn all_hex_base64_pubkey_is_read_as_base64() {
        // 44 chars of base64 that happen to all be hex digits.
        let value = "A".repeat(44);
        assert_eq!(detect_encoding(&value, PUBKEY_LENS), Encoding::Base64);
        assert_eq!(secp256k1_pubkey_bytes(&value).unwrap(), vec![0u8; 33]);
    }

    #[test]
    fn surrounding_whitespace_rejected() {
        for value in [
            format!(" {G_COMPRESSED_HEX}"),
            format!("{G_COMPRESSED_HEX}\n"),
            format!("{G_COMPRESSED_B64} "),
        ] {
            assert!(format_secp256k1_pubkey(&value).is_err(), "{value:?}");
        }
        assert!(from_base64(" AQID", "signature").is_err());
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            format_secp256k1_pubkey("0x"),
            Err(CodecError::Empty { .. })
        ));
        assert!(matches!(
            format_eth_signature_to_hex(""),
            Err(CodecError::Empty { .. })
        ));
    }
}
