//! Secp256k1 signing and the two-stage verification predicate used by
//! Secp256K1 authenticators.
//!
//! ```text
//! stage 1: verify(sig, SHA256(message))
//! stage 2: verify(sig, SHA256(adr36_sign_doc(message, address(pubkey))))
//! ```

use aa_codec::bech32_codec::validate_prefix;
use aa_codec::format::{secp256k1_pubkey_bytes, secp256k1_signature_bytes, SECP256K1_SIGNATURE_LEN};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};
use sha2::{Digest, Sha256};

use crate::address::{address_from_verifying_key, parse_pubkey};
use crate::adr36;
use crate::error::CosmosError;

/// Verifies a 64-byte secp256k1 signature over `message` by `pubkey`.
///
/// `signature` and `pubkey` may be hex or base64. `prefix` is the bech32
/// prefix used to derive the signer address for the ADR-036 fallback.
///
/// Malformed input (wrong length, undecodable, invalid point or scalar) is an
/// error raised before either stage runs. A well-formed signature that
/// matches neither digest is `Ok(false)`.
///
/// High-s signatures are never normalized and so verify as `Ok(false)`, the
/// same as the chain's secp256k1 check. Ethereum recovery in `chain-eth`
/// normalizes them instead because wallets still emit them.
pub fn verify_secp256k1_signature(
    message: &[u8],
    signature: &str,
    pubkey: &str,
    prefix: &str,
) -> Result<bool, CosmosError> {
    validate_prefix(prefix, "prefix")?;
    let sig_bytes = secp256k1_signature_bytes(signature)?;
    let key_bytes = secp256k1_pubkey_bytes(pubkey)?;

    let signature = Signature::from_slice(&sig_bytes)
        .map_err(|e| CosmosError::InvalidSignature(format!("bad r/s values: {e}")))?;
    let key = parse_pubkey(&key_bytes)?;

    let direct = Sha256::digest(message);
    if key.verify_prehash(&direct, &signature).is_ok() {
        return Ok(true);
    }

    let signer = address_from_verifying_key(&key, prefix)?;
    let wrapped = adr36::sign_doc_hash(message, &signer);
    Ok(key.verify_prehash(&wrapped, &signature).is_ok())
}

/// Signs `SHA256(message)`; the first verification stage accepts this.
pub fn sign_direct(
    message: &[u8],
    key: &SigningKey,
) -> Result<[u8; SECP256K1_SIGNATURE_LEN], CosmosError> {
    sign_prehash(&Sha256::digest(message), key)
}

/// Signs the ADR-036 envelope of `data`, as wallets do for "sign arbitrary".
pub fn sign_adr36(
    data: &[u8],
    key: &SigningKey,
    prefix: &str,
) -> Result<[u8; SECP256K1_SIGNATURE_LEN], CosmosError> {
    let signer = address_from_verifying_key(key.verifying_key(), prefix)?;
    sign_prehash(&adr36::sign_doc_hash(data, &signer), key)
}

fn sign_prehash(
    digest: &[u8],
    key: &SigningKey,
) -> Result<[u8; SECP256K1_SIGNATURE_LEN], CosmosError> {
    let signature: Signature = key
        .sign_prehash(digest)
        .map_err(|e| CosmosError::SigningError(e.to_string()))?;
    let mut out = [0u8; SECP256K1_SIGNATURE_LEN];
    out.copy_from_slice(&signature.to_bytes());
    Ok(out)
}

/// Compressed SEC1 bytes of a key.
pub fn compressed_pubkey(key: &VerifyingKey) -> Vec<u8> {
    key.to_encoded_point(true).as_bytes().to_vec()
}
