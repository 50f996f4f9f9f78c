//! EIP-191 `personal_sign` hashing, signing and signer recovery.

use aa_codec::format::{eth_signature_bytes, ETH_SIGNATURE_LEN};
use k256::ecdsa::signature::hazmat::PrehashSigner;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};
use sha3::{Digest, Keccak256};
use zeroize::Zeroize;

use crate::address::{address_from_verifying_key, addresses_equal, normalize_eth_address};
use crate::error::EthError;

/// keccak256("\x19Ethereum Signed Message:\n" + len(message) + message)
pub fn eip191_hash(message: &[u8]) -> [u8; 32] {
    let prefix = format!("\x19Ethereum Signed Message:\n{}", message.len());
    let mut hasher = Keccak256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(message);
    hasher.finalize().into()
}

/// Signs `message` with EIP-191 personal_sign.
///
/// Returns the 65-byte signature r || s || v with v = 27 or 28.
pub fn sign_personal_message(
    message: &[u8],
    private_key: &[u8; 32],
) -> Result<[u8; ETH_SIGNATURE_LEN], EthError> {
    let mut key_bytes = *private_key;
    let signing_key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| EthError::InvalidPrivateKey(e.to_string()));
    key_bytes.zeroize();

    sign_personal_message_with(message, &signing_key?)
}

/// Same as [`sign_personal_message`] for an already-parsed key.
pub fn sign_personal_message_with(
    message: &[u8],
    signing_key: &SigningKey,
) -> Result<[u8; ETH_SIGNATURE_LEN], EthError> {
    let hash = eip191_hash(message);

    let (signature, recovery_id): (Signature, RecoveryId) = signing_key
        .sign_prehash(&hash)
        .map_err(|e| EthError::SigningError(e.to_string()))?;

    let mut out = [0u8; ETH_SIGNATURE_LEN];
    out[..64].copy_from_slice(&signature.to_bytes());
    out[64] = u8::from(recovery_id.is_y_odd()) + 27;
    Ok(out)
}

/// Splits a 65-byte signature into its ECDSA part and recovery id.
///
/// v may be 0/1 or the legacy 27/28. Any other value, or a zero r/s, makes
/// the signature malformed.
fn parse_recoverable(sig: &[u8; ETH_SIGNATURE_LEN]) -> Result<(Signature, RecoveryId), EthError> {
    let v = sig[64];
    let recovery_byte = match v {
        0 | 1 => v,
        27 | 28 => v - 27,
        other => {
            return Err(EthError::InvalidSignature(format!(
                "unsupported recovery byte {other}"
            )))
        }
    };

    let signature = Signature::from_slice(&sig[..64])
        .map_err(|e| EthError::InvalidSignature(format!("bad r/s values: {e}")))?;
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or_else(|| EthError::InvalidSignature(format!("bad recovery id {recovery_byte}")))?;

    Ok((signature, recovery_id))
}

/// Recovers the signer address of an EIP-191 signature.
///
/// Returns `Ok(None)` when the signature is well-formed but no public key
/// recovers from it.
pub fn recover_personal_signer(
    message: &[u8],
    sig: &[u8; ETH_SIGNATURE_LEN],
) -> Result<Option<String>, EthError> {
    let (signature, recovery_id) = parse_recoverable(sig)?;
    let hash = eip191_hash(message);

    // Some wallets still emit high-s signatures; flipping s flips the parity.
    let (signature, recovery_id) = match signature.normalize_s() {
        Some(low) => (
            low,
            RecoveryId::new(!recovery_id.is_y_odd(), recovery_id.is_x_reduced()),
        ),
        None => (signature, recovery_id),
    };

    match VerifyingKey::recover_from_prehash(&hash, &signature, recovery_id) {
        Ok(key) => Ok(Some(address_from_verifying_key(&key))),
        Err(_) => Ok(None),
    }
}

/// Verifies that `signature` is an EIP-191 signature of the literal `message`
/// by `expected_address`.
///
/// The signature may be hex (with or without `0x`) or base64. Addresses are
/// compared case-insensitively. A malformed signature or address is an error;
/// a well-formed signature from someone else is `Ok(false)`.
pub fn verify_eth_wallet_signature(
    message: &[u8],
    signature: &str,
    expected_address: &str,
) -> Result<bool, EthError> {
    normalize_eth_address(expected_address)?;
    let sig = eth_signature_bytes(signature)?;

    match recover_personal_signer(message, &sig)? {
        Some(recovered) => addresses_equal(&recovered, expected_address),
        None => Ok(false),
    }
}
