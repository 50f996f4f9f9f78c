//! Key-backed wallets for development and tests.
//!
//! Private keys live in `k256::ecdsa::SigningKey`, which zeroizes on drop.
//! Input key bytes are wiped after parsing.

use aa_codec::format::to_base64;
use aa_codec::hex_codec::{decode_hex, HexRules};
use async_trait::async_trait;
use chain_cosmos::address::address_from_verifying_key as cosmos_address;
use chain_cosmos::verify::{compressed_pubkey, sign_adr36};
use chain_eth::address::{address_from_verifying_key, checksum_address};
use chain_eth::personal_sign::sign_personal_message_with;
use k256::ecdsa::SigningKey;
use zeroize::Zeroize;

use super::direct::ArbitrarySigner;
use super::eth::PersonalSigner;
use crate::error::AaError;

fn parse_private_key(private_key: &[u8; 32]) -> Result<SigningKey, AaError> {
    let mut key_bytes = *private_key;
    let key = SigningKey::from_bytes((&key_bytes).into())
        .map_err(|e| AaError::CryptographicFailure(format!("invalid private key: {e}")));
    key_bytes.zeroize();
    key
}

/// A secp256k1 Cosmos wallet that signs arbitrary data with ADR-036.
pub struct LocalSecp256k1Wallet {
    key: SigningKey,
    prefix: String,
    address: String,
}

impl LocalSecp256k1Wallet {
    pub fn from_private_key(private_key: &[u8; 32], prefix: &str) -> Result<Self, AaError> {
        let key = parse_private_key(private_key)?;
        let address = cosmos_address(key.verifying_key(), prefix)?;
        Ok(Self {
            key,
            prefix: prefix.to_string(),
            address,
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Canonical base64 compressed public key, the Secp256K1 credential.
    pub fn pubkey_base64(&self) -> String {
        to_base64(&compressed_pubkey(self.key.verifying_key()))
    }
}

#[async_trait]
impl ArbitrarySigner for LocalSecp256k1Wallet {
    async fn accounts(&self) -> Result<Vec<String>, AaError> {
        Ok(vec![self.address.clone()])
    }

    /// ADR-036 signs with an empty chain id, so `chain_id` is not used.
    async fn sign_arbitrary(
        &self,
        _chain_id: &str,
        signer: &str,
        data: &[u8],
    ) -> Result<Vec<u8>, AaError> {
        if signer != self.address {
            return Err(AaError::InvalidInput(format!(
                "signer {signer} is not held by this wallet"
            )));
        }
        Ok(sign_adr36(data, &self.key, &self.prefix)?.to_vec())
    }
}

/// An Ethereum wallet that personal-signs with EIP-191.
///
/// Reports its address in EIP-55 checksum form, as wallets do.
pub struct LocalEthWallet {
    key: SigningKey,
    address: String,
}

impl LocalEthWallet {
    pub fn from_private_key(private_key: &[u8; 32]) -> Result<Self, AaError> {
        let key = parse_private_key(private_key)?;
        let address = checksum_address(&address_from_verifying_key(key.verifying_key()))?;
        Ok(Self { key, address })
    }
}

#[async_trait]
impl PersonalSigner for LocalEthWallet {
    fn address(&self) -> String {
        self.address.clone()
    }

    /// `message_hex` is decoded and the bytes are signed, as wallets do for
    /// `0x` messages.
    async fn personal_sign(&self, message_hex: &str) -> Result<String, AaError> {
        let rules = HexRules {
            allow_empty: true,
            ..HexRules::default()
        };
        let message = decode_hex(message_hex, "message", rules)?;
        let signature = sign_personal_message_with(&message, &self.key)?;
        Ok(format!("0x{}", hex::encode(signature)))
    }
}
