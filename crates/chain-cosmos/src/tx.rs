//! Cosmos SDK transaction pieces, encoded by hand.
//!
//! ```text
//! TxBody    { messages: [Any] = 1, memo = 2, timeout_height = 3 }
//! AuthInfo  { signer_infos: [SignerInfo] = 1, fee: Fee = 2 }
//! SignerInfo{ public_key: Any = 1, mode_info: ModeInfo = 2, sequence = 3 }
//! ModeInfo  { single: { mode = 1 } = 1 }
//! Fee       { amount: [Coin] = 1, gas_limit = 2, payer = 3, granter = 4 }
//! SignDoc   { body_bytes = 1, auth_info_bytes = 2, chain_id = 3, account_number = 4 }
//! TxRaw     { body_bytes = 1, auth_info_bytes = 2, signatures: [bytes] = 3 }
//! ```
//!
//! Abstract accounts have no key of their own. Their single signer info
//! carries a `NilPubKey` whose payload is the account's raw address bytes;
//! the ante handler sees that type and hands verification to the account
//! contract. See [`routing_pubkey`].

use serde::{Deserialize, Serialize};

use crate::address::address_bytes;
use crate::error::CosmosError;
use crate::proto::{Any, ProtoWriter};

/// `SIGN_MODE_DIRECT` from `cosmos.tx.signing.v1beta1.SignMode`.
pub const SIGN_MODE_DIRECT: u64 = 1;

/// Type URL of the routing public key.
pub const NIL_PUBKEY_TYPE_URL: &str = "/abstractaccount.v1.NilPubKey";

/// `cosmos.base.v1beta1.Coin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    /// Integer amount as a decimal string.
    pub amount: String,
}

impl Coin {
    pub fn new(amount: u128, denom: impl Into<String>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.to_string(),
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        ProtoWriter::new()
            .string(1, &self.denom)
            .string(2, &self.amount)
            .finish()
    }
}

/// `cosmos.tx.v1beta1.Fee`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Fee {
    pub amount: Vec<Coin>,
    pub gas_limit: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub granter: Option<String>,
}

impl Fee {
    pub fn new(amount: Vec<Coin>, gas_limit: u64) -> Self {
        Self {
            amount,
            gas_limit,
            payer: None,
            granter: None,
        }
    }

    /// Fee paid by `granter` through a fee grant.
    pub fn with_granter(mut self, granter: impl Into<String>) -> Self {
        self.granter = Some(granter.into());
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let coins: Vec<Vec<u8>> = self.amount.iter().map(Coin::encode).collect();
        ProtoWriter::new()
            .repeated(1, &coins)
            .uint64(2, self.gas_limit)
            .string(3, self.payer.as_deref().unwrap_or_default())
            .string(4, self.granter.as_deref().unwrap_or_default())
            .finish()
    }
}

/// `cosmos.tx.v1beta1.TxBody`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TxBody {
    pub messages: Vec<Any>,
    pub memo: String,
    pub timeout_height: u64,
}

impl TxBody {
    pub fn new(messages: Vec<Any>, memo: impl Into<String>) -> Self {
        Self {
            messages,
            memo: memo.into(),
            timeout_height: 0,
        }
    }

    pub fn encode(&self) -> Vec<u8> {
        let messages: Vec<Vec<u8>> = self.messages.iter().map(Any::encode).collect();
        ProtoWriter::new()
            .repeated(1, &messages)
            .string(2, &self.memo)
            .uint64(3, self.timeout_height)
            .finish()
    }
}

/// `cosmos.tx.v1beta1.SignerInfo` in direct sign mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignerInfo {
    pub public_key: Option<Any>,
    pub sequence: u64,
}

impl SignerInfo {
    pub fn encode(&self) -> Vec<u8> {
        let single = ProtoWriter::new().uint64(1, SIGN_MODE_DIRECT).finish();
        let mode_info = ProtoWriter::new().message(1, &single).finish();

        let mut writer = ProtoWriter::new();
        if let Some(key) = &self.public_key {
            writer = writer.message(1, &key.encode());
        }
        writer
            .message(2, &mode_info)
            .uint64(3, self.sequence)
            .finish()
    }
}

/// `cosmos.tx.v1beta1.AuthInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthInfo {
    pub signer_infos: Vec<SignerInfo>,
    pub fee: Fee,
}

impl AuthInfo {
    pub fn encode(&self) -> Vec<u8> {
        let infos: Vec<Vec<u8>> = self.signer_infos.iter().map(SignerInfo::encode).collect();
        ProtoWriter::new()
            .repeated(1, &infos)
            .message(2, &self.fee.encode())
            .finish()
    }
}

/// `cosmos.tx.v1beta1.SignDoc`: the exact bytes a direct-mode signer signs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignDoc {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub chain_id: String,
    pub account_number: u64,
}

impl SignDoc {
    pub fn encode(&self) -> Vec<u8> {
        ProtoWriter::new()
            .bytes(1, &self.body_bytes)
            .bytes(2, &self.auth_info_bytes)
            .string(3, &self.chain_id)
            .uint64(4, self.account_number)
            .finish()
    }
}

/// `cosmos.tx.v1beta1.TxRaw`: the broadcastable signed transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxRaw {
    pub body_bytes: Vec<u8>,
    pub auth_info_bytes: Vec<u8>,
    pub signatures: Vec<Vec<u8>>,
}

impl TxRaw {
    pub fn encode(&self) -> Vec<u8> {
        ProtoWriter::new()
            .bytes(1, &self.body_bytes)
            .bytes(2, &self.auth_info_bytes)
            .repeated(3, &self.signatures)
            .finish()
    }
}

/// The routing public key for an abstract account.
///
/// `Any { type_url: NIL_PUBKEY_TYPE_URL, value: NilPubKey { address_bytes = 1 } }`
/// where `address_bytes` are the raw bytes behind the account's bech32
/// address. This is not a key; the chain uses the type URL to dispatch
/// verification to the account contract. The layout must not change.
pub fn routing_pubkey(account_address: &str) -> Result<Any, CosmosError> {
    let raw = address_bytes(account_address)?;
    let value = ProtoWriter::new().bytes(1, &raw).finish();
    Ok(Any::new(NIL_PUBKEY_TYPE_URL, value))
}

/// `AuthInfo` with a single routing signer info for `account_address`.
pub fn routing_auth_info(
    account_address: &str,
    sequence: u64,
    fee: Fee,
) -> Result<AuthInfo, CosmosError> {
    Ok(AuthInfo {
        signer_infos: vec![SignerInfo {
            public_key: Some(routing_pubkey(account_address)?),
            sequence,
        }],
        fee,
    })
}
