//! ADR-036 arbitrary-message envelopes.
//!
//! [ADR-36](https://github.com/cosmos/cosmos-sdk/blob/main/docs/architecture/adr-036-arbitrary-signature.md)
//! wraps off-chain data in a zero-fee amino sign doc so wallets can sign it
//! with their ordinary transaction path.

use aa_codec::format::to_base64;
use serde_json::json;
use sha2::{Digest, Sha256};

/// Canonical JSON bytes of the ADR-036 sign doc for `data` signed by `signer`.
///
/// Keys are emitted sorted with no whitespace, matching amino JSON.
pub fn sign_doc_bytes(data: &[u8], signer: &str) -> Vec<u8> {
    let doc = json!({
        "account_number": "0",
        "chain_id": "",
        "fee": {
            "amount": [],
            "gas": "0",
        },
        "memo": "",
        "msgs": [
            {
                "type": "sign/MsgSignData",
                "value": {
                    "data": to_base64(data),
                    "signer": signer,
                },
            },
        ],
        "sequence": "0",
    });
    doc.to_string().into_bytes()
}

/// SHA-256 of [`sign_doc_bytes`], the digest a wallet actually signs.
pub fn sign_doc_hash(data: &[u8], signer: &str) -> [u8; 32] {
    Sha256::digest(sign_doc_bytes(data, signer)).into()
}
