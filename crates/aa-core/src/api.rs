//! Request and response bodies of the account-creation service.
//!
//! Field names are part of the service contract.

use serde::{Deserialize, Serialize};

use crate::types::AuthenticatorKind;

/// Asks whether an account exists for an address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountLookupRequest {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authenticator_type: Option<AuthenticatorKind>,
}

/// Result of an account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountCreationResponse {
    pub account_address: String,
    pub code_id: u64,
    pub transaction_hash: String,
}

/// Per-kind account creation bodies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AccountCreationRequest {
    /// `0x` address and a personal-sign signature over the predicted
    /// account address.
    EthWallet { address: String, signature: String },
    /// Base64 pubkey and a signature over the predicted account address.
    Secp256K1 { pubkey: String, signature: String },
    /// Session JWT and the payload it authenticates.
    Jwt { jwt: String, auth_payload: String },
}

impl AccountCreationRequest {
    pub fn kind(&self) -> AuthenticatorKind {
        match self {
            AccountCreationRequest::EthWallet { .. } => AuthenticatorKind::EthWallet,
            AccountCreationRequest::Secp256K1 { .. } => AuthenticatorKind::Secp256K1,
            AccountCreationRequest::Jwt { .. } => AuthenticatorKind::Jwt,
        }
    }

    /// Path segment of the creation endpoint for this kind.
    pub fn endpoint(&self) -> &'static str {
        match self {
            AccountCreationRequest::EthWallet { .. } => "ethwallet",
            AccountCreationRequest::Secp256K1 { .. } => "secp256k1",
            AccountCreationRequest::Jwt { .. } => "jwt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn lookup_omits_missing_kind() {
        let req = AccountLookupRequest {
            address: "0xabc".into(),
            authenticator_type: None,
        };
        assert_eq!(serde_json::to_value(&req).unwrap(), json!({ "address": "0xabc" }));

        let req = AccountLookupRequest {
            address: "0xabc".into(),
            authenticator_type: Some(AuthenticatorKind::EthWallet),
        };
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "address": "0xabc", "authenticator_type": "EthWallet" })
        );
    }

    #[test]
    fn creation_requests_serialize_flat() {
        let eth = AccountCreationRequest::EthWallet {
            address: "0xabc".into(),
            signature: "0xsig".into(),
        };
        assert_eq!(
            serde_json::to_value(&eth).unwrap(),
            json!({ "address": "0xabc", "signature": "0xsig" })
        );

        let jwt = AccountCreationRequest::Jwt {
            jwt: "header.payload.sig".into(),
            auth_payload: "payload".into(),
        };
        assert_eq!(
            serde_json::to_value(&jwt).unwrap(),
            json!({ "jwt": "header.payload.sig", "auth_payload": "payload" })
        );
        assert_eq!(jwt.kind(), AuthenticatorKind::Jwt);
    }

    #[test]
    fn secp256k1_request_parses_back_to_its_variant() {
        let parsed: AccountCreationRequest =
            serde_json::from_str(r#"{"pubkey":"AQID","signature":"c2ln"}"#).unwrap();
        assert_eq!(parsed.kind(), AuthenticatorKind::Secp256K1);
        assert_eq!(parsed.endpoint(), "secp256k1");
    }

    #[test]
    fn creation_response_parses() {
        let resp: AccountCreationResponse = serde_json::from_str(
            r#"{"account_address":"xion1aa","code_id":793,"transaction_hash":"ABCD"}"#,
        )
        .unwrap();
        assert_eq!(resp.code_id, 793);
        assert_eq!(resp.account_address, "xion1aa");
    }
}
