//! Account contract messages.

use aa_codec::format::to_base64;
use chain_cosmos::msgs::{MsgExec, MsgRegisterAccount};
use chain_cosmos::proto::Any;
use chain_cosmos::tx::Coin;
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::AaError;
use crate::types::{AuthenticatorKind, Salt};

/// Authenticator as the account contract stores it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Authenticator {
    EthWallet { address: String },
    Secp256K1 { pubkey: String },
    Ed25519 { pubkey: String },
    Sr25519 { pubkey: String },
    #[serde(rename = "JWT")]
    Jwt { aud: String, sub: String },
    Passkey { url: String, credential: String },
    #[serde(rename = "ZKEmail")]
    ZkEmail { email_salt: String },
}

impl Authenticator {
    pub fn kind(&self) -> AuthenticatorKind {
        match self {
            Authenticator::EthWallet { .. } => AuthenticatorKind::EthWallet,
            Authenticator::Secp256K1 { .. } => AuthenticatorKind::Secp256K1,
            Authenticator::Ed25519 { .. } => AuthenticatorKind::Ed25519,
            Authenticator::Sr25519 { .. } => AuthenticatorKind::Sr25519,
            Authenticator::Jwt { .. } => AuthenticatorKind::Jwt,
            Authenticator::Passkey { .. } => AuthenticatorKind::Passkey,
            Authenticator::ZkEmail { .. } => AuthenticatorKind::ZkEmail,
        }
    }
}

/// Instantiate message of the account contract: the first authenticator
/// plus its proof over the predicted account address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstantiateMsg {
    pub authenticator: Authenticator,
    pub authenticator_id: u8,
    /// Base64 proof bytes.
    pub signature: String,
}

impl InstantiateMsg {
    pub fn new(authenticator: Authenticator, authenticator_id: u8, signature: &[u8]) -> Self {
        Self {
            authenticator,
            authenticator_id,
            signature: to_base64(signature),
        }
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, AaError> {
        serde_json::to_vec(self).map_err(|e| AaError::InvalidInput(format!("instantiate msg: {e}")))
    }
}

/// `MsgRegisterAccount` for the account contract of `config`, as an `Any`.
pub fn register_account_msg(
    sender: &str,
    config: &NetworkConfig,
    instantiate: &InstantiateMsg,
    salt: &Salt,
    funds: Vec<Coin>,
) -> Result<Any, AaError> {
    let msg = MsgRegisterAccount {
        sender: sender.to_string(),
        code_id: config.account_code_id,
        msg: instantiate.to_json_bytes()?,
        funds,
        salt: salt.as_bytes().to_vec(),
    };
    Ok(msg.to_any())
}

/// Wraps `msgs` so `grantee` executes them under authz grants.
pub fn exec_as_grantee(grantee: &str, msgs: Vec<Any>) -> Result<Any, AaError> {
    if msgs.is_empty() {
        return Err(AaError::InvalidInput("MsgExec needs at least one message".into()));
    }
    Ok(MsgExec {
        grantee: grantee.to_string(),
        msgs,
    }
    .to_any())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::XION_TESTNET;
    use chain_cosmos::msgs::{MSG_EXEC_TYPE_URL, MSG_REGISTER_ACCOUNT_TYPE_URL};

    #[test]
    fn instantiate_msg_json_shape() {
        let msg = InstantiateMsg::new(
            Authenticator::Secp256K1 {
                pubkey: "Anm+Zn753LusVaBilc6HCwcCm/zbLc4o2VnygVsW+BeY".into(),
            },
            0,
            &[1, 2, 3],
        );
        assert_eq!(
            String::from_utf8(msg.to_json_bytes().unwrap()).unwrap(),
            r#"{"authenticator":{"Secp256K1":{"pubkey":"Anm+Zn753LusVaBilc6HCwcCm/zbLc4o2VnygVsW+BeY"}},"authenticator_id":0,"signature":"AQID"}"#
        );
    }

    #[test]
    fn jwt_authenticator_uses_contract_name() {
        let auth = Authenticator::Jwt {
            aud: "project".into(),
            sub: "user".into(),
        };
        assert_eq!(
            serde_json::to_string(&auth).unwrap(),
            r#"{"JWT":{"aud":"project","sub":"user"}}"#
        );
        assert_eq!(auth.kind(), AuthenticatorKind::Jwt);
    }

    #[test]
    fn register_account_carries_code_id_and_salt() {
        let config = NetworkConfig::from_preset(&XION_TESTNET, 793, "ab".repeat(32), "xion1creator");
        let instantiate = InstantiateMsg::new(
            Authenticator::EthWallet {
                address: "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf".into(),
            },
            0,
            &[9; 65],
        );
        let salt = Salt::from_bytes([0x5a; 32]);
        let any = register_account_msg("xion1sender", &config, &instantiate, &salt, vec![]).unwrap();

        assert_eq!(any.type_url, MSG_REGISTER_ACCOUNT_TYPE_URL);
        let expected = MsgRegisterAccount {
            sender: "xion1sender".into(),
            code_id: 793,
            msg: instantiate.to_json_bytes().unwrap(),
            funds: vec![],
            salt: vec![0x5a; 32],
        }
        .encode();
        assert_eq!(any.value, expected);
    }

    #[test]
    fn exec_requires_messages() {
        assert!(exec_as_grantee("xion1grantee", vec![]).is_err());
        let any = exec_as_grantee("xion1grantee", vec![Any::new("/a.B", vec![1])]).unwrap();
        assert_eq!(any.type_url, MSG_EXEC_TYPE_URL);
    }
}
