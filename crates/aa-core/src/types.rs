use std::fmt;
use std::str::FromStr;

use aa_codec::format::format_secp256k1_pubkey;
use aa_codec::hex_codec::{decode_hex_array, to_hex};
use chain_eth::address::normalize_eth_address;
use serde::{Deserialize, Serialize};

use crate::error::AaError;

/// Authenticator kinds an abstract account can register.
///
/// The set is closed; adding a kind means touching every `match` on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthenticatorKind {
    EthWallet,
    Secp256K1,
    Ed25519,
    Sr25519,
    #[serde(rename = "JWT")]
    Jwt,
    Passkey,
    #[serde(rename = "ZKEmail")]
    ZkEmail,
}

impl AuthenticatorKind {
    pub const ALL: [AuthenticatorKind; 7] = [
        AuthenticatorKind::EthWallet,
        AuthenticatorKind::Secp256K1,
        AuthenticatorKind::Ed25519,
        AuthenticatorKind::Sr25519,
        AuthenticatorKind::Jwt,
        AuthenticatorKind::Passkey,
        AuthenticatorKind::ZkEmail,
    ];

    /// Name used by the account contract and the account-creation API.
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthenticatorKind::EthWallet => "EthWallet",
            AuthenticatorKind::Secp256K1 => "Secp256K1",
            AuthenticatorKind::Ed25519 => "Ed25519",
            AuthenticatorKind::Sr25519 => "Sr25519",
            AuthenticatorKind::Jwt => "JWT",
            AuthenticatorKind::Passkey => "Passkey",
            AuthenticatorKind::ZkEmail => "ZKEmail",
        }
    }
}

impl fmt::Display for AuthenticatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthenticatorKind {
    type Err = AaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AuthenticatorKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| AaError::InvalidInput(format!("unknown authenticator kind: {s}")))
    }
}

/// Proof-of-ownership material for one authenticator.
///
/// `value` depends on `kind`: a `0x` address for EthWallet, a base64 or hex
/// pubkey for Secp256K1, `"aud.sub"` for JWT, an opaque blob otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub kind: AuthenticatorKind,
    pub value: String,
}

impl Credential {
    pub fn new(kind: AuthenticatorKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// The form every system hashes into a salt.
    ///
    /// Ethereum addresses become lowercase with one `0x`. Secp256K1 keys become
    /// canonical base64 whatever encoding they arrived in. Everything else is
    /// kept verbatim.
    pub fn canonical(&self) -> Result<String, AaError> {
        if self.value.is_empty() {
            return Err(AaError::InvalidInput(format!(
                "{} credential must not be empty",
                self.kind
            )));
        }
        match self.kind {
            AuthenticatorKind::EthWallet => Ok(normalize_eth_address(&self.value)?),
            AuthenticatorKind::Secp256K1 => Ok(format_secp256k1_pubkey(&self.value)?),
            AuthenticatorKind::Ed25519
            | AuthenticatorKind::Sr25519
            | AuthenticatorKind::Jwt
            | AuthenticatorKind::Passkey
            | AuthenticatorKind::ZkEmail => Ok(self.value.clone()),
        }
    }
}

/// One authenticator on an abstract account, as a signer sees it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AAccountData {
    /// The abstract account (contract) address.
    pub address: String,
    /// The underlying signer's own address, the one that produces proofs.
    pub account_address: String,
    /// Index of the authenticator on the account.
    pub authenticator_id: u8,
    pub algo: AuthenticatorKind,
}

/// 32-byte account salt. Displays as 64 lowercase hex chars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Salt([u8; 32]);

impl Salt {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Salt(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        to_hex(&self.0)
    }
}

impl fmt::Display for Salt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Salt {
    type Err = AaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Salt(decode_hex_array::<32>(s, "salt")?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_names_round_trip_through_serde() {
        for kind in AuthenticatorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
            let back: AuthenticatorKind = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
        }
    }

    #[test]
    fn kind_from_str_is_case_insensitive() {
        assert_eq!("jwt".parse::<AuthenticatorKind>().unwrap(), AuthenticatorKind::Jwt);
        assert_eq!("zkemail".parse::<AuthenticatorKind>().unwrap(), AuthenticatorKind::ZkEmail);
        assert!("Bls".parse::<AuthenticatorKind>().is_err());
    }

    #[test]
    fn eth_credential_canonical_form() {
        let cred = Credential::new(
            AuthenticatorKind::EthWallet,
            "0x0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf",
        );
        assert_eq!(
            cred.canonical().unwrap(),
            "0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn secp256k1_credential_canonical_from_hex_and_base64() {
        let hex_key = "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798";
        let b64_key = "Anm+Zn753LusVaBilc6HCwcCm/zbLc4o2VnygVsW+BeY";
        let from_hex = Credential::new(AuthenticatorKind::Secp256K1, hex_key).canonical().unwrap();
        let from_b64 = Credential::new(AuthenticatorKind::Secp256K1, b64_key).canonical().unwrap();
        assert_eq!(from_hex, b64_key);
        assert_eq!(from_hex, from_b64);
    }

    #[test]
    fn jwt_credential_kept_verbatim() {
        let cred = Credential::new(AuthenticatorKind::Jwt, "project-live-1.user-test-1");
        assert_eq!(cred.canonical().unwrap(), "project-live-1.user-test-1");
    }

    #[test]
    fn empty_credential_rejected() {
        for kind in AuthenticatorKind::ALL {
            assert!(Credential::new(kind, "").canonical().is_err());
        }
    }

    #[test]
    fn salt_parses_and_displays_lowercase() {
        let salt: Salt = format!("0x{}", "AB".repeat(32)).parse().unwrap();
        assert_eq!(salt.to_string(), "ab".repeat(32));
        assert_eq!(salt.as_bytes(), &[0xab; 32]);
    }

    #[test]
    fn salt_wrong_length_names_field() {
        let err = "ab".repeat(31).parse::<Salt>().unwrap_err();
        assert!(err.to_string().contains("salt"));
    }
}
