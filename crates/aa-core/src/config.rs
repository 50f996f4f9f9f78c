use aa_codec::bech32_codec::{validate_bech32_address, validate_prefix};
use aa_codec::hex_codec::{validate_hex_string, HexRules};
use serde::{Deserialize, Serialize};

use crate::address::SmartAccountAddressConfig;
use crate::error::AaError;
use crate::types::Salt;

/// Static facts about a network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkPreset {
    pub chain_id: &'static str,
    pub name: &'static str,
    pub bech32_prefix: &'static str,
    pub fee_denom: &'static str,
    pub is_testnet: bool,
}

/// XION testnet (`xion-testnet-2`).
pub const XION_TESTNET: NetworkPreset = NetworkPreset {
    chain_id: "xion-testnet-2",
    name: "XION Testnet",
    bech32_prefix: "xion",
    fee_denom: "uxion",
    is_testnet: true,
};

/// XION mainnet (`xion-mainnet-1`).
pub const XION_MAINNET: NetworkPreset = NetworkPreset {
    chain_id: "xion-mainnet-1",
    name: "XION",
    bech32_prefix: "xion",
    fee_denom: "uxion",
    is_testnet: false,
};

pub fn all_presets() -> Vec<NetworkPreset> {
    vec![XION_MAINNET, XION_TESTNET]
}

pub fn preset_by_chain_id(chain_id: &str) -> Option<NetworkPreset> {
    all_presets().into_iter().find(|p| p.chain_id == chain_id)
}

/// Everything the account layer needs to know about a deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub chain_id: String,
    pub bech32_prefix: String,
    pub fee_denom: String,
    /// Code id of the account contract.
    pub account_code_id: u64,
    /// Checksum of the account contract code, 32 bytes hex.
    pub account_checksum: String,
    /// Bech32 address that instantiates accounts.
    pub account_creator: String,
    /// Base URL of the session service used by JWT authenticators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_api_base: Option<String>,
}

impl NetworkConfig {
    /// Config for a preset network; contract fields still need filling in.
    pub fn from_preset(
        preset: &NetworkPreset,
        account_code_id: u64,
        account_checksum: impl Into<String>,
        account_creator: impl Into<String>,
    ) -> Self {
        Self {
            chain_id: preset.chain_id.to_string(),
            bech32_prefix: preset.bech32_prefix.to_string(),
            fee_denom: preset.fee_denom.to_string(),
            account_code_id,
            account_checksum: account_checksum.into(),
            account_creator: account_creator.into(),
            auth_api_base: None,
        }
    }

    /// Parses and validates a JSON config.
    pub fn from_json(json: &str) -> Result<Self, AaError> {
        let config: NetworkConfig = serde_json::from_str(json)
            .map_err(|e| AaError::InvalidInput(format!("network config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), AaError> {
        if self.chain_id.trim().is_empty() {
            return Err(AaError::InvalidInput("chain_id: value must not be empty".into()));
        }
        if self.fee_denom.trim().is_empty() {
            return Err(AaError::InvalidInput("fee_denom: value must not be empty".into()));
        }
        if self.account_code_id == 0 {
            return Err(AaError::InvalidInput("account_code_id: must be non-zero".into()));
        }
        validate_prefix(&self.bech32_prefix, "bech32_prefix")?;
        validate_hex_string(&self.account_checksum, "account_checksum", HexRules::exact(32))?;
        validate_bech32_address(
            &self.account_creator,
            "account_creator",
            Some(&self.bech32_prefix),
        )?;
        if let Some(base) = &self.auth_api_base {
            if !(base.starts_with("https://") || base.starts_with("http://")) {
                return Err(AaError::InvalidInput(format!(
                    "auth_api_base: not an http(s) URL: {base}"
                )));
            }
        }
        Ok(())
    }

    /// Address inputs for the account that `salt` derives on this network.
    pub fn address_config(&self, salt: &Salt) -> SmartAccountAddressConfig {
        SmartAccountAddressConfig {
            checksum: self.account_checksum.clone(),
            creator: self.account_creator.clone(),
            salt: salt.to_hex(),
            prefix: self.bech32_prefix.clone(),
        }
    }

    /// JWT session settings, if this network has a session service.
    pub fn jwt_signer_config(&self) -> Result<JwtSignerConfig, AaError> {
        self.auth_api_base
            .as_deref()
            .map(JwtSignerConfig::new)
            .ok_or_else(|| {
                AaError::InvalidInput(format!("auth_api_base: not configured for {}", self.chain_id))
            })
    }
}

fn default_session_duration() -> u32 {
    60
}

/// Settings for the JWT session exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtSignerConfig {
    pub auth_api_base: String,
    #[serde(default = "default_session_duration")]
    pub session_duration_minutes: u32,
}

impl JwtSignerConfig {
    pub fn new(auth_api_base: impl Into<String>) -> Self {
        Self {
            auth_api_base: auth_api_base.into(),
            session_duration_minutes: default_session_duration(),
        }
    }

    /// `{base}/sessions/authenticate`, tolerant of a trailing slash.
    pub fn authenticate_url(&self) -> String {
        format!(
            "{}/sessions/authenticate",
            self.auth_api_base.trim_end_matches('/')
        )
    }
}
