use aa_codec::bech32_codec::{encode_bech32, validate_bech32_address, validate_prefix};
use aa_codec::hex_codec::decode_hex_array;
use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::AaError;
use crate::types::Salt;

/// The chain's deterministic contract-address primitive (`instantiate2`).
///
/// Implementations must be pure: the same inputs always give the same bytes.
pub trait Instantiate2Hasher: Send + Sync {
    fn instantiate2_address(
        &self,
        checksum: &[u8; 32],
        creator: &[u8],
        salt: &[u8; 32],
    ) -> Result<Vec<u8>, AaError>;
}

impl<F> Instantiate2Hasher for F
where
    F: Fn(&[u8; 32], &[u8], &[u8; 32]) -> Vec<u8> + Send + Sync,
{
    fn instantiate2_address(
        &self,
        checksum: &[u8; 32],
        creator: &[u8],
        salt: &[u8; 32],
    ) -> Result<Vec<u8>, AaError> {
        Ok(self(checksum, creator, salt))
    }
}

/// Inputs to an account address prediction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SmartAccountAddressConfig {
    /// Account contract code checksum, 32 bytes hex.
    pub checksum: String,
    /// Bech32 address of the instantiating contract.
    pub creator: String,
    /// 32 bytes hex, usually a [`Salt`].
    pub salt: String,
    /// Bech32 prefix of the predicted address.
    pub prefix: String,
}

/// Validates address inputs and hands them to an [`Instantiate2Hasher`].
pub struct AddressPredictor<H> {
    hasher: H,
}

impl<H: Instantiate2Hasher> AddressPredictor<H> {
    pub fn new(hasher: H) -> Self {
        Self { hasher }
    }

    /// Predicts the bech32 address of an account contract.
    ///
    /// Every input is validated before the hasher runs. The prefix is kept
    /// verbatim in the result.
    pub fn predict_address(
        &self,
        checksum: &str,
        creator: &str,
        salt: &str,
        prefix: &str,
    ) -> Result<String, AaError> {
        let checksum = decode_hex_array::<32>(checksum, "checksum")?;
        let salt = decode_hex_array::<32>(salt, "salt")?;
        let creator = validate_bech32_address(creator, "creator", None)?;
        validate_prefix(prefix, "prefix")?;

        let raw = self
            .hasher
            .instantiate2_address(&checksum, &creator.data, &salt)?;
        if raw.is_empty() {
            return Err(AaError::CryptographicFailure(
                "instantiate2 hasher returned no bytes".into(),
            ));
        }
        Ok(encode_bech32(prefix, &raw, "address")?)
    }

    pub fn predict(&self, config: &SmartAccountAddressConfig) -> Result<String, AaError> {
        self.predict_address(&config.checksum, &config.creator, &config.salt, &config.prefix)
    }

    /// Address for a derived [`Salt`].
    pub fn predict_for_salt(
        &self,
        checksum: &str,
        creator: &str,
        salt: &Salt,
        prefix: &str,
    ) -> Result<String, AaError> {
        self.predict_address(checksum, creator, &salt.to_hex(), prefix)
    }

    /// Address of the account `salt` derives on `network`.
    pub fn predict_for_network(
        &self,
        network: &NetworkConfig,
        salt: &Salt,
    ) -> Result<String, AaError> {
        self.predict(&network.address_config(salt))
    }
}
