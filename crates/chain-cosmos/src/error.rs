use aa_codec::CodecError;
use thiserror::Error;

/// Cosmos chain primitive errors.
#[derive(Debug, Error)]
pub enum CosmosError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),
}
