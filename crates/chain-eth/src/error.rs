use aa_codec::CodecError;
use thiserror::Error;

/// Ethereum primitive errors.
#[derive(Debug, Error)]
pub enum EthError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("signing error: {0}")]
    SigningError(String),
}
