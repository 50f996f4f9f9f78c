use aa_codec::CodecError;
use chain_cosmos::CosmosError;
use chain_eth::EthError;
use thiserror::Error;

/// Error class, for callers that branch on what went wrong rather than where.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed hex, bech32, base64 or a length mismatch. Raised before any
    /// cryptographic step.
    InputValidation,
    /// A key or signature could not be decoded or produced.
    CryptographicFailure,
    /// Account resolution found zero or several candidates, or the on-chain
    /// account is missing.
    ProtocolState,
    /// An auth, indexer or chain service failed or answered nonsense.
    ExternalService,
}

#[derive(Debug, Error)]
pub enum AaError {
    #[error(transparent)]
    InputValidation(#[from] CodecError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cryptographic failure: {0}")]
    CryptographicFailure(String),

    #[error("Protocol state error: {0}")]
    ProtocolState(String),

    #[error("{service} error: {detail}")]
    ExternalService { service: String, detail: String },
}

impl AaError {
    pub fn external(service: impl Into<String>, detail: impl Into<String>) -> Self {
        AaError::ExternalService {
            service: service.into(),
            detail: detail.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AaError::InputValidation(_) | AaError::InvalidInput(_) => ErrorCategory::InputValidation,
            AaError::CryptographicFailure(_) => ErrorCategory::CryptographicFailure,
            AaError::ProtocolState(_) => ErrorCategory::ProtocolState,
            AaError::ExternalService { .. } => ErrorCategory::ExternalService,
        }
    }
}

impl From<EthError> for AaError {
    fn from(e: EthError) -> Self {
        match e {
            EthError::Codec(codec) => AaError::InputValidation(codec),
            other => AaError::CryptographicFailure(format!("ETH: {other}")),
        }
    }
}

impl From<CosmosError> for AaError {
    fn from(e: CosmosError) -> Self {
        match e {
            CosmosError::Codec(codec) => AaError::InputValidation(codec),
            other => AaError::CryptographicFailure(format!("Cosmos: {other}")),
        }
    }
}
