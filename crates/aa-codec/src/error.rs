use thiserror::Error;

/// Input validation errors raised before any cryptographic step.
///
/// Every variant carries the name of the offending field ("checksum",
/// "salt", "signature", ...) so the caller can tell which input was wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    #[error("{field}: value must not be empty")]
    Empty { field: String },

    #[error("{field}: invalid hex: {detail}")]
    InvalidHex { field: String, detail: String },

    #[error("{field}: expected {expected}, got {actual}")]
    InvalidLength {
        field: String,
        expected: String,
        actual: usize,
    },

    #[error("{field}: invalid base64: {detail}")]
    InvalidBase64 { field: String, detail: String },

    #[error("{field}: invalid bech32 address: {detail}")]
    InvalidBech32 { field: String, detail: String },

    #[error("{field}: expected prefix \"{expected}\", got \"{actual}\"")]
    PrefixMismatch {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("{field}: invalid bech32 prefix \"{prefix}\"")]
    InvalidPrefix { field: String, prefix: String },
}

impl CodecError {
    /// The field name the error is attributed to.
    pub fn field(&self) -> &str {
        match self {
            CodecError::Empty { field }
            | CodecError::InvalidHex { field, .. }
            | CodecError::InvalidLength { field, .. }
            | CodecError::InvalidBase64 { field, .. }
            | CodecError::InvalidBech32 { field, .. }
            | CodecError::PrefixMismatch { field, .. }
            | CodecError::InvalidPrefix { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_empty() {
        let err = CodecError::Empty {
            field: "salt".into(),
        };
        assert_eq!(err.to_string(), "salt: value must not be empty");
    }

    #[test]
    fn display_invalid_hex() {
        let err = CodecError::InvalidHex {
            field: "checksum".into(),
            detail: "invalid characters \"zz\"".into(),
        };
        assert_eq!(
            err.to_string(),
            "checksum: invalid hex: invalid characters \"zz\""
        );
    }

    #[test]
    fn display_invalid_length() {
        let err = CodecError::InvalidLength {
            field: "signature".into(),
            expected: "65 bytes".into(),
            actual: 64,
        };
        assert_eq!(err.to_string(), "signature: expected 65 bytes, got 64");
    }

    #[test]
    fn display_prefix_mismatch() {
        let err = CodecError::PrefixMismatch {
            field: "creator".into(),
            expected: "xion".into(),
            actual: "cosmos".into(),
        };
        assert_eq!(
            err.to_string(),
            "creator: expected prefix \"xion\", got \"cosmos\""
        );
    }

    #[test]
    fn field_accessor_returns_field_name() {
        let err = CodecError::InvalidBech32 {
            field: "creator".into(),
            detail: "bad checksum".into(),
        };
        assert_eq!(err.field(), "creator");
    }

    #[test]
    fn error_trait_is_implemented() {
        let err: Box<dyn std::error::Error> = Box::new(CodecError::Empty {
            field: "pubkey".into(),
        });
        assert!(err.to_string().contains("pubkey"));
    }
}
