//! Bech32 address validation and encoding for Cosmos-style addresses.

use bech32::{Bech32, Hrp};

use crate::error::CodecError;

/// A decoded bech32 address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bech32Address {
    /// Human-readable prefix, lowercase (e.g. `xion`).
    pub prefix: String,
    /// Raw address bytes (20 for accounts, 32 for contracts).
    pub data: Vec<u8>,
}

/// Checks that `prefix` matches `^[a-z][a-z0-9]*$`.
pub fn validate_prefix(prefix: &str, field: &str) -> Result<(), CodecError> {
    let mut chars = prefix.chars();
    let valid = match chars.next() {
        Some(first) => {
            first.is_ascii_lowercase()
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        Err(CodecError::InvalidPrefix {
            field: field.to_string(),
            prefix: prefix.to_string(),
        })
    }
}

/// Decodes and validates a bech32 address.
///
/// When `expected_prefix` is given the decoded prefix must match it exactly.
pub fn validate_bech32_address(
    value: &str,
    field: &str,
    expected_prefix: Option<&str>,
) -> Result<Bech32Address, CodecError> {
    if value.trim().is_empty() {
        return Err(CodecError::Empty {
            field: field.to_string(),
        });
    }

    let (hrp, data) = bech32::decode(value).map_err(|e| CodecError::InvalidBech32 {
        field: field.to_string(),
        detail: e.to_string(),
    })?;

    if data.is_empty() {
        return Err(CodecError::InvalidBech32 {
            field: field.to_string(),
            detail: "address has no data".into(),
        });
    }

    let prefix = hrp.to_string().to_ascii_lowercase();
    if let Some(expected) = expected_prefix {
        if prefix != expected {
            return Err(CodecError::PrefixMismatch {
                field: field.to_string(),
                expected: expected.to_string(),
                actual: prefix,
            });
        }
    }

    Ok(Bech32Address { prefix, data })
}

/// Encodes raw bytes as a bech32 address with the given prefix.
///
/// The prefix is preserved verbatim; it must already satisfy
/// [`validate_prefix`].
pub fn encode_bech32(prefix: &str, data: &[u8], field: &str) -> Result<String, CodecError> {
    validate_prefix(prefix, field)?;

    let hrp = Hrp::parse(prefix).map_err(|e| CodecError::InvalidBech32 {
        field: field.to_string(),
        detail: e.to_string(),
    })?;

    bech32::encode::<Bech32>(hrp, data).map_err(|e| CodecError::InvalidBech32 {
        field: field.to_string(),
        detail: e.to_string(),
    })
}
