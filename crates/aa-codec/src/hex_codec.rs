//! Hex canonicalization and validation.
//!
//! All helpers here are pure. They never pad or truncate: a value is either
//! accepted as given (minus any `0x` prefixes) or rejected with an error that
//! names the field and what was wrong with it.

use crate::error::CodecError;

/// Validation options for [`validate_hex_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexRules {
    /// Accept an empty string (after prefix removal).
    pub allow_empty: bool,
    /// Reject values with an odd number of hex digits.
    pub require_even_length: bool,
    /// When set, the decoded value must be exactly this many bytes.
    pub exact_byte_length: Option<usize>,
}

impl Default for HexRules {
    fn default() -> Self {
        Self {
            allow_empty: false,
            require_even_length: true,
            exact_byte_length: None,
        }
    }
}

impl HexRules {
    /// Rules for a value that must decode to exactly `len` bytes.
    pub fn exact(len: usize) -> Self {
        Self {
            exact_byte_length: Some(len),
            ..Self::default()
        }
    }
}

/// Removes every leading `0x`/`0X` prefix, not just the first one.
///
/// `"0x0xabcd"` and `"abcd"` both normalize to `"abcd"`. The function is
/// idempotent.
pub fn normalize_hex_prefix(value: &str) -> &str {
    let mut rest = value;
    while let Some(stripped) = rest
        .strip_prefix("0x")
        .or_else(|| rest.strip_prefix("0X"))
    {
        rest = stripped;
    }
    rest
}

/// Returns the value with exactly one lowercase `0x` prefix.
pub fn ensure_hex_prefix(value: &str) -> String {
    format!("0x{}", normalize_hex_prefix(value))
}

/// Returns `true` if every character is an ASCII hex digit.
///
/// Prefixes are not stripped here; callers normalize first.
pub fn is_hex(value: &str) -> bool {
    value.chars().all(|c| c.is_ascii_hexdigit())
}

/// Validates a hex string against `rules` and returns it without prefixes.
///
/// Checks run in a fixed order: emptiness, character set, parity, then
/// byte length. The first failing check decides the error. Whitespace is not
/// trimmed and fails the character check.
pub fn validate_hex_string<'a>(
    value: &'a str,
    field: &str,
    rules: HexRules,
) -> Result<&'a str, CodecError> {
    let digits = normalize_hex_prefix(value);

    if digits.is_empty() {
        if rules.allow_empty {
            return Ok(digits);
        }
        return Err(CodecError::Empty {
            field: field.to_string(),
        });
    }

    let invalid = invalid_hex_chars(digits);
    if !invalid.is_empty() {
        return Err(CodecError::InvalidHex {
            field: field.to_string(),
            detail: format!("invalid characters \"{invalid}\""),
        });
    }

    if rules.require_even_length && digits.len() % 2 != 0 {
        return Err(CodecError::InvalidHex {
            field: field.to_string(),
            detail: format!("odd number of hex digits ({})", digits.len()),
        });
    }

    if let Some(expected) = rules.exact_byte_length {
        if digits.len() != expected * 2 {
            return Err(CodecError::InvalidLength {
                field: field.to_string(),
                expected: format!("{expected} bytes ({} hex chars)", expected * 2),
                actual: digits.len(),
            });
        }
    }

    Ok(digits)
}

/// Validates and decodes a hex string.
pub fn decode_hex(value: &str, field: &str, rules: HexRules) -> Result<Vec<u8>, CodecError> {
    let digits = validate_hex_string(value, field, rules)?;
    hex::decode(digits).map_err(|e| CodecError::InvalidHex {
        field: field.to_string(),
        detail: e.to_string(),
    })
}

/// Decodes a hex string that must be exactly `N` bytes long.
pub fn decode_hex_array<const N: usize>(value: &str, field: &str) -> Result<[u8; N], CodecError> {
    let bytes = decode_hex(value, field, HexRules::exact(N))?;
    bytes.try_into().map_err(|v: Vec<u8>| CodecError::InvalidLength {
        field: field.to_string(),
        expected: format!("{N} bytes"),
        actual: v.len(),
    })
}

/// Lowercase hex without a prefix.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Distinct offending characters in first-seen order.
fn invalid_hex_chars(value: &str) -> String {
    let mut seen = String::new();
    for c in value.chars().filter(|c| !c.is_ascii_hexdigit()) {
        if !seen.contains(c) {
            seen.push(c);
        }
    }
    seen
}
