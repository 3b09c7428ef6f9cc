use crate::SchemaValidationError;
use alloy::primitives::U256;

/// Normalize a non-negative decimal integer of any size by stripping leading
/// zeros. Returns `None` if the string is empty or contains anything other
/// than ASCII digits.
pub(crate) fn normalize_decimal(value: &str) -> Option<String> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = value.trim_start_matches('0');
    Some(if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() })
}

/// Parse a decimal string as a `uint256`.
pub(crate) fn parse_uint256(field: &'static str, value: &str) -> Result<U256, SchemaValidationError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(SchemaValidationError::NotAnInteger { field, value: value.to_string() });
    }
    U256::from_str_radix(value, 10)
        .map_err(|_| SchemaValidationError::Overflow { field, value: value.to_string() })
}
