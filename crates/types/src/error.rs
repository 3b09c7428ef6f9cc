/// An error that can occur when constructing a rental period or a period
/// table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidPeriodError {
    /// The minimum rental duration exceeds the maximum.
    #[error("min days {min_days} exceeds max days {max_days}")]
    DayRange {
        /// Minimum rental duration.
        min_days: u64,
        /// Maximum rental duration.
        max_days: u64,
    },
    /// The price is not a non-negative decimal integer.
    #[error("price per day {0:?} is not a non-negative decimal integer")]
    Price(String),
    /// The table has no periods.
    #[error("at least one rental period is required")]
    Empty,
}

/// An error that can occur when a value cannot be represented with the width
/// its typed-data field declares.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaValidationError {
    /// The value is not a decimal integer.
    #[error("{field} value {value:?} is not a decimal integer")]
    NotAnInteger {
        /// The typed-data field.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// The value exceeds `2^256 - 1`.
    #[error("{field} value {value} does not fit in a uint256")]
    Overflow {
        /// The typed-data field.
        field: &'static str,
        /// The offending value.
        value: String,
    },
    /// The expiration cannot be expressed in milliseconds.
    #[error("expiration {0} overflows when converted to milliseconds")]
    ExpirationOverflow(u64),
    /// An `indexes` slot is above [`MAX_SAFE_INDEX`] and would not survive a
    /// wallet's JSON number parsing.
    ///
    /// [`MAX_SAFE_INDEX`]: crate::MAX_SAFE_INDEX
    #[error("index {0} exceeds the largest integer a JSON number can carry exactly")]
    UnsafeIndex(u64),
}

/// An error converting a [`TypedDataDocument`] into alloy typed data.
///
/// [`TypedDataDocument`]: crate::TypedDataDocument
#[derive(Debug, thiserror::Error)]
pub enum TypedDataError {
    /// The document could not be converted through JSON.
    #[error("failed to convert typed data: {0}")]
    Json(#[from] serde_json::Error),
    /// The typed data could not be EIP-712 encoded.
    #[error("failed to encode typed data: {0}")]
    Eip712(#[from] alloy::dyn_abi::Error),
}

/// An error recovering the signer of a [`ListingSignature`].
///
/// [`ListingSignature`]: crate::ListingSignature
#[derive(Debug, thiserror::Error)]
pub enum SignatureError {
    /// The signed document could not be hashed.
    #[error(transparent)]
    TypedData(#[from] TypedDataError),
    /// The signature is not a recoverable ECDSA signature.
    #[error("invalid signature: {0}")]
    Signature(#[from] alloy::primitives::SignatureError),
}
