use crate::{utils::parse_uint256, PeriodTable, SchemaValidationError, TypedDataDocument};
use alloy::primitives::{Address, U256};
use rentals_constants::ContractIdentity;
use serde::{Deserialize, Serialize};

/// The three opaque `indexes` slots of a listing.
///
/// They are transported verbatim into the signed message, and re-expressed as
/// `nonces` when the listing is submitted.
pub type ListingIndexes = [u64; 3];

/// The largest `indexes` slot value, `2^53 - 1`. The message carries slots as
/// JSON numbers, which wallets parse as doubles.
pub const MAX_SAFE_INDEX: u64 = (1 << 53) - 1;

/// The NFT being listed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetIdentity {
    /// The NFT contract.
    contract_address: Address,
    /// The token id, as a decimal string.
    token_id: String,
}

impl AssetIdentity {
    /// Create a new asset identity. The token id is validated when the
    /// listing is built.
    pub fn new(contract_address: Address, token_id: impl Into<String>) -> Self {
        Self { contract_address, token_id: token_id.into() }
    }

    /// Get the NFT contract address.
    pub const fn contract_address(&self) -> Address {
        self.contract_address
    }

    /// Get the token id as a decimal string.
    pub fn token_id(&self) -> &str {
        &self.token_id
    }

    /// Parse the token id as a `uint256`.
    pub fn token_id_u256(&self) -> Result<U256, SchemaValidationError> {
        parse_uint256("tokenId", &self.token_id)
    }
}

/// Everything needed to produce one rental listing.
///
/// A `ListingIntent` is built fresh for every listing attempt. Nothing in it
/// is fetched lazily: building typed data from it is a pure function.
///
/// ```
/// # use alloy::primitives::Address;
/// # use rentals_constants::RentalsConstants;
/// # use rentals_types::{AssetIdentity, ListingIntent, PeriodTable};
/// let intent = ListingIntent::new(
///     Address::repeat_byte(0xaa),
///     AssetIdentity::new(Address::repeat_byte(0xbb), "42"),
///     RentalsConstants::mainnet().rentals().clone(),
///     1_681_966_800,
///     PeriodTable::uniform(&[1, 7, 30], "1000000000000000000").unwrap(),
/// )
/// .with_indexes([0, 0, 1]);
///
/// let doc = intent.typed_data().unwrap();
/// assert_eq!(doc.message().price_per_day().len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingIntent {
    signer: Address,
    asset: AssetIdentity,
    contract: ContractIdentity,
    /// Unix seconds.
    expiration: u64,
    periods: PeriodTable,
    indexes: ListingIndexes,
    /// Zero means any renter.
    target: Address,
}

impl ListingIntent {
    /// Create a new intent with zeroed indexes and no designated renter.
    pub const fn new(
        signer: Address,
        asset: AssetIdentity,
        contract: ContractIdentity,
        expiration: u64,
        periods: PeriodTable,
    ) -> Self {
        Self { signer, asset, contract, expiration, periods, indexes: [0; 3], target: Address::ZERO }
    }

    /// Set the `indexes` slots.
    pub fn with_indexes(self, indexes: ListingIndexes) -> Self {
        Self { indexes, ..self }
    }

    /// Restrict the listing to a single renter.
    pub fn with_target(self, target: Address) -> Self {
        Self { target, ..self }
    }

    /// Get the signer.
    pub const fn signer(&self) -> Address {
        self.signer
    }

    /// Get the asset being listed.
    pub const fn asset(&self) -> &AssetIdentity {
        &self.asset
    }

    /// Get the rentals contract identity.
    pub const fn contract(&self) -> &ContractIdentity {
        &self.contract
    }

    /// Get the expiration, in Unix seconds.
    pub const fn expiration(&self) -> u64 {
        self.expiration
    }

    /// Get the expiration, in Unix milliseconds.
    pub const fn expiration_millis(&self) -> Result<u64, SchemaValidationError> {
        match self.expiration.checked_mul(1000) {
            Some(millis) => Ok(millis),
            None => Err(SchemaValidationError::ExpirationOverflow(self.expiration)),
        }
    }

    /// True if the listing has expired at `timestamp` (Unix seconds).
    pub const fn is_expired(&self, timestamp: u64) -> bool {
        timestamp >= self.expiration
    }

    /// Get the period table.
    pub const fn periods(&self) -> &PeriodTable {
        &self.periods
    }

    /// Get the `indexes` slots.
    pub const fn indexes(&self) -> ListingIndexes {
        self.indexes
    }

    /// Get the `indexes` slots, failing if any is above [`MAX_SAFE_INDEX`].
    pub fn checked_indexes(&self) -> Result<ListingIndexes, SchemaValidationError> {
        match self.indexes.iter().find(|&&index| index > MAX_SAFE_INDEX) {
            Some(&index) => Err(SchemaValidationError::UnsafeIndex(index)),
            None => Ok(self.indexes),
        }
    }

    /// The `indexes` slots as decimal-string nonces, in slot order.
    pub fn nonces(&self) -> Vec<String> {
        self.indexes.iter().map(ToString::to_string).collect()
    }

    /// Get the designated renter. Zero means any renter.
    pub const fn target(&self) -> Address {
        self.target
    }

    /// Build the EIP-712 document for this intent, against its own rentals
    /// contract.
    pub fn typed_data(&self) -> Result<TypedDataDocument, SchemaValidationError> {
        TypedDataDocument::build(self, &self.contract)
    }
}
