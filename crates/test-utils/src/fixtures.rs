//! The reference listing: a single LAND listed on mainnet for seven
//! fixed-length periods at just under one MANA per day.

use crate::mocks::{MockAccountProvider, MockChannel, MockSigningProvider};
use alloy::primitives::{address, Address};
use rentals_constants::{mainnet, test_utils, RentalsConstants};
use rentals_signer::{ListingSender, ListingTerms};
use rentals_types::{AssetIdentity, ListingIndexes, ListingIntent, PeriodTable, RentalsConfig};

/// The reference NFT contract.
pub const REFERENCE_NFT: Address = address!("0xf87e31492faf9a91b02ee0deaad50d51d56d5d4d");

/// The reference token id.
pub const REFERENCE_TOKEN_ID: &str =
    "115792089237316195423570985008687907810734688800523256106535758078942103207859";

/// The reference expiration, in Unix seconds.
pub const REFERENCE_EXPIRATION: u64 = 1_681_966_800;

/// The reference `indexes` slots.
pub const REFERENCE_INDEXES: ListingIndexes = [0, 0, 1];

/// The reference price per day.
pub const REFERENCE_PRICE: &str = "999999999999999999";

/// The reference period lengths, in days.
pub const REFERENCE_DAYS: [u64; 7] = [1, 7, 30, 60, 90, 180, 365];

/// The reference period table.
pub fn reference_periods() -> PeriodTable {
    PeriodTable::uniform(&REFERENCE_DAYS, REFERENCE_PRICE).unwrap()
}

/// The reference asset.
pub fn reference_asset() -> AssetIdentity {
    AssetIdentity::new(REFERENCE_NFT, REFERENCE_TOKEN_ID)
}

/// The reference listing terms.
pub fn reference_terms() -> ListingTerms {
    ListingTerms::new(reference_asset(), REFERENCE_EXPIRATION, reference_periods())
        .with_indexes(REFERENCE_INDEXES)
}

/// The reference listing, signed by `signer` against the mainnet rentals
/// contract.
pub fn reference_intent(signer: Address) -> ListingIntent {
    ListingIntent::new(
        signer,
        reference_asset(),
        mainnet::RENTALS,
        REFERENCE_EXPIRATION,
        reference_periods(),
    )
    .with_indexes(REFERENCE_INDEXES)
}

/// A config for the local test chain.
pub fn test_config() -> RentalsConfig {
    RentalsConfig::new(RentalsConstants::test())
}

/// A [`ListingSender`] for the local test chain over mock collaborators.
pub fn mock_sender(
    accounts: MockAccountProvider,
    signing: MockSigningProvider,
    channel: MockChannel,
) -> ListingSender<MockAccountProvider, MockSigningProvider, MockChannel> {
    ListingSender::from_config(accounts, signing, channel, &test_config()).unwrap()
}

/// The listings endpoint of the local test chain.
pub fn test_listings_endpoint() -> String {
    format!("{}rentals-listings", test_utils::LISTINGS_API_URL)
}
