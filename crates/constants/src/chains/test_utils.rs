//! Constants for a local test chain.

use crate::{ContractIdentity, Network, RentalsConstants};
use alloy::primitives::Address;
use std::borrow::Cow;

/// Test chain id.
pub const CHAIN_ID: u64 = 31337;
/// Symbolic network name for the test chain.
pub const NETWORK: Network = Network::Ethereum;

/// EIP-712 domain name of the test `Rentals` contract.
pub const RENTALS_NAME: &str = "Rentals";
/// EIP-712 domain version of the test `Rentals` contract.
pub const RENTALS_VERSION: &str = "1";
/// Test address for the `Rentals` contract.
pub const RENTALS_ADDRESS: Address = Address::repeat_byte(0x11);

/// Test address for an NFT contract.
pub const NFT_ADDRESS: Address = Address::repeat_byte(0x22);

/// Identity of the test `Rentals` contract.
pub const RENTALS: ContractIdentity = ContractIdentity::new(
    Cow::Borrowed(RENTALS_NAME),
    RENTALS_ADDRESS,
    Cow::Borrowed(RENTALS_VERSION),
    CHAIN_ID,
);

/// The URL of a local listings service.
pub const LISTINGS_API_URL: &str = "http://localhost:8080/v1/";

/// Rental constants for unit tests.
pub const TEST: RentalsConstants =
    RentalsConstants::new(NETWORK, RENTALS, Cow::Borrowed(LISTINGS_API_URL));
