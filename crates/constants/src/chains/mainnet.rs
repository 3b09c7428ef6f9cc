//! Constants for Ethereum mainnet.

use crate::{ContractIdentity, Network, RentalsConstants};
use alloy::primitives::{address, Address};
use std::borrow::Cow;

/// Chain ID for Ethereum mainnet.
pub const CHAIN_ID: u64 = 1;
/// Symbolic network name used by the listings service.
pub const NETWORK: Network = Network::Ethereum;

/// EIP-712 domain name of the `Rentals` contract.
pub const RENTALS_NAME: &str = "Rentals";
/// EIP-712 domain version of the `Rentals` contract.
pub const RENTALS_VERSION: &str = "1";
/// `Rentals` contract address on mainnet.
pub const RENTALS_ADDRESS: Address = address!("0x3a1469499d0be105d4f77045ca403a5f6dc2f3f5");

/// Identity of the mainnet `Rentals` contract.
pub const RENTALS: ContractIdentity = ContractIdentity::new(
    Cow::Borrowed(RENTALS_NAME),
    RENTALS_ADDRESS,
    Cow::Borrowed(RENTALS_VERSION),
    CHAIN_ID,
);

/// Base URL of the signatures API. Endpoint paths are joined onto it.
pub const LISTINGS_API_URL: &str = "https://signatures-api.decentraland.org/v1/";

/// Rental constants for mainnet.
pub const MAINNET: RentalsConstants =
    RentalsConstants::new(NETWORK, RENTALS, Cow::Borrowed(LISTINGS_API_URL));
