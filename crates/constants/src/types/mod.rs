mod chains;
pub use chains::{KnownChains, ParseChainError};

mod contract;
pub use contract::{ContractIdentity, ContractName, ParseContractNameError};

mod network;
pub use network::{Network, ParseNetworkError};

use std::{borrow::Cow, str::FromStr};

/// Rental constants for a single chain.
///
/// These are the values a listing flow needs that vary between chains: the
/// rentals contract used as the EIP-712 verifying contract, the symbolic
/// network name the listings service expects, and the base URL of the
/// listings service itself.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalsConstants {
    /// Symbolic network name.
    network: Network,
    /// The rentals contract.
    rentals: ContractIdentity,
    /// Base URL of the listings service.
    listings_api: Cow<'static, str>,
}

impl RentalsConstants {
    /// Create a new set of constants.
    pub const fn new(
        network: Network,
        rentals: ContractIdentity,
        listings_api: Cow<'static, str>,
    ) -> Self {
        Self { network, rentals, listings_api }
    }

    /// Get the hard-coded mainnet constants.
    pub const fn mainnet() -> Self {
        crate::chains::mainnet::MAINNET
    }

    /// Get the hard-coded local test constants.
    #[cfg(any(test, feature = "test-utils"))]
    pub const fn test() -> Self {
        crate::chains::test_utils::TEST
    }

    /// Get the constants for a known chain.
    pub const fn for_chain(chain: KnownChains) -> Self {
        match chain {
            KnownChains::Mainnet => Self::mainnet(),
            #[cfg(any(test, feature = "test-utils"))]
            KnownChains::Test => Self::test(),
        }
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.rentals.chain_id()
    }

    /// Get the symbolic network name.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Get the rentals contract identity.
    pub const fn rentals(&self) -> &ContractIdentity {
        &self.rentals
    }

    /// Get the listings service base URL.
    pub fn listings_api(&self) -> &str {
        &self.listings_api
    }

    /// Override the listings service base URL.
    pub fn with_listings_api(self, listings_api: impl Into<Cow<'static, str>>) -> Self {
        Self { listings_api: listings_api.into(), ..self }
    }
}

impl FromStr for RentalsConstants {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<KnownChains>().map(Self::for_chain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn mainnet_constants() {
        let constants: RentalsConstants = "mainnet".parse().unwrap();
        assert_eq!(constants.chain_id(), 1);
        assert_eq!(constants.network(), Network::Ethereum);
        assert_eq!(constants.rentals().name(), "Rentals");
        assert_eq!(constants.rentals().version(), "1");
        assert_eq!(
            constants.rentals().address(),
            address!("0x3a1469499d0be105d4f77045ca403a5f6dc2f3f5")
        );
        assert_eq!(constants.listings_api(), "https://signatures-api.decentraland.org/v1/");
    }

    #[test]
    fn override_listings_api() {
        let constants = RentalsConstants::test().with_listings_api("http://127.0.0.1:9000/v1/");
        assert_eq!(constants.listings_api(), "http://127.0.0.1:9000/v1/");
        assert_eq!(constants.rentals(), &crate::test_utils::RENTALS);
    }
}
