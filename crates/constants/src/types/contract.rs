use alloy::primitives::{Address, U256};
use std::{borrow::Cow, fmt, str::FromStr};

/// Error type for parsing a [`ContractName`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown contract name {0}")]
pub struct ParseContractNameError(String);

/// Names of the contracts a listing flow may need to resolve.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ContractName {
    /// The rentals escrow contract. It is the EIP-712 verifying contract for
    /// listings.
    Rentals,
}

impl ContractName {
    /// The registry name of the contract.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rentals => "Rentals",
        }
    }
}

impl fmt::Display for ContractName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContractName {
    type Err = ParseContractNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Rentals" | "rentals" => Ok(Self::Rentals),
            _ => Err(ParseContractNameError(s.to_string())),
        }
    }
}

/// The identity of a deployed contract, used for EIP-712 domain separation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractIdentity {
    /// EIP-712 domain name.
    name: Cow<'static, str>,
    /// Deployed address.
    address: Address,
    /// EIP-712 domain version.
    version: Cow<'static, str>,
    /// Chain the contract is deployed on.
    chain_id: u64,
}

impl ContractIdentity {
    /// Create a new contract identity.
    pub const fn new(
        name: Cow<'static, str>,
        address: Address,
        version: Cow<'static, str>,
        chain_id: u64,
    ) -> Self {
        Self { name, address, version, chain_id }
    }

    /// Get the EIP-712 domain name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the contract address.
    pub const fn address(&self) -> Address {
        self.address
    }

    /// Get the EIP-712 domain version.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the chain ID.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }

    /// Get the chain ID as a [`U256`].
    pub fn chain_id_u256(&self) -> U256 {
        U256::from(self.chain_id)
    }
}
