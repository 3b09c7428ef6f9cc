use std::str::FromStr;

/// The list of known chains as a string.
const KNOWN_CHAINS: &str = "mainnet, test";

/// Error type for parsing struct from a chain name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseChainError {
    /// The chain name is not supported.
    #[error("chain name {0} is not parseable. supported chains: {KNOWN_CHAINS}")]
    ChainNotSupported(String),
}

/// Known chains with a deployed rentals contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum KnownChains {
    /// Ethereum mainnet.
    Mainnet,
    /// Test chain.
    #[cfg(any(test, feature = "test-utils"))]
    Test,
}

impl KnownChains {
    /// Get the chain id.
    pub const fn chain_id(&self) -> u64 {
        match self {
            Self::Mainnet => crate::mainnet::CHAIN_ID,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test => crate::test_utils::CHAIN_ID,
        }
    }

    /// All known chains.
    pub const fn all() -> &'static [Self] {
        &[
            Self::Mainnet,
            #[cfg(any(test, feature = "test-utils"))]
            Self::Test,
        ]
    }
}

impl FromStr for KnownChains {
    type Err = ParseChainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            #[cfg(any(test, feature = "test-utils"))]
            "test" => Ok(Self::Test),
            "mainnet" | "ethereum" => Ok(Self::Mainnet),
            _ => Err(ParseChainError::ChainNotSupported(s)),
        }
    }
}
