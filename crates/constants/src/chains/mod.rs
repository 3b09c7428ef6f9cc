/// Ethereum mainnet constants.
pub mod mainnet;

/// Test utilities for chains.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
