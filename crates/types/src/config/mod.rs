mod error;
pub use error::ConfigError;

pub mod env_utils;

use rentals_constants::{KnownChains, RentalsConstants};
use std::time::Duration;

/// Environment variable naming the chain to list on.
const CHAIN: &str = "RENTALS_CHAIN";
/// Environment variable overriding the listings service base URL.
const LISTINGS_URL: &str = "RENTALS_LISTINGS_URL";
/// Environment variable for the signing timeout, in seconds.
const SIGNING_TIMEOUT: &str = "RENTALS_SIGNING_TIMEOUT_SECS";
/// Environment variable for the submission timeout, in seconds.
const SUBMISSION_TIMEOUT: &str = "RENTALS_SUBMISSION_TIMEOUT_SECS";

/// Configuration for a listing flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalsConfig {
    /// Chain constants, including the listings service URL.
    constants: RentalsConstants,
    /// How long to wait for the wallet to sign.
    signing_timeout: Duration,
    /// How long to wait for the listings service to respond.
    submission_timeout: Duration,
}

impl Default for RentalsConfig {
    fn default() -> Self {
        Self::new(RentalsConstants::mainnet())
    }
}

impl RentalsConfig {
    /// Default wait for a wallet signature. Signing involves a human, so this
    /// is generous.
    pub const DEFAULT_SIGNING_TIMEOUT: Duration = Duration::from_secs(300);

    /// Default wait for the listings service.
    pub const DEFAULT_SUBMISSION_TIMEOUT: Duration = Duration::from_secs(30);

    /// Create a config for the given chain, with default timeouts.
    pub const fn new(constants: RentalsConstants) -> Self {
        Self {
            constants,
            signing_timeout: Self::DEFAULT_SIGNING_TIMEOUT,
            submission_timeout: Self::DEFAULT_SUBMISSION_TIMEOUT,
        }
    }

    /// Load the config from the environment.
    ///
    /// - `RENTALS_CHAIN`: known chain name, defaults to `mainnet`.
    /// - `RENTALS_LISTINGS_URL`: overrides the listings service base URL.
    /// - `RENTALS_SIGNING_TIMEOUT_SECS`: signing timeout.
    /// - `RENTALS_SUBMISSION_TIMEOUT_SECS`: submission timeout.
    pub fn from_env() -> Result<Self, ConfigError> {
        let chain = env_utils::load_string_opt(CHAIN)
            .map(|chain| chain.parse::<KnownChains>())
            .transpose()?
            .unwrap_or(KnownChains::Mainnet);

        let mut constants = RentalsConstants::for_chain(chain);
        if let Some(url) = env_utils::load_string_opt(LISTINGS_URL) {
            constants = constants.with_listings_api(url);
        }

        let mut config = Self::new(constants);
        if let Some(timeout) = env_utils::load_secs_opt(SIGNING_TIMEOUT)? {
            config = config.with_signing_timeout(timeout);
        }
        if let Some(timeout) = env_utils::load_secs_opt(SUBMISSION_TIMEOUT)? {
            config = config.with_submission_timeout(timeout);
        }
        Ok(config)
    }

    /// Set the signing timeout.
    pub const fn with_signing_timeout(mut self, timeout: Duration) -> Self {
        self.signing_timeout = timeout;
        self
    }

    /// Set the submission timeout.
    pub const fn with_submission_timeout(mut self, timeout: Duration) -> Self {
        self.submission_timeout = timeout;
        self
    }

    /// Get the chain constants.
    pub const fn constants(&self) -> &RentalsConstants {
        &self.constants
    }

    /// Get the chain id.
    pub const fn chain_id(&self) -> u64 {
        self.constants.chain_id()
    }

    /// Get the signing timeout.
    pub const fn signing_timeout(&self) -> Duration {
        self.signing_timeout
    }

    /// Get the submission timeout.
    pub const fn submission_timeout(&self) -> Duration {
        self.submission_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    // The only test that touches the process environment.
    #[test]
    fn loads_from_env() {
        let config = RentalsConfig::from_env().unwrap();
        assert_eq!(config, RentalsConfig::default());

        env::set_var(CHAIN, "test");
        env::set_var(LISTINGS_URL, "http://127.0.0.1:1234/v1/");
        env::set_var(SIGNING_TIMEOUT, "60");
        env::set_var(SUBMISSION_TIMEOUT, "5");

        let config = RentalsConfig::from_env().unwrap();
        assert_eq!(config.chain_id(), rentals_constants::test_utils::CHAIN_ID);
        assert_eq!(config.constants().listings_api(), "http://127.0.0.1:1234/v1/");
        assert_eq!(config.signing_timeout(), Duration::from_secs(60));
        assert_eq!(config.submission_timeout(), Duration::from_secs(5));

        env::set_var(SUBMISSION_TIMEOUT, "soon");
        assert!(matches!(RentalsConfig::from_env(), Err(ConfigError::Parse(_))));

        env::set_var(CHAIN, "goerli");
        assert!(matches!(RentalsConfig::from_env(), Err(ConfigError::Chain(_))));

        for key in [CHAIN, LISTINGS_URL, SIGNING_TIMEOUT, SUBMISSION_TIMEOUT] {
            env::remove_var(key);
        }
    }
}
