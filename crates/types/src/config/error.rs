use rentals_constants::ParseChainError;

/// Error type for [`crate::config`] module. Captures errors related to loading
/// configuration from the environment or other sources.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Error parsing environment variable
    #[error("failed to parse environment variable: {0}")]
    Parse(#[from] std::num::ParseIntError),
    /// Error parsing a chain name
    #[error(transparent)]
    Chain(#[from] ParseChainError),
}
