//! Shared fixtures, mock collaborators and deterministic signers for testing
//! rental listing components.

pub mod fixtures;
pub mod mocks;
pub mod users;

pub use rentals_constants::test_utils as test_constants;

/// Install a `tracing` subscriber that writes to the test output, filtered by
/// `RUST_LOG`. Safe to call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
