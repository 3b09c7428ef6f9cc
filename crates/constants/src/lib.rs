//! Rental listing constants.
//!
//! This crate contains the per-chain constants needed to produce rental
//! listings: the identity of the rentals contract used for EIP-712 domain
//! separation, the symbolic network name expected by the listings service,
//! and the listings service URL. It also exposes the [`ContractRegistry`]
//! lookup used to resolve contract identities by name and chain id.

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod chains;
pub use chains::mainnet;
#[cfg(any(test, feature = "test-utils"))]
pub use chains::test_utils;

mod registry;
pub use registry::{ContractRegistry, RegistryError, StaticRegistry};

mod types;
pub use types::{
    ContractIdentity, ContractName, KnownChains, Network, ParseChainError, ParseContractNameError,
    ParseNetworkError, RentalsConstants,
};
