//! Rental listing signing.
//!
//! Signatures are requested from a wallet with `eth_signTypedData_v4` through
//! a [`SigningProvider`], and the signing account is named by an
//! [`AccountProvider`]. The [`SigningCoordinator`] turns wallet responses into
//! [`ListingSignature`]s, and the [`ListingSender`] runs the whole listing
//! flow: resolve, build, sign, submit.
//!
//! [`ListingSignature`]: rentals_types::ListingSignature

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

mod coordinator;
pub use coordinator::{SigningCoordinator, SigningError, WalletError};

mod impls;
pub use impls::{LocalWallet, ProviderWallet, ProviderWalletError};

mod sender;
pub use sender::{ListingError, ListingSender, ListingTerms, SignedListing};

mod traits;
pub use traits::{
    AccountProvider, SignRequest, SigningProvider, SIGN_REQUEST_ID, SIGN_TYPED_DATA_V4,
};
