//! Rental listing types.
//!
//! A rental listing is an off-chain, EIP-712 signed offer to rent out an NFT.
//! This crate contains the pieces that are pure data: the [`PeriodTable`] of
//! rental offers, the [`ListingIntent`] aggregating everything a listing
//! needs, the [`TypedDataDocument`] derived from it, and the
//! [`ListingSignature`] produced by signing that document.

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
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod config;
pub use config::{env_utils, ConfigError, RentalsConfig};

mod error;
pub use error::{InvalidPeriodError, SchemaValidationError, SignatureError, TypedDataError};

mod intent;
pub use intent::{AssetIdentity, ListingIndexes, ListingIntent, MAX_SAFE_INDEX};

mod periods;
pub use periods::{PeriodTable, RentalPeriod};

mod signature;
pub use signature::ListingSignature;

mod typed_data;
pub use typed_data::{
    ListingDomain, ListingMessage, ListingTypes, TypedDataDocument, TypedField,
    EIP712_DOMAIN_TYPE, LISTING_PRIMARY_TYPE, LISTING_TYPE,
};

mod utils;
