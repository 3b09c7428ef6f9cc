//! Listings service types and client.
//!
//! Signed rental listings are submitted to the listings service with a single
//! authenticated `POST`. The [`ListingSubmitter`] builds the
//! [`ListingPayload`] from a listing intent and its signature, sends it over
//! an [`HttpChannel`], and interprets the response.

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

mod auth;
pub use auth::{
    fingerprint, AuthLink, AuthLinkType, SignedFetch, SignedFetchError, AUTH_CHAIN_HEADERS,
    METADATA_HEADER, TIMESTAMP_HEADER,
};

mod channel;
pub use channel::{HttpChannel, HttpRequest, HttpResponse};

mod error;
pub use error::SubmissionError;

mod payload;
pub use payload::ListingPayload;

mod submitter;
pub use submitter::{ListingSubmitter, SubmissionResult, RENTALS_LISTINGS};
