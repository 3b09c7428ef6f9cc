//! Signed fetch: request authentication for Decentraland services.
//!
//! A signed request carries an auth chain as numbered `x-identity-auth-chain-N`
//! headers. Each link is a JSON object with a `type`, a `payload` and a
//! `signature`. The simplest chain, produced here, has two links: a `SIGNER`
//! link naming the account, and an `ECDSA_SIGNED_ENTITY` link whose payload
//! is the request fingerprint signed by that account with `personal_sign`.
//!
//! The fingerprint is `method:path:timestamp:metadata`, lower-cased, where
//! the timestamp is in Unix milliseconds and is also sent as
//! `x-identity-timestamp`.

use crate::{HttpChannel, HttpRequest, HttpResponse};
use alloy::signers::Signer;
use chrono::Utc;
use reqwest::header::{HeaderName, HeaderValue, InvalidHeaderValue};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Headers carrying the auth chain links, in chain order.
pub const AUTH_CHAIN_HEADERS: [&str; 2] = ["x-identity-auth-chain-0", "x-identity-auth-chain-1"];
/// Header carrying the signing timestamp, in Unix milliseconds.
pub const TIMESTAMP_HEADER: &str = "x-identity-timestamp";
/// Header carrying the signed metadata.
pub const METADATA_HEADER: &str = "x-identity-metadata";

/// The kind of an [`AuthLink`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthLinkType {
    /// Names the account at the root of the chain. Unsigned.
    #[serde(rename = "SIGNER")]
    Signer,
    /// A payload signed by the previous link's account.
    #[serde(rename = "ECDSA_SIGNED_ENTITY")]
    EcdsaSignedEntity,
}

/// One link of an auth chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthLink {
    /// The link kind.
    #[serde(rename = "type")]
    pub kind: AuthLinkType,
    /// The link payload.
    pub payload: String,
    /// Hex signature over the payload, empty for `SIGNER` links.
    pub signature: String,
}

/// Errors returned by [`SignedFetch`].
#[derive(Debug, thiserror::Error)]
pub enum SignedFetchError<E> {
    /// The account refused or failed to sign the request.
    #[error("failed to sign request: {0}")]
    Signer(#[from] alloy::signers::Error),
    /// The auth chain could not be encoded into headers.
    #[error("failed to encode auth headers: {0}")]
    Header(#[from] InvalidHeaderValue),
    /// The auth chain could not be serialized.
    #[error("failed to encode auth chain: {0}")]
    Json(#[from] serde_json::Error),
    /// The inner channel failed.
    #[error(transparent)]
    Channel(E),
}

/// An [`HttpChannel`] that authenticates every request with a signed fetch
/// auth chain before handing it to the inner channel.
#[derive(Debug, Clone)]
pub struct SignedFetch<S, C = reqwest::Client> {
    signer: S,
    inner: C,
    metadata: String,
}

impl<S> SignedFetch<S> {
    /// Create a signed fetch channel over a new reqwest client.
    pub fn new(signer: S) -> Self {
        Self::new_with_channel(signer, reqwest::Client::new())
    }
}

impl<S, C> SignedFetch<S, C> {
    /// Create a signed fetch channel over the given channel.
    pub fn new_with_channel(signer: S, inner: C) -> Self {
        Self { signer, inner, metadata: "{}".to_string() }
    }

    /// Set the metadata signed alongside each request.
    pub fn with_metadata(self, metadata: impl Into<String>) -> Self {
        Self { metadata: metadata.into(), ..self }
    }

    /// Get the signer.
    pub const fn signer(&self) -> &S {
        &self.signer
    }

    /// Get the inner channel.
    pub const fn inner(&self) -> &C {
        &self.inner
    }

    /// Get the metadata signed alongside each request.
    pub fn metadata(&self) -> &str {
        &self.metadata
    }
}

/// The request fingerprint signed by the account.
pub fn fingerprint(method: &str, path: &str, timestamp: i64, metadata: &str) -> String {
    format!("{method}:{path}:{timestamp}:{metadata}").to_lowercase()
}

impl<S, C> SignedFetch<S, C>
where
    S: Signer + Send + Sync,
{
    /// Build the auth chain for a request to `path`, signed at `timestamp`.
    pub async fn auth_chain(
        &self,
        path: &str,
        timestamp: i64,
    ) -> Result<[AuthLink; 2], alloy::signers::Error> {
        let payload = fingerprint("post", path, timestamp, &self.metadata);
        let signature = self.signer.sign_message(payload.as_bytes()).await?;

        Ok([
            AuthLink {
                kind: AuthLinkType::Signer,
                payload: format!("{:#x}", self.signer.address()),
                signature: String::new(),
            },
            AuthLink {
                kind: AuthLinkType::EcdsaSignedEntity,
                payload,
                signature: alloy::hex::encode_prefixed(signature.as_bytes()),
            },
        ])
    }

    async fn authenticate(
        &self,
        mut request: HttpRequest,
    ) -> Result<HttpRequest, SignedFetchError<C::Error>>
    where
        C: HttpChannel,
    {
        let timestamp = Utc::now().timestamp_millis();
        let chain = self.auth_chain(request.url().path(), timestamp).await?;

        let headers = request.headers_mut();
        for (name, link) in AUTH_CHAIN_HEADERS.into_iter().zip(chain.iter()) {
            headers.insert(
                HeaderName::from_static(name),
                HeaderValue::from_str(&serde_json::to_string(link)?)?,
            );
        }
        headers.insert(TIMESTAMP_HEADER, HeaderValue::from_str(&timestamp.to_string())?);
        headers.insert(METADATA_HEADER, HeaderValue::from_str(&self.metadata)?);

        Ok(request)
    }
}

impl<S, C> HttpChannel for SignedFetch<S, C>
where
    S: Signer + Send + Sync,
    C: HttpChannel + Send + Sync,
{
    type Error = SignedFetchError<C::Error>;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        let request = self
            .authenticate(request)
            .await
            .inspect_err(|e| warn!(%e, "Failed to authenticate request. Not sending."))?;
        self.inner.send(request).await.map_err(SignedFetchError::Channel)
    }
}
