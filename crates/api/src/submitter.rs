use crate::{HttpChannel, HttpRequest, HttpResponse, ListingPayload, SubmissionError};
use core::time::Duration;
use rentals_constants::{mainnet, Network, RentalsConstants};
use rentals_types::{ListingIntent, ListingSignature};
use reqwest::{StatusCode, Url};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// The listings endpoint, relative to the signatures API base URL.
pub const RENTALS_LISTINGS: &str = "rentals-listings";

/// Default time to wait for the listings service.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A listing accepted by the listings service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionResult {
    status: StatusCode,
    body: Value,
}

impl SubmissionResult {
    /// Get the response status.
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Get the response body, unchanged.
    pub const fn body(&self) -> &Value {
        &self.body
    }

    /// Take the response body.
    pub fn into_body(self) -> Value {
        self.body
    }
}

/// Submits signed listings to the listings service.
///
/// Each call to [`submit`] sends exactly one `POST`. Nothing is retried:
/// rejected or failed submissions are reported to the caller.
///
/// [`submit`]: Self::submit
#[derive(Debug, Clone)]
pub struct ListingSubmitter<C = reqwest::Client> {
    /// The signatures API base URL.
    url: Url,
    /// The network reported in payloads.
    network: Network,
    /// The channel used to send requests.
    channel: C,
    timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl ListingSubmitter {
    /// Submit to the mainnet listings service with a new reqwest client.
    pub fn mainnet() -> Result<Self, url::ParseError> {
        Self::new(reqwest::Client::new(), &mainnet::MAINNET)
    }
}

impl<C> ListingSubmitter<C> {
    /// Create a submitter for the listings service of the given constants.
    pub fn new(channel: C, constants: &RentalsConstants) -> Result<Self, url::ParseError> {
        let url = Url::parse(constants.listings_api())?;
        Ok(Self::new_with_url(channel, url, constants.network()))
    }

    /// Create a submitter for the listings service at `url`.
    pub const fn new_with_url(channel: C, url: Url, network: Network) -> Self {
        Self { url, network, channel, timeout: DEFAULT_TIMEOUT, cancel: None }
    }

    /// Set the time to wait for the listings service.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Abandon pending submissions when `token` is cancelled.
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self { cancel: Some(token), ..self }
    }

    /// Get the base URL.
    pub const fn url(&self) -> &Url {
        &self.url
    }

    /// Get the network reported in payloads.
    pub const fn network(&self) -> Network {
        self.network
    }

    /// Get the channel.
    pub const fn channel(&self) -> &C {
        &self.channel
    }

    /// Get the response timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<C> ListingSubmitter<C>
where
    C: HttpChannel,
{
    /// Submit a signed listing.
    #[instrument(skip_all, fields(token_id = %intent.asset().token_id()))]
    pub async fn submit(
        &self,
        intent: &ListingIntent,
        signature: &ListingSignature,
    ) -> Result<SubmissionResult, SubmissionError> {
        let payload = ListingPayload::new(intent, self.network, signature.clone())
            .inspect_err(|e| warn!(%e, "Invalid listing. Not submitting."))?;
        self.submit_payload(&payload).await
    }

    /// Submit a prepared payload.
    #[instrument(skip_all)]
    pub async fn submit_payload(
        &self,
        payload: &ListingPayload,
    ) -> Result<SubmissionResult, SubmissionError> {
        let url = self.url.join(RENTALS_LISTINGS).map_err(SubmissionError::transport)?;
        let request = HttpRequest::post_json(url, payload.to_vec()?);

        let response = self
            .dispatch(request)
            .await
            .inspect_err(|e| warn!(%e, "Failed to reach listings service"))?;

        interpret(response).inspect_err(|e| warn!(%e, "Listing not accepted"))
    }

    async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse, SubmissionError> {
        let send = tokio::time::timeout(self.timeout, self.channel.send(request));

        let outcome = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(SubmissionError::Cancelled),
                outcome = send => outcome,
            },
            None => send.await,
        };

        outcome
            .map_err(|_| SubmissionError::Timeout(self.timeout))?
            .map_err(SubmissionError::transport)
    }
}

fn interpret(response: HttpResponse) -> Result<SubmissionResult, SubmissionError> {
    let status = response.status();

    if !status.is_success() {
        let body = serde_json::from_slice::<Value>(response.body()).ok();
        let reason = body
            .as_ref()
            .and_then(rejection_reason)
            .unwrap_or_else(|| String::from_utf8_lossy(response.body()).into_owned());
        return Err(SubmissionError::Rejected { status, reason, body });
    }

    let body = serde_json::from_slice(response.body())
        .map_err(|source| SubmissionError::MalformedResponse { status, source })?;
    debug!(%status, "Listing accepted");
    Ok(SubmissionResult { status, body })
}

/// The service reports failures as `{"error": ...}`, or `{"message": ...}`
/// from its framework.
fn rejection_reason(body: &Value) -> Option<String> {
    body.get("error").or_else(|| body.get("message")).and_then(Value::as_str).map(str::to_owned)
}
