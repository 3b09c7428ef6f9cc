use crate::{SignRequest, SigningProvider};
use alloy::primitives::Address;
use core::time::Duration;
use rentals_types::{ListingSignature, TypedDataDocument};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

/// Default time to wait for the wallet. Signing usually waits on a human.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

/// An error object returned by a wallet in place of a signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{message} (code {code})")]
pub struct WalletError {
    /// The JSON-RPC error code. 4001 means the user refused.
    #[serde(default)]
    pub code: i64,
    /// The error message.
    #[serde(default)]
    pub message: String,
    /// Additional error data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl WalletError {
    /// Interpret a JSON-RPC `error` member. Wallets that report bare strings
    /// or other shapes keep their text as the message.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(message) => Self { code: 0, message: message.clone(), data: None },
            Value::Object(_) => serde_json::from_value(value.clone())
                .unwrap_or_else(|_| Self { code: 0, message: value.to_string(), data: None }),
            other => Self { code: 0, message: other.to_string(), data: None },
        }
    }
}

/// Errors returned by the [`SigningCoordinator`].
#[derive(Debug, thiserror::Error)]
pub enum SigningError {
    /// The typed data could not be serialized.
    #[error("failed to serialize typed data: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The wallet refused or failed to sign.
    #[error("signature request rejected: {0}")]
    Rejected(#[source] Box<dyn core::error::Error + Send + Sync + 'static>),
    /// The wallet answered without a usable signature.
    #[error("malformed signature response: {0}")]
    MalformedResponse(String),
    /// The wallet did not answer in time.
    #[error("no signature within {0:?}")]
    Timeout(Duration),
    /// The request was cancelled while waiting for the wallet.
    #[error("signature request cancelled")]
    Cancelled,
}

impl SigningError {
    /// Wrap a provider or wallet error.
    pub fn rejected<E>(err: E) -> Self
    where
        E: core::error::Error + Send + Sync + 'static,
    {
        Self::Rejected(Box::new(err))
    }

    /// True if the wallet refused or failed to sign.
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// The wallet error object, if the wallet answered with one.
    pub fn wallet_error(&self) -> Option<&WalletError> {
        match self {
            Self::Rejected(err) => err.downcast_ref(),
            _ => None,
        }
    }
}

/// Obtains signatures over typed-data documents from a [`SigningProvider`].
///
/// Every call to [`sign`] dispatches exactly one request. Nothing is cached
/// and nothing is retried.
///
/// [`sign`]: Self::sign
#[derive(Debug, Clone)]
pub struct SigningCoordinator<P> {
    provider: P,
    timeout: Duration,
    cancel: Option<CancellationToken>,
}

impl<P> SigningCoordinator<P> {
    /// Create a new coordinator with the default timeout.
    pub const fn new(provider: P) -> Self {
        Self { provider, timeout: DEFAULT_TIMEOUT, cancel: None }
    }

    /// Set the time to wait for the wallet.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    /// Abandon pending requests when `token` is cancelled.
    pub fn with_cancellation(self, token: CancellationToken) -> Self {
        Self { cancel: Some(token), ..self }
    }

    /// Get the signing provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }

    /// Get the wallet timeout.
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl<P> SigningCoordinator<P>
where
    P: SigningProvider,
{
    /// Ask `signer` to sign `doc`.
    #[instrument(skip_all, fields(%signer))]
    pub async fn sign(
        &self,
        doc: &TypedDataDocument,
        signer: Address,
    ) -> Result<ListingSignature, SigningError> {
        let request = SignRequest::typed_data_v4(signer, doc)?;

        let response = self
            .dispatch(request)
            .await
            .inspect_err(|e| warn!(%e, "Signature request failed"))?;

        parse_response(response).inspect_err(|e| warn!(%e, "No signature obtained"))
    }

    async fn dispatch(&self, request: SignRequest) -> Result<Value, SigningError> {
        let request = tokio::time::timeout(self.timeout, self.provider.request(request));

        let outcome = match &self.cancel {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => return Err(SigningError::Cancelled),
                outcome = request => outcome,
            },
            None => request.await,
        };

        outcome.map_err(|_| SigningError::Timeout(self.timeout))?.map_err(SigningError::rejected)
    }
}

fn parse_response(response: Value) -> Result<ListingSignature, SigningError> {
    if let Some(error) = response.get("error").filter(|error| !error.is_null()) {
        return Err(SigningError::rejected(WalletError::from_value(error)));
    }

    let result = response
        .get("result")
        .ok_or_else(|| SigningError::MalformedResponse("missing result".to_string()))?;
    let hex = result
        .as_str()
        .ok_or_else(|| SigningError::MalformedResponse(format!("result is not a string: {result}")))?;
    let signature = ListingSignature::from_hex(hex)
        .map_err(|e| SigningError::MalformedResponse(format!("result is not hex: {e}")))?;

    if signature.is_empty() {
        return Err(SigningError::MalformedResponse("empty signature".to_string()));
    }
    debug!(len = signature.as_bytes().len(), "Signature obtained");
    Ok(signature)
}
