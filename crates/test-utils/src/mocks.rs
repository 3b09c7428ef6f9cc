//! Mock implementations of the listing flow's collaborators.
//!
//! Every mock records what it was asked to do, so tests can assert on call
//! counts and on the exact requests that were dispatched.

use alloy::{
    primitives::Address,
    providers::{Provider, ProviderBuilder},
    transports::mock::Asserter,
};
use rentals_api::{HttpChannel, HttpRequest, HttpResponse};
use rentals_signer::{AccountProvider, ProviderWallet, SignRequest, SigningProvider};
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc, Mutex,
};

/// An error produced by a mock collaborator.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct MockError(pub String);

/// A mock [`AccountProvider`] that reports a fixed account.
#[derive(Debug, Clone, Default)]
pub struct MockAccountProvider {
    address: Option<Address>,
    calls: Arc<AtomicUsize>,
}

impl MockAccountProvider {
    /// Create a provider reporting `address`.
    pub fn new(address: Address) -> Self {
        Self { address: Some(address), calls: Default::default() }
    }

    /// Create a provider with no connected account.
    pub fn disconnected() -> Self {
        Self::default()
    }

    /// Number of times the address was requested.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl AccountProvider for MockAccountProvider {
    type Error = MockError;

    async fn signer_address(&self) -> Result<Address, Self::Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.address.ok_or_else(|| MockError("no account connected".to_string()))
    }
}

/// A mock [`SigningProvider`] that answers every request the same way.
#[derive(Debug, Clone)]
pub struct MockSigningProvider {
    response: Result<Value, MockError>,
    requests: Arc<Mutex<Vec<SignRequest>>>,
}

impl MockSigningProvider {
    /// Answer with a `result` carrying `signature`.
    pub fn signing(signature: &str) -> Self {
        Self::responding(json!({ "jsonrpc": "2.0", "id": 1, "result": signature }))
    }

    /// Answer with a JSON-RPC `error` object.
    pub fn rejecting(code: i64, message: &str) -> Self {
        Self::responding(json!({
            "jsonrpc": "2.0",
            "id": 1,
            "error": { "code": code, "message": message },
        }))
    }

    /// Answer with an arbitrary response object.
    pub fn responding(response: Value) -> Self {
        Self { response: Ok(response), requests: Default::default() }
    }

    /// Fail every request without answering.
    pub fn failing(message: &str) -> Self {
        Self { response: Err(MockError(message.to_string())), requests: Default::default() }
    }

    /// Get all dispatched requests.
    pub fn requests(&self) -> Vec<SignRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of dispatched requests.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl SigningProvider for MockSigningProvider {
    type Error = MockError;

    async fn request(&self, request: SignRequest) -> Result<Value, Self::Error> {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}

/// A mock [`HttpChannel`] that answers every request the same way.
#[derive(Debug, Clone)]
pub struct MockChannel {
    response: Result<HttpResponse, MockError>,
    requests: Arc<Mutex<Vec<HttpRequest>>>,
}

impl MockChannel {
    /// Answer with `status` and a raw body.
    pub fn respond(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            response: Ok(HttpResponse::new(status, body.into())),
            requests: Default::default(),
        }
    }

    /// Answer with `status` and a JSON body.
    pub fn json(status: StatusCode, body: &Value) -> Self {
        Self::respond(status, body.to_string())
    }

    /// Fail every request without a response.
    pub fn unreachable(message: &str) -> Self {
        Self { response: Err(MockError(message.to_string())), requests: Default::default() }
    }

    /// Get all sent requests.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of sent requests.
    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl HttpChannel for MockChannel {
    type Error = MockError;

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, Self::Error> {
        self.requests.lock().unwrap().push(request);
        self.response.clone()
    }
}

/// Create a [`ProviderWallet`] over a mocked JSON-RPC transport. Responses are
/// pushed to the returned [`Asserter`].
pub fn mock_provider_wallet() -> (ProviderWallet<impl Provider + Clone>, Asserter) {
    let asserter = Asserter::new();
    let provider = ProviderBuilder::new().connect_mocked_client(asserter.clone());
    (ProviderWallet::new(provider), asserter)
}
