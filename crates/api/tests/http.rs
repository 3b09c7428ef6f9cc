//! Tests against an in-process listings service.
use alloy::primitives::Signature;
use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use rentals_api::{
    AuthLink, AuthLinkType, ListingSubmitter, SignedFetch, SubmissionError, RENTALS_LISTINGS,
};
use rentals_constants::{test_utils::TEST, Network};
use rentals_test_utils::{fixtures::reference_intent, init_tracing, users::TEST_SIGNERS};
use rentals_types::ListingSignature;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

#[derive(Clone, Default)]
struct Service {
    received: Arc<Mutex<Vec<(HeaderMap, Value)>>>,
}

impl Service {
    fn received(&self) -> Vec<(HeaderMap, Value)> {
        self.received.lock().unwrap().clone()
    }
}

async fn listings(
    State(service): State<Service>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let duplicate = service.received.lock().unwrap().iter().any(|(_, seen)| seen == &body);
    service.received.lock().unwrap().push((headers, body));

    if duplicate {
        (StatusCode::BAD_REQUEST, Json(json!({ "ok": false, "error": "nonce already used" })))
    } else {
        (StatusCode::CREATED, Json(json!({ "ok": true, "data": { "status": "open" } })))
    }
}

/// Serve the listings endpoint on an ephemeral port and return its base URL.
async fn serve(service: Service) -> reqwest::Url {
    let app = Router::new()
        .route(&format!("/v1/{RENTALS_LISTINGS}"), post(listings))
        .with_state(service);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
    format!("http://{addr}/v1/").parse().unwrap()
}

fn signature() -> ListingSignature {
    ListingSignature::from_hex("0x5151").unwrap()
}

#[tokio::test]
async fn reqwest_submission_round_trip() {
    init_tracing();
    let service = Service::default();
    let url = serve(service.clone()).await;
    let submitter = ListingSubmitter::new_with_url(reqwest::Client::new(), url, Network::Ethereum);
    let intent = reference_intent(TEST_SIGNERS[0].address());

    let result = submitter.submit(&intent, &signature()).await.unwrap();
    assert_eq!(result.status(), StatusCode::CREATED);
    assert_eq!(result.body()["ok"], true);

    let err = submitter.submit(&intent, &signature()).await.unwrap_err();
    assert_eq!(err.rejection_reason(), Some("nonce already used"));

    let received = service.received();
    assert_eq!(received.len(), 2);
    let (headers, body) = &received[0];
    assert_eq!(headers["content-type"], "application/json");
    assert_eq!(body["network"], "ETHEREUM");
    assert_eq!(body["expiration"], 1_681_966_800_000u64);
    assert_eq!(body["signature"], "0x5151");
    assert_eq!(body["periods"].as_array().unwrap().len(), 7);
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/v1/").parse().unwrap();
    let submitter = ListingSubmitter::new_with_url(reqwest::Client::new(), url, Network::Ethereum);
    let intent = reference_intent(TEST_SIGNERS[0].address());

    let err = submitter.submit(&intent, &signature()).await.unwrap_err();
    assert!(matches!(err, SubmissionError::Transport(_)));
}

#[tokio::test]
async fn signed_fetch_attaches_the_auth_chain() {
    init_tracing();
    let service = Service::default();
    let url = serve(service.clone()).await;
    let signer = TEST_SIGNERS[2].clone();
    let submitter = ListingSubmitter::new_with_url(
        SignedFetch::new(signer.clone()),
        url,
        TEST.network(),
    );

    submitter.submit(&reference_intent(signer.address()), &signature()).await.unwrap();

    let received = service.received();
    let (headers, _) = &received[0];

    let root: AuthLink =
        serde_json::from_slice(headers["x-identity-auth-chain-0"].as_bytes()).unwrap();
    assert_eq!(root.kind, AuthLinkType::Signer);
    assert_eq!(root.payload, format!("{:#x}", signer.address()));

    let entity: AuthLink =
        serde_json::from_slice(headers["x-identity-auth-chain-1"].as_bytes()).unwrap();
    assert_eq!(entity.kind, AuthLinkType::EcdsaSignedEntity);

    let timestamp = headers["x-identity-timestamp"].to_str().unwrap();
    assert_eq!(headers["x-identity-metadata"], "{}");
    assert_eq!(entity.payload, format!("post:/v1/rentals-listings:{timestamp}:{{}}"));

    let signature: Signature = entity.signature.parse().unwrap();
    assert_eq!(
        signature.recover_address_from_msg(entity.payload.as_bytes()).unwrap(),
        signer.address()
    );
}
