use crate::{AccountProvider, SignRequest, SigningProvider, SIGN_TYPED_DATA_V4};
use alloy::{dyn_abi::TypedData, primitives::Address, signers::Signer};
use core::convert::Infallible;
use serde_json::{json, Value};
use tracing::debug;

/// EIP-1193 code for an unsupported method.
const UNSUPPORTED_METHOD: i64 = 4200;
/// EIP-1193 code for a request the account is not authorized to make.
const UNAUTHORIZED: i64 = 4100;
/// JSON-RPC code for invalid params.
const INVALID_PARAMS: i64 = -32602;

/// A wallet backed by an in-process alloy [`Signer`].
///
/// Answers signing requests the way an injected browser wallet would:
/// requests it cannot serve produce a JSON-RPC error object rather than an
/// error.
#[derive(Debug, Clone)]
pub struct LocalWallet<S> {
    signer: S,
}

impl<S> LocalWallet<S> {
    /// Wrap a signer.
    pub const fn new(signer: S) -> Self {
        Self { signer }
    }

    /// Get the signer.
    pub const fn signer(&self) -> &S {
        &self.signer
    }

    /// Unwrap the signer.
    pub fn into_inner(self) -> S {
        self.signer
    }
}

impl<S> LocalWallet<S>
where
    S: Signer + Send + Sync,
{
    fn error_response(id: u64, code: i64, message: impl Into<String>) -> Value {
        json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message.into() } })
    }
}

impl<S> AccountProvider for LocalWallet<S>
where
    S: Signer + Send + Sync,
{
    type Error = Infallible;

    async fn signer_address(&self) -> Result<Address, Self::Error> {
        Ok(self.signer.address())
    }
}

impl<S> SigningProvider for LocalWallet<S>
where
    S: Signer + Send + Sync,
{
    type Error = alloy::signers::Error;

    async fn request(&self, request: SignRequest) -> Result<Value, Self::Error> {
        if request.method != SIGN_TYPED_DATA_V4 {
            return Ok(Self::error_response(
                request.id,
                UNSUPPORTED_METHOD,
                format!("unsupported method {}", request.method),
            ));
        }
        if request.signer() != self.signer.address() {
            return Ok(Self::error_response(
                request.id,
                UNAUTHORIZED,
                format!("account {} is not available", request.signer()),
            ));
        }

        let typed_data: TypedData = match serde_json::from_str(request.typed_data()) {
            Ok(typed_data) => typed_data,
            Err(e) => return Ok(Self::error_response(request.id, INVALID_PARAMS, e.to_string())),
        };

        let signature = self.signer.sign_dynamic_typed_data(&typed_data).await?;
        debug!(signer = %self.signer.address(), "Signed typed data locally");

        Ok(json!({
            "jsonrpc": "2.0",
            "id": request.id,
            "result": alloy::hex::encode_prefixed(signature.as_bytes()),
        }))
    }
}
