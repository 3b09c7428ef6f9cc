use alloy::primitives::Address;
use core::future::Future;
use rentals_types::TypedDataDocument;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON-RPC method used to request typed-data signatures.
pub const SIGN_TYPED_DATA_V4: &str = "eth_signTypedData_v4";

/// The request id used for signing requests.
pub const SIGN_REQUEST_ID: u64 = 999_999_999_999;

/// A JSON-RPC 2.0 request asking a wallet to sign typed data.
///
/// The typed data travels as a JSON string, as `eth_signTypedData_v4`
/// requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignRequest {
    /// Always `"2.0"`.
    pub jsonrpc: String,
    /// The request id.
    pub id: u64,
    /// The RPC method.
    pub method: String,
    /// The signing account and the serialized typed data.
    pub params: (Address, String),
}

impl SignRequest {
    /// Create an `eth_signTypedData_v4` request for `doc`.
    pub fn typed_data_v4(
        signer: Address,
        doc: &TypedDataDocument,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            jsonrpc: "2.0".to_string(),
            id: SIGN_REQUEST_ID,
            method: SIGN_TYPED_DATA_V4.to_string(),
            params: (signer, doc.to_json()?),
        })
    }

    /// Get the account asked to sign.
    pub const fn signer(&self) -> Address {
        self.params.0
    }

    /// Get the serialized typed data.
    pub fn typed_data(&self) -> &str {
        &self.params.1
    }
}

/// A source for the address of the connected account.
pub trait AccountProvider {
    /// The error type returned when no account is available.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Get the address of the connected account.
    fn signer_address(&self) -> impl Future<Output = Result<Address, Self::Error>> + Send;
}

/// A wallet that answers JSON-RPC signing requests.
///
/// Implementors dispatch the request once and return the raw JSON-RPC
/// response object, which carries either a `result` or an `error`. Errors
/// returned by `request` itself mean the provider could not answer at all.
pub trait SigningProvider {
    /// The error type returned when the request could not be answered.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Dispatch the request and wait for the response.
    fn request(
        &self,
        request: SignRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send;
}

impl<T: AccountProvider + Sync> AccountProvider for &T {
    type Error = T::Error;

    fn signer_address(&self) -> impl Future<Output = Result<Address, Self::Error>> + Send {
        (**self).signer_address()
    }
}

impl<T: SigningProvider + Sync> SigningProvider for &T {
    type Error = T::Error;

    fn request(
        &self,
        request: SignRequest,
    ) -> impl Future<Output = Result<Value, Self::Error>> + Send {
        (**self).request(request)
    }
}
