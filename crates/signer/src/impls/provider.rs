use crate::{AccountProvider, SignRequest, SigningProvider};
use alloy::{
    primitives::Address,
    providers::Provider,
    transports::{RpcError, TransportError},
};
use serde_json::{json, Value};

/// Errors returned by a [`ProviderWallet`].
#[derive(Debug, thiserror::Error)]
pub enum ProviderWalletError {
    /// The node or wallet could not be reached.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The wallet exposes no accounts.
    #[error("no account connected")]
    NoAccount,
}

/// A wallet reached over JSON-RPC through an alloy [`Provider`].
///
/// Signing requests are forwarded verbatim. The first account reported by
/// `eth_accounts` is the signer.
#[derive(Debug, Clone)]
pub struct ProviderWallet<P> {
    provider: P,
}

impl<P> ProviderWallet<P> {
    /// Wrap a provider.
    pub const fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Get the provider.
    pub const fn provider(&self) -> &P {
        &self.provider
    }
}

impl<P> AccountProvider for ProviderWallet<P>
where
    P: Provider,
{
    type Error = ProviderWalletError;

    async fn signer_address(&self) -> Result<Address, Self::Error> {
        let accounts = self.provider.get_accounts().await?;
        accounts.first().copied().ok_or(ProviderWalletError::NoAccount)
    }
}

impl<P> SigningProvider for ProviderWallet<P>
where
    P: Provider,
{
    type Error = TransportError;

    async fn request(&self, request: SignRequest) -> Result<Value, Self::Error> {
        let SignRequest { jsonrpc, id, method, params } = request;

        match self.provider.raw_request::<_, Value>(method.into(), params).await {
            Ok(result) => Ok(json!({ "jsonrpc": jsonrpc, "id": id, "result": result })),
            Err(RpcError::ErrorResp(payload)) => {
                Ok(json!({ "jsonrpc": jsonrpc, "id": id, "error": payload }))
            }
            Err(e) => Err(e),
        }
    }
}
