mod local;
pub use local::LocalWallet;

mod provider;
pub use provider::{ProviderWallet, ProviderWalletError};
