use crate::{AccountProvider, SigningCoordinator, SigningError, SigningProvider};
use alloy::primitives::Address;
use rentals_api::{HttpChannel, ListingSubmitter, SubmissionError, SubmissionResult};
use rentals_constants::{ContractName, ContractRegistry, RegistryError, StaticRegistry};
use rentals_types::{
    AssetIdentity, ListingIndexes, ListingIntent, ListingSignature, PeriodTable, RentalsConfig,
    SchemaValidationError, TypedDataDocument,
};
use tracing::{debug, instrument};

/// Errors returned by [`ListingSender`], by the stage that failed.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ListingError {
    /// No signing account is available.
    #[error("account error: {0}")]
    Account(#[source] Box<dyn core::error::Error + Send + Sync>),
    /// The rentals contract is not known on this chain.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// The listing cannot be expressed as typed data.
    #[error("listing error: {0}")]
    Listing(#[from] SchemaValidationError),
    /// The wallet did not sign.
    #[error("signing error: {0}")]
    Signing(#[from] SigningError),
    /// The listings service did not accept the listing.
    #[error("submission error: {0}")]
    Submission(#[from] SubmissionError),
}

/// What the owner offers: everything in a listing except the signer and the
/// contract, which are resolved at [`prepare`] time.
///
/// [`prepare`]: ListingSender::prepare
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingTerms {
    /// The NFT being listed.
    pub asset: AssetIdentity,
    /// Expiration, in Unix seconds.
    pub expiration: u64,
    /// The offered rental periods.
    pub periods: PeriodTable,
    /// The `indexes` slots.
    pub indexes: ListingIndexes,
    /// The designated renter, zero for any renter.
    pub target: Address,
}

impl ListingTerms {
    /// Create terms open to any renter, with zeroed indexes.
    pub const fn new(asset: AssetIdentity, expiration: u64, periods: PeriodTable) -> Self {
        Self { asset, expiration, periods, indexes: [0; 3], target: Address::ZERO }
    }

    /// Set the `indexes` slots.
    pub fn with_indexes(self, indexes: ListingIndexes) -> Self {
        Self { indexes, ..self }
    }

    /// Restrict the listing to a single renter.
    pub fn with_target(self, target: Address) -> Self {
        Self { target, ..self }
    }
}

/// A listing signed by its owner, ready for submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedListing {
    intent: ListingIntent,
    document: TypedDataDocument,
    signature: ListingSignature,
}

impl SignedListing {
    /// Get the intent.
    pub const fn intent(&self) -> &ListingIntent {
        &self.intent
    }

    /// Get the signed typed data.
    pub const fn document(&self) -> &TypedDataDocument {
        &self.document
    }

    /// Get the signature.
    pub const fn signature(&self) -> &ListingSignature {
        &self.signature
    }
}

/// Lists NFTs for rent: resolves the signer and contract, obtains the
/// owner's signature, and submits the listing.
///
/// `ListingSender` is generic over:
/// - `A`: an [`AccountProvider`] naming the signer
/// - `P`: a [`SigningProvider`] producing signatures
/// - `C`: an [`HttpChannel`] reaching the listings service
/// - `R`: a [`ContractRegistry`] resolving the rentals contract
#[derive(Debug, Clone)]
pub struct ListingSender<A, P, C, R = StaticRegistry> {
    accounts: A,
    coordinator: SigningCoordinator<P>,
    submitter: ListingSubmitter<C>,
    registry: R,
    chain_id: u64,
}

impl<A, P, C, R> ListingSender<A, P, C, R> {
    /// Create a new listing sender.
    pub const fn new(
        accounts: A,
        coordinator: SigningCoordinator<P>,
        submitter: ListingSubmitter<C>,
        registry: R,
        chain_id: u64,
    ) -> Self {
        Self { accounts, coordinator, submitter, registry, chain_id }
    }

    /// Get the account provider.
    pub const fn accounts(&self) -> &A {
        &self.accounts
    }

    /// Get the signing coordinator.
    pub const fn coordinator(&self) -> &SigningCoordinator<P> {
        &self.coordinator
    }

    /// Get the submitter.
    pub const fn submitter(&self) -> &ListingSubmitter<C> {
        &self.submitter
    }

    /// Get the contract registry.
    pub const fn registry(&self) -> &R {
        &self.registry
    }

    /// Get the chain id listings are made on.
    pub const fn chain_id(&self) -> u64 {
        self.chain_id
    }
}

impl<A, P, C> ListingSender<A, P, C, StaticRegistry> {
    /// Create a listing sender for the chain, listings service and timeouts
    /// of `config`.
    pub fn from_config(
        accounts: A,
        signing: P,
        channel: C,
        config: &RentalsConfig,
    ) -> Result<Self, url::ParseError> {
        let constants = config.constants();
        let submitter = ListingSubmitter::new(channel, constants)?
            .with_timeout(config.submission_timeout());
        let coordinator =
            SigningCoordinator::new(signing).with_timeout(config.signing_timeout());
        let registry = StaticRegistry::known()
            .with_contract(ContractName::Rentals, constants.rentals().clone());

        Ok(Self::new(accounts, coordinator, submitter, registry, constants.chain_id()))
    }
}

impl<A, P, C, R> ListingSender<A, P, C, R>
where
    A: AccountProvider,
    R: ContractRegistry,
{
    /// Resolve the signer and the rentals contract, and assemble the intent.
    #[instrument(skip_all, fields(chain_id = self.chain_id))]
    pub async fn prepare(&self, terms: ListingTerms) -> Result<ListingIntent, ListingError> {
        let signer = self
            .accounts
            .signer_address()
            .await
            .map_err(|e| ListingError::Account(Box::new(e)))?;
        let contract = self.registry.resolve_contract(ContractName::Rentals, self.chain_id)?;

        let ListingTerms { asset, expiration, periods, indexes, target } = terms;
        Ok(ListingIntent::new(signer, asset, contract, expiration, periods)
            .with_indexes(indexes)
            .with_target(target))
    }
}

impl<A, P, C, R> ListingSender<A, P, C, R>
where
    P: SigningProvider,
{
    /// Build the typed data for `intent` and have its signer sign it.
    #[instrument(skip_all, fields(signer = %intent.signer()))]
    pub async fn sign_listing(&self, intent: ListingIntent) -> Result<SignedListing, ListingError> {
        let document = intent.typed_data()?;
        let signature = self.coordinator.sign(&document, intent.signer()).await?;
        debug!("Listing signed");
        Ok(SignedListing { intent, document, signature })
    }
}

impl<A, P, C, R> ListingSender<A, P, C, R>
where
    C: HttpChannel,
{
    /// Submit a signed listing.
    pub async fn submit_listing(
        &self,
        signed: &SignedListing,
    ) -> Result<SubmissionResult, ListingError> {
        self.submitter.submit(&signed.intent, &signed.signature).await.map_err(Into::into)
    }
}

impl<A, P, C, R> ListingSender<A, P, C, R>
where
    A: AccountProvider,
    P: SigningProvider,
    R: ContractRegistry,
    C: HttpChannel,
{
    /// Prepare, sign and submit a listing. Stops at the first failure.
    #[instrument(skip_all)]
    pub async fn send_listing(&self, terms: ListingTerms) -> Result<SubmissionResult, ListingError> {
        let intent = self.prepare(terms).await?;
        let signed = self.sign_listing(intent).await?;
        self.submit_listing(&signed).await
    }
}
