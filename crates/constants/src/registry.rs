use crate::{ContractIdentity, ContractName, KnownChains, RentalsConstants};
use std::collections::HashMap;

/// Errors returned by a [`ContractRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// No contract with this name is registered on this chain.
    #[error("contract {name} is not registered for chain id {chain_id}")]
    UnknownContract {
        /// The requested contract.
        name: ContractName,
        /// The requested chain.
        chain_id: u64,
    },
}

/// Resolves contract identities by name and chain id.
pub trait ContractRegistry {
    /// Resolve the identity of the named contract on the given chain.
    fn resolve_contract(
        &self,
        name: ContractName,
        chain_id: u64,
    ) -> Result<ContractIdentity, RegistryError>;
}

/// An in-memory [`ContractRegistry`].
///
/// [`StaticRegistry::known`] is pre-populated with the rentals contract of
/// every [`KnownChains`] entry. Additional deployments can be registered with
/// [`StaticRegistry::with_contract`].
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    contracts: HashMap<(ContractName, u64), ContractIdentity>,
}

impl StaticRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry containing the contracts of all known chains.
    pub fn known() -> Self {
        KnownChains::all().iter().fold(Self::new(), |registry, chain| {
            let constants = RentalsConstants::for_chain(*chain);
            registry.with_contract(ContractName::Rentals, constants.rentals().clone())
        })
    }

    /// Register a contract, replacing any previous entry for the same name and
    /// chain.
    pub fn with_contract(mut self, name: ContractName, identity: ContractIdentity) -> Self {
        self.register(name, identity);
        self
    }

    /// Register a contract, replacing any previous entry for the same name and
    /// chain.
    pub fn register(&mut self, name: ContractName, identity: ContractIdentity) {
        self.contracts.insert((name, identity.chain_id()), identity);
    }

    /// Number of registered contracts.
    pub fn len(&self) -> usize {
        self.contracts.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.contracts.is_empty()
    }
}

impl ContractRegistry for StaticRegistry {
    fn resolve_contract(
        &self,
        name: ContractName,
        chain_id: u64,
    ) -> Result<ContractIdentity, RegistryError> {
        self.contracts
            .get(&(name, chain_id))
            .cloned()
            .ok_or(RegistryError::UnknownContract { name, chain_id })
    }
}

impl<T: ContractRegistry + ?Sized> ContractRegistry for &T {
    fn resolve_contract(
        &self,
        name: ContractName,
        chain_id: u64,
    ) -> Result<ContractIdentity, RegistryError> {
        (**self).resolve_contract(name, chain_id)
    }
}
