//! # Multi-Domain Application
//!
//! Generic container of per-domain contract handles.
//!
//! An application owns a [`DomainRegistry`] plus one contracts value `C`
//! per registered domain. Contracts are bound once and read afterwards.

use super::registry::DomainRegistry;
use crate::domain::{ChainName, Domain, DomainRecord, GovernanceError};
use std::collections::HashMap;

/// Domain registry plus per-domain contracts.
#[derive(Clone, Debug)]
pub struct MultiDomainApp<C> {
    /// Registered domains.
    registry: DomainRegistry,
    /// Domains with bound contracts, in binding order.
    order: Vec<Domain>,
    /// Domain -> contracts.
    contracts: HashMap<Domain, C>,
}

impl<C> Default for MultiDomainApp<C> {
    fn default() -> Self {
        Self {
            registry: DomainRegistry::new(),
            order: Vec::new(),
            contracts: HashMap::new(),
        }
    }
}

impl<C> MultiDomainApp<C> {
    /// Create an empty application.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain with the application's registry.
    pub fn register_domain(&mut self, record: DomainRecord) -> Result<(), GovernanceError> {
        self.registry.register_domain(record)
    }

    /// Resolve a registered chain's domain id.
    pub fn resolve_domain(&self, name: ChainName) -> Result<Domain, GovernanceError> {
        self.registry.resolve_domain(name)
    }

    /// The underlying registry.
    pub fn registry(&self) -> &DomainRegistry {
        &self.registry
    }

    /// Bind contracts to a registered domain.
    pub fn set_contracts(&mut self, domain: Domain, contracts: C) -> Result<(), GovernanceError> {
        let name = self
            .registry
            .domain_name(domain)
            .ok_or(GovernanceError::UnknownDomain(domain))?;

        if self.contracts.contains_key(&domain) {
            return Err(GovernanceError::DuplicateDomain { name, domain });
        }

        self.order.push(domain);
        self.contracts.insert(domain, contracts);
        Ok(())
    }

    /// Contracts bound to a domain, if any.
    pub fn contracts(&self, domain: Domain) -> Option<&C> {
        self.contracts.get(&domain)
    }

    /// Contracts bound to a domain.
    pub fn must_get_contracts(&self, domain: Domain) -> Result<&C, GovernanceError> {
        self.contracts(domain)
            .ok_or(GovernanceError::UnknownDomain(domain))
    }

    /// Domains with bound contracts, in binding order.
    pub fn domain_numbers(&self) -> &[Domain] {
        &self.order
    }

    /// (domain, contracts) pairs in binding order.
    pub fn iter(&self) -> impl Iterator<Item = (Domain, &C)> + '_ {
        self.order
            .iter()
            .filter_map(move |d| self.contracts.get(d).map(|c| (*d, c)))
    }

    /// Number of domains with bound contracts.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True if no contracts are bound.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
