//! # Domain Registry
//!
//! Maps chain names to domain ids for one deployment.
//!
//! Registration order is kept: it is the order in which routers are
//! queried and results are reported.

use crate::domain::{ChainName, Domain, DomainRecord, GovernanceError};
use std::collections::HashMap;
use tracing::debug;

/// Registered domains of a deployment.
#[derive(Clone, Debug, Default)]
pub struct DomainRegistry {
    /// Records in registration order.
    records: Vec<DomainRecord>,
    /// Chain name -> domain id.
    by_name: HashMap<ChainName, Domain>,
}

impl DomainRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a domain.
    ///
    /// Fails if either the chain name or the domain id is already taken.
    pub fn register_domain(&mut self, record: DomainRecord) -> Result<(), GovernanceError> {
        let id_taken = self.records.iter().any(|r| r.id == record.id);
        if id_taken || self.by_name.contains_key(&record.name) {
            return Err(GovernanceError::DuplicateDomain {
                name: record.name,
                domain: record.id,
            });
        }

        debug!("[gov] Registered domain {} ({})", record.name, record.id);
        self.by_name.insert(record.name, record.id);
        self.records.push(record);
        Ok(())
    }

    /// Domain id registered for a chain.
    pub fn resolve_domain(&self, name: ChainName) -> Result<Domain, GovernanceError> {
        self.by_name
            .get(&name)
            .copied()
            .ok_or_else(|| GovernanceError::UnknownChain(name.to_string()))
    }

    /// Chain registered under a domain id.
    pub fn domain_name(&self, domain: Domain) -> Option<ChainName> {
        self.records
            .iter()
            .find(|r| r.id == domain)
            .map(|r| r.name)
    }

    /// Registered records, in registration order.
    pub fn domains(&self) -> &[DomainRecord] {
        &self.records
    }

    /// Number of registered domains.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
