//! # Domain Entities
//!
//! Per-domain contract bindings and the governor query result.

use super::value_objects::{Address, Domain, ProxiedAddress};
use crate::ports::outbound::GovernanceRouter;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Governor reported by one domain's router.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Governor {
    /// Domain whose router reported this governor.
    pub domain: Domain,
    /// Governor address.
    pub identifier: Address,
}

impl Governor {
    /// Create a governor entry.
    pub fn new(domain: Domain, identifier: Address) -> Self {
        Self { domain, identifier }
    }
}

impl fmt::Display for Governor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "domain {}: {}", self.domain, self.identifier.to_checksum())
    }
}

/// Governance contracts deployed on a single domain.
///
/// Bound once at construction and only read afterwards.
#[derive(Clone)]
pub struct GovernanceContracts {
    /// Governance router deployment.
    pub address: ProxiedAddress,
    /// Router handle used for reads.
    pub router: Arc<dyn GovernanceRouter>,
}

impl GovernanceContracts {
    /// Bind a router handle to its deployment addresses.
    pub fn new(address: ProxiedAddress, router: Arc<dyn GovernanceRouter>) -> Self {
        Self { address, router }
    }
}

impl fmt::Debug for GovernanceContracts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GovernanceContracts")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}
