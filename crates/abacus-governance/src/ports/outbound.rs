//! # Outbound Ports
//!
//! Traits for external dependencies (router contracts, contract bindings).

use crate::domain::{Address, DomainRecord, GovernanceError, ProxiedAddress};
use async_trait::async_trait;
use std::sync::Arc;

/// Governance router contract - outbound port.
///
/// Read-only view of one domain's router.
#[async_trait]
pub trait GovernanceRouter: Send + Sync {
    /// Current governor. `Address::ZERO` when none is set.
    async fn governor(&self) -> Result<Address, GovernanceError>;
}

/// Contract binding factory - outbound port.
///
/// Turns a deployment descriptor into a router handle for a domain.
pub trait RouterFactory: Send + Sync {
    /// Bind the router deployed at `address` on `domain`.
    fn connect(
        &self,
        domain: &DomainRecord,
        address: &ProxiedAddress,
    ) -> Result<Arc<dyn GovernanceRouter>, GovernanceError>;
}
