//! # Inbound Ports
//!
//! API trait defining what the governance query layer can do.

use crate::domain::{DomainRecord, GovernanceError, Governor};
use async_trait::async_trait;

/// Governance API - inbound port.
#[async_trait]
pub trait GovernanceApi: Send + Sync {
    /// Non-zero governors of every registered domain, in registration order.
    async fn governors(&self) -> Result<Vec<Governor>, GovernanceError>;

    /// The sole governor of a single-governor deployment.
    async fn governor(&self) -> Result<Governor, GovernanceError>;

    /// Registered domains, in registration order.
    fn domains(&self) -> Vec<DomainRecord>;
}
