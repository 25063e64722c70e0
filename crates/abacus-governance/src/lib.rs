//! # Abacus Governance
//!
//! Governor discovery for cross-chain governance deployments.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A governance deployment places one router contract on each domain. This
//! crate registers those routers and asks all of them, concurrently, who
//! their governor is:
//! - `governors()` returns every non-zero governor, in registration order
//! - `governor()` returns the only one, failing if there are several
//!
//! ## Module Structure
//!
//! ```text
//! abacus-governance/
//! ├── domain/          # Address, ChainName, Governor, errors, invariants
//! ├── app/             # DomainRegistry, MultiDomainApp<C>
//! ├── algorithms/      # Governor aggregation, ABI helpers
//! ├── ports/           # GovernanceApi, GovernanceRouter, RouterFactory
//! ├── adapters/        # JSON-RPC and in-memory routers
//! ├── config/          # Environments, GovernanceConfig
//! └── service.rs       # AbacusGovernance
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use abacus_governance::{local_governance, GovernanceConfig, JsonRpcRouterFactory};
//!
//! let config = GovernanceConfig::from_env();
//! let factory = JsonRpcRouterFactory::from_config(&config);
//! let governance = local_governance(&factory)?;
//! let governor = governance.governor().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod app;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

// Re-exports
pub use adapters::{InMemoryRouter, InMemoryRouterFactory, JsonRpcRouter, JsonRpcRouterFactory};
pub use algorithms::{collect_governors, function_selector, single_governor};
pub use app::{DomainRegistry, MultiDomainApp};
pub use config::{ChainDeployment, Environment, GovernanceConfig};
pub use domain::{
    Address, ChainName, Domain, DomainRecord, GovernanceContracts, GovernanceError, Governor,
    ProxiedAddress,
};
pub use ports::{GovernanceApi, GovernanceRouter, RouterFactory};
pub use service::{local_governance, AbacusGovernance};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
