//! Deployment environments.
//!
//! An environment lists, in registration order, the governance router
//! deployment of every chain it spans.

use crate::domain::{ChainName, GovernanceError, ProxiedAddress};
use serde::{Deserialize, Serialize};
use std::path::Path;

const LOCAL_JSON: &str = include_str!("../../environments/local.json");

/// Governance router deployment on one chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainDeployment {
    /// Chain the router is deployed on.
    pub chain: ChainName,
    /// Router deployment addresses.
    pub address: ProxiedAddress,
}

/// Ordered set of chain deployments.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    deployments: Vec<ChainDeployment>,
}

impl Environment {
    /// Name of the bundled local environment.
    pub const LOCAL: &'static str = "local";

    /// Build an environment from deployments.
    pub fn new(deployments: Vec<ChainDeployment>) -> Self {
        Self { deployments }
    }

    /// Parse a JSON environment descriptor.
    pub fn from_json(json: &str) -> Result<Self, GovernanceError> {
        serde_json::from_str(json)
            .map_err(|e| GovernanceError::Config(format!("invalid environment: {}", e)))
    }

    /// Read a JSON environment descriptor from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            GovernanceError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json(&json)
    }

    /// A bundled environment by name.
    pub fn named(name: &str) -> Result<Self, GovernanceError> {
        match name {
            Self::LOCAL => Self::from_json(LOCAL_JSON),
            other => Err(GovernanceError::UnknownEnvironment(other.to_string())),
        }
    }

    /// Deployments in registration order.
    pub fn deployments(&self) -> &[ChainDeployment] {
        &self.deployments
    }

    /// (chain, address) pairs in registration order.
    pub fn addresses(&self) -> impl Iterator<Item = (ChainName, ProxiedAddress)> + '_ {
        self.deployments.iter().map(|d| (d.chain, d.address))
    }

    /// Chains in registration order.
    pub fn chains(&self) -> Vec<ChainName> {
        self.deployments.iter().map(|d| d.chain).collect()
    }

    /// Number of chains.
    pub fn len(&self) -> usize {
        self.deployments.len()
    }

    /// True if the environment spans no chain.
    pub fn is_empty(&self) -> bool {
        self.deployments.is_empty()
    }
}
