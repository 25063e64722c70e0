//! # Domain Errors
//!
//! Error types for governance queries and domain registration.

use super::value_objects::{ChainName, Domain};
use thiserror::Error;

/// Governance error types.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// Chain name is not part of the known domain table, or was never registered.
    #[error("Unknown chain: {0}")]
    UnknownChain(String),

    /// Chain name or domain id registered twice.
    #[error("Duplicate domain: {name} ({domain})")]
    DuplicateDomain {
        /// Chain name of the rejected registration
        name: ChainName,
        /// Domain id of the rejected registration
        domain: Domain,
    },

    /// No contracts bound to this domain.
    #[error("Unknown domain: {0}")]
    UnknownDomain(Domain),

    /// A router call failed.
    #[error("Chain communication failed on domain {domain}: {message}")]
    ChainCommunication {
        /// Domain whose router was queried
        domain: Domain,
        /// Underlying failure
        message: String,
    },

    /// No RPC endpoint configured for a chain.
    #[error("No RPC URL configured for {0}")]
    MissingRpcUrl(ChainName),

    /// Malformed address string.
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Environment name has no bundled descriptor.
    #[error("Unknown environment: {0}")]
    UnknownEnvironment(String),

    /// Environment or settings could not be loaded.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Every router reported the zero address.
    #[error("no governors")]
    NoGovernors,

    /// More than one router reported a governor.
    #[error("multiple governors: {count}")]
    MultipleGovernors {
        /// Number of non-zero governors found
        count: usize,
    },
}

impl GovernanceError {
    /// Wrap a transport failure for a domain.
    pub fn communication(domain: Domain, message: impl Into<String>) -> Self {
        Self::ChainCommunication {
            domain,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_governors_error() {
        let err = GovernanceError::NoGovernors;
        assert_eq!(err.to_string(), "no governors");
    }

    #[test]
    fn test_multiple_governors_error() {
        let err = GovernanceError::MultipleGovernors { count: 3 };
        assert!(err.to_string().contains("multiple governors"));
        assert!(err.to_string().contains('3'));
    }

    #[test]
    fn test_duplicate_domain_error() {
        let err = GovernanceError::DuplicateDomain {
            name: ChainName::Test1,
            domain: 13371,
        };
        assert!(err.to_string().contains("test1"));
        assert!(err.to_string().contains("13371"));
    }

    #[test]
    fn test_communication_error() {
        let err = GovernanceError::communication(5, "timeout");
        assert!(err.to_string().contains("domain 5"));
        assert!(err.to_string().contains("timeout"));
    }
}
