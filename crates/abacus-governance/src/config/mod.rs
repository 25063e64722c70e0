//! # Configuration
//!
//! Deployment environments and runtime settings.

mod environment;
mod settings;

pub use environment::{ChainDeployment, Environment};
pub use settings::GovernanceConfig;
