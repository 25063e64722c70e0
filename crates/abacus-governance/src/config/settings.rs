//! Governance settings from environment variables.

use super::environment::Environment;
use crate::domain::{ChainName, GovernanceError};
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Settings for building a governance query layer.
#[derive(Debug, Clone)]
pub struct GovernanceConfig {
    /// Bundled environment name.
    pub environment: String,

    /// Environment descriptor file; overrides `environment` when set.
    pub environment_file: Option<PathBuf>,

    /// Chain -> JSON-RPC endpoint.
    pub rpc_urls: HashMap<ChainName, String>,

    /// Per-request RPC timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Log level filter (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Default for GovernanceConfig {
    fn default() -> Self {
        Self {
            environment: Environment::LOCAL.to_string(),
            environment_file: None,
            rpc_urls: default_rpc_urls(),
            rpc_timeout_secs: 10,
            log_level: "info".to_string(),
        }
    }
}

/// Local dev node endpoints.
fn default_rpc_urls() -> HashMap<ChainName, String> {
    [
        (ChainName::Test1, "http://127.0.0.1:8545"),
        (ChainName::Test2, "http://127.0.0.1:8546"),
        (ChainName::Test3, "http://127.0.0.1:8547"),
    ]
    .into_iter()
    .map(|(chain, url)| (chain, url.to_string()))
    .collect()
}

impl GovernanceConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `GOV_ENVIRONMENT`: Bundled environment (default: local)
    /// - `GOV_ENVIRONMENT_FILE`: Environment descriptor path (default: unset)
    /// - `GOV_RPC_URL_<CHAIN>`: RPC endpoint per chain, e.g. `GOV_RPC_URL_TEST1`
    /// - `GOV_RPC_TIMEOUT_SECS`: RPC timeout (default: 10)
    /// - `GOV_LOG_LEVEL` or `RUST_LOG`: Log level (default: info)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(environment) = lookup("GOV_ENVIRONMENT") {
            config.environment = environment;
        }

        config.environment_file = lookup("GOV_ENVIRONMENT_FILE").map(PathBuf::from);

        for chain in ChainName::ALL {
            let key = format!("GOV_RPC_URL_{}", chain.as_str().to_ascii_uppercase());
            if let Some(url) = lookup(&key) {
                config.rpc_urls.insert(chain, url);
            }
        }

        config.rpc_timeout_secs = lookup("GOV_RPC_TIMEOUT_SECS")
            .and_then(|v| v.parse().ok())
            .unwrap_or(config.rpc_timeout_secs);

        if let Some(level) = lookup("GOV_LOG_LEVEL").or_else(|| lookup("RUST_LOG")) {
            config.log_level = level;
        }

        config
    }

    /// Override one chain's RPC endpoint.
    pub fn with_rpc_url(mut self, chain: ChainName, url: impl Into<String>) -> Self {
        self.rpc_urls.insert(chain, url.into());
        self
    }

    /// RPC timeout as a duration.
    pub fn rpc_timeout(&self) -> Duration {
        Duration::from_secs(self.rpc_timeout_secs)
    }

    /// Load the configured environment.
    pub fn load_environment(&self) -> Result<Environment, GovernanceError> {
        match &self.environment_file {
            Some(path) => Environment::load(path),
            None => Environment::named(&self.environment),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = GovernanceConfig::default();
        assert_eq!(config.environment, "local");
        assert_eq!(config.rpc_timeout_secs, 10);
        assert_eq!(config.log_level, "info");
        assert_eq!(
            config.rpc_urls.get(&ChainName::Test2).map(String::as_str),
            Some("http://127.0.0.1:8546")
        );
    }

    #[test]
    fn test_from_lookup_overrides() {
        let config = GovernanceConfig::from_lookup(lookup_from(&[
            ("GOV_RPC_URL_GOERLI", "https://goerli.example"),
            ("GOV_RPC_URL_TEST1", "http://10.0.0.1:8545"),
            ("GOV_RPC_TIMEOUT_SECS", "3"),
            ("RUST_LOG", "debug"),
        ]));

        assert_eq!(
            config.rpc_urls.get(&ChainName::Goerli).map(String::as_str),
            Some("https://goerli.example")
        );
        assert_eq!(
            config.rpc_urls.get(&ChainName::Test1).map(String::as_str),
            Some("http://10.0.0.1:8545")
        );
        assert_eq!(config.rpc_timeout(), Duration::from_secs(3));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_gov_log_level_wins_over_rust_log() {
        let config = GovernanceConfig::from_lookup(lookup_from(&[
            ("GOV_LOG_LEVEL", "warn"),
            ("RUST_LOG", "trace"),
        ]));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_bad_timeout_keeps_default() {
        let config =
            GovernanceConfig::from_lookup(lookup_from(&[("GOV_RPC_TIMEOUT_SECS", "soon")]));
        assert_eq!(config.rpc_timeout_secs, 10);
    }

    #[test]
    fn test_load_environment() {
        let config = GovernanceConfig::default();
        assert_eq!(config.load_environment().unwrap().len(), 3);

        let config = GovernanceConfig::from_lookup(lookup_from(&[("GOV_ENVIRONMENT", "prod")]));
        assert!(matches!(
            config.load_environment(),
            Err(GovernanceError::UnknownEnvironment(_))
        ));
    }
}
