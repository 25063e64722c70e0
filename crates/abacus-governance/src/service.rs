//! # Governance Service
//!
//! Registers one governance router per chain and answers governor queries
//! by asking every router at once.

use crate::algorithms::{collect_governors, single_governor};
use crate::app::MultiDomainApp;
use crate::config::Environment;
use crate::domain::{
    ChainName, Domain, DomainRecord, GovernanceContracts, GovernanceError, Governor,
    ProxiedAddress,
};
use crate::ports::inbound::GovernanceApi;
use crate::ports::outbound::{GovernanceRouter, RouterFactory};
use async_trait::async_trait;
use futures::future::try_join_all;
use tracing::{debug, info, warn};

/// Governance deployment spanning several domains.
///
/// Bindings are fixed at construction; queries only read them, so a shared
/// reference can serve any number of concurrent queries.
#[derive(Debug)]
pub struct AbacusGovernance {
    app: MultiDomainApp<GovernanceContracts>,
}

impl AbacusGovernance {
    /// Register every chain and bind its router.
    ///
    /// Chains are registered in iteration order, which is also the order of
    /// query results. Any registration or binding failure aborts construction.
    pub fn new<I>(addresses: I, factory: &dyn RouterFactory) -> Result<Self, GovernanceError>
    where
        I: IntoIterator<Item = (ChainName, ProxiedAddress)>,
    {
        let mut app = MultiDomainApp::new();

        for (chain, address) in addresses {
            app.register_domain(DomainRecord::of(chain))?;
            let domain = app.resolve_domain(chain)?;

            let router = factory.connect(&DomainRecord { name: chain, id: domain }, &address)?;
            app.set_contracts(domain, GovernanceContracts::new(address, router))?;

            info!(
                "[gov] Bound governance router for {} (domain {}) at {}",
                chain, domain, address.proxy
            );
        }

        Ok(Self { app })
    }

    /// Build from an environment descriptor.
    pub fn from_environment(
        environment: &Environment,
        factory: &dyn RouterFactory,
    ) -> Result<Self, GovernanceError> {
        Self::new(environment.addresses(), factory)
    }

    /// Per-domain bindings.
    pub fn app(&self) -> &MultiDomainApp<GovernanceContracts> {
        &self.app
    }

    /// Contracts bound to a domain.
    pub fn must_get_contracts(
        &self,
        domain: Domain,
    ) -> Result<&GovernanceContracts, GovernanceError> {
        self.app.must_get_contracts(domain)
    }

    /// Non-zero governors across all domains, in registration order.
    ///
    /// Every router is queried concurrently. A single failed call fails the
    /// whole query; so does finding no governor at all.
    pub async fn governors(&self) -> Result<Vec<Governor>, GovernanceError> {
        let app = &self.app;
        let domains = app.domain_numbers();

        let calls = domains.iter().map(move |domain| async move {
            let contracts = app.must_get_contracts(*domain)?;
            let address = contracts.router.governor().await?;
            Ok::<_, GovernanceError>(address)
        });
        // try_join_all yields results in input order, not completion order
        let addresses = try_join_all(calls).await?;

        for (domain, address) in domains.iter().zip(&addresses) {
            if address.is_zero() {
                warn!("[gov] Domain {} has no governor", domain);
            } else {
                debug!("[gov] Domain {} governor {}", domain, address);
            }
        }

        let governors = collect_governors(domains, &addresses)?;
        info!(
            "[gov] Found {} governor(s) across {} domain(s)",
            governors.len(),
            domains.len()
        );
        Ok(governors)
    }

    /// The governor of a single-governor deployment.
    ///
    /// Fails with `MultipleGovernors` when more than one domain has one.
    pub async fn governor(&self) -> Result<Governor, GovernanceError> {
        single_governor(self.governors().await?)
    }
}

#[async_trait]
impl GovernanceApi for AbacusGovernance {
    async fn governors(&self) -> Result<Vec<Governor>, GovernanceError> {
        AbacusGovernance::governors(self).await
    }

    async fn governor(&self) -> Result<Governor, GovernanceError> {
        AbacusGovernance::governor(self).await
    }

    fn domains(&self) -> Vec<DomainRecord> {
        self.app.registry().domains().to_vec()
    }
}

/// Governance for the bundled local environment.
pub fn local_governance(factory: &dyn RouterFactory) -> Result<AbacusGovernance, GovernanceError> {
    let environment = Environment::named(Environment::LOCAL)?;
    AbacusGovernance::from_environment(&environment, factory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryRouterFactory;
    use crate::domain::Address;

    fn proxied(byte: u8) -> ProxiedAddress {
        ProxiedAddress::new(Address::new([byte; 20]), Address::new([byte + 1; 20]))
    }

    #[test]
    fn test_one_binding_per_chain() {
        let factory = InMemoryRouterFactory::new();
        let governance = AbacusGovernance::new(
            vec![
                (ChainName::Test1, proxied(1)),
                (ChainName::Test2, proxied(3)),
            ],
            &factory,
        )
        .unwrap();

        assert_eq!(governance.app().len(), 2);
        assert_eq!(governance.app().domain_numbers(), &[13371, 13372]);
        assert_eq!(
            governance.must_get_contracts(13372).unwrap().address,
            proxied(3)
        );
    }

    #[test]
    fn test_duplicate_chain_aborts() {
        let factory = InMemoryRouterFactory::new();
        let result = AbacusGovernance::new(
            vec![
                (ChainName::Test1, proxied(1)),
                (ChainName::Test1, proxied(3)),
            ],
            &factory,
        );
        assert!(matches!(
            result,
            Err(GovernanceError::DuplicateDomain { domain: 13371, .. })
        ));
    }

    #[tokio::test]
    async fn test_local_governance() {
        let factory = InMemoryRouterFactory::new()
            .with_governor(ChainName::Test1, Address::new([0xaa; 20]));
        let governance = local_governance(&factory).unwrap();

        assert_eq!(GovernanceApi::domains(&governance).len(), 3);
        let governor = governance.governor().await.unwrap();
        assert_eq!(governor, Governor::new(13371, Address::new([0xaa; 20])));
    }
}
