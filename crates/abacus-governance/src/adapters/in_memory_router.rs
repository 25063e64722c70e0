//! In-Memory Router Adapter
//!
//! Implements `GovernanceRouter` without a chain. Used by tests and by the
//! CLI's offline mode.

use crate::domain::{Address, ChainName, Domain, DomainRecord, GovernanceError, ProxiedAddress};
use crate::ports::outbound::{GovernanceRouter, RouterFactory};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Router whose governor lives in memory.
pub struct InMemoryRouter {
    domain: Domain,
    governor: RwLock<Address>,
    /// Artificial latency per call.
    delay: Option<Duration>,
    should_fail: AtomicBool,
    calls: AtomicU64,
}

impl InMemoryRouter {
    /// Create a router reporting `governor`.
    pub fn new(domain: Domain, governor: Address) -> Self {
        Self {
            domain,
            governor: RwLock::new(governor),
            delay: None,
            should_fail: AtomicBool::new(false),
            calls: AtomicU64::new(0),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Change the reported governor.
    pub fn set_governor(&self, governor: Address) {
        *self.governor.write() = governor;
    }

    /// Make subsequent calls fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.should_fail.store(failing, Ordering::SeqCst);
    }

    /// Number of `governor()` calls served.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl GovernanceRouter for InMemoryRouter {
    async fn governor(&self) -> Result<Address, GovernanceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        if self.should_fail.load(Ordering::SeqCst) {
            return Err(GovernanceError::communication(
                self.domain,
                "router unavailable",
            ));
        }

        let governor = *self.governor.read();
        debug!("[gov] In-memory router {} -> {}", self.domain, governor);
        Ok(governor)
    }
}

/// Factory producing [`InMemoryRouter`]s from preset governors.
///
/// Chains without a preset governor get the zero address.
#[derive(Default)]
pub struct InMemoryRouterFactory {
    governors: HashMap<ChainName, Address>,
    delays: HashMap<ChainName, Duration>,
    failing: HashSet<ChainName>,
    /// Routers handed out so far, for later inspection.
    routers: RwLock<HashMap<ChainName, Arc<InMemoryRouter>>>,
}

impl InMemoryRouterFactory {
    /// Create a factory with no presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Preset the governor reported for `chain`.
    pub fn with_governor(mut self, chain: ChainName, governor: Address) -> Self {
        self.governors.insert(chain, governor);
        self
    }

    /// Delay answers from `chain`.
    pub fn with_delay(mut self, chain: ChainName, delay: Duration) -> Self {
        self.delays.insert(chain, delay);
        self
    }

    /// Make `chain`'s router fail every call.
    pub fn with_failure(mut self, chain: ChainName) -> Self {
        self.failing.insert(chain);
        self
    }

    /// Router handed out for `chain`, if connected.
    pub fn router(&self, chain: ChainName) -> Option<Arc<InMemoryRouter>> {
        self.routers.read().get(&chain).cloned()
    }
}

impl RouterFactory for InMemoryRouterFactory {
    fn connect(
        &self,
        domain: &DomainRecord,
        _address: &ProxiedAddress,
    ) -> Result<Arc<dyn GovernanceRouter>, GovernanceError> {
        let governor = self
            .governors
            .get(&domain.name)
            .copied()
            .unwrap_or(Address::ZERO);

        let mut router = InMemoryRouter::new(domain.id, governor);
        if let Some(delay) = self.delays.get(&domain.name) {
            router = router.with_delay(*delay);
        }
        router.set_failing(self.failing.contains(&domain.name));

        let router = Arc::new(router);
        self.routers.write().insert(domain.name, router.clone());
        Ok(router)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn proxied() -> ProxiedAddress {
        ProxiedAddress::new(Address::new([1u8; 20]), Address::new([2u8; 20]))
    }

    #[tokio::test]
    async fn test_router_reports_governor() {
        let router = InMemoryRouter::new(1, Address::new([0xaa; 20]));
        assert_eq!(router.governor().await.unwrap(), Address::new([0xaa; 20]));
        assert_eq!(router.calls(), 1);
    }

    #[tokio::test]
    async fn test_router_set_governor() {
        let router = InMemoryRouter::new(1, Address::ZERO);
        router.set_governor(Address::new([0xbb; 20]));
        assert_eq!(router.governor().await.unwrap(), Address::new([0xbb; 20]));
    }

    #[tokio::test]
    async fn test_router_failure() {
        let router = InMemoryRouter::new(9, Address::ZERO);
        router.set_failing(true);
        assert!(matches!(
            router.governor().await,
            Err(GovernanceError::ChainCommunication { domain: 9, .. })
        ));
    }

    #[tokio::test]
    async fn test_factory_defaults_to_zero() {
        let factory = InMemoryRouterFactory::new();
        let router = factory
            .connect(&DomainRecord::of(ChainName::Test1), &proxied())
            .unwrap();
        assert!(router.governor().await.unwrap().is_zero());
    }

    #[tokio::test]
    async fn test_factory_presets() {
        let factory = InMemoryRouterFactory::new()
            .with_governor(ChainName::Test2, Address::new([0xcc; 20]))
            .with_failure(ChainName::Test3);

        let two = factory
            .connect(&DomainRecord::of(ChainName::Test2), &proxied())
            .unwrap();
        let three = factory
            .connect(&DomainRecord::of(ChainName::Test3), &proxied())
            .unwrap();

        assert_eq!(two.governor().await.unwrap(), Address::new([0xcc; 20]));
        assert!(three.governor().await.is_err());
        assert_eq!(factory.router(ChainName::Test2).unwrap().calls(), 1);
        assert!(factory.router(ChainName::Test1).is_none());
    }
}
