//! JSON-RPC Router Adapter
//!
//! Implements `GovernanceRouter` by `eth_call`-ing the router proxy.

use crate::algorithms::{decode_address_word, encode_call, GOVERNOR_SIGNATURE};
use crate::config::GovernanceConfig;
use crate::domain::{Address, ChainName, Domain, DomainRecord, GovernanceError, ProxiedAddress};
use crate::ports::outbound::{GovernanceRouter, RouterFactory};
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// JSON-RPC request structure.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a, T: Serialize> {
    jsonrpc: &'static str,
    method: &'a str,
    params: T,
    id: u64,
}

/// JSON-RPC response structure.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

/// JSON-RPC error structure.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// `eth_call` transaction object.
#[derive(Debug, Serialize)]
struct CallRequest {
    to: String,
    data: String,
}

/// Router read over an Ethereum JSON-RPC endpoint.
pub struct JsonRpcRouter {
    domain: Domain,
    http_client: reqwest::Client,
    rpc_url: String,
    /// Router proxy address.
    contract: Address,
    request_id: AtomicU64,
}

impl JsonRpcRouter {
    /// Create a router with its own HTTP client.
    pub fn new(domain: Domain, rpc_url: String, contract: Address, timeout: Duration) -> Self {
        Self::with_client(domain, build_client(timeout), rpc_url, contract)
    }

    /// Create a router sharing an existing HTTP client.
    pub fn with_client(
        domain: Domain,
        http_client: reqwest::Client,
        rpc_url: String,
        contract: Address,
    ) -> Self {
        Self {
            domain,
            http_client,
            rpc_url,
            contract,
            request_id: AtomicU64::new(1),
        }
    }

    /// Router proxy address.
    pub fn contract(&self) -> Address {
        self.contract
    }

    /// Make a JSON-RPC call.
    async fn call<P: Serialize + Send, R: DeserializeOwned>(
        &self,
        method: &str,
        params: P,
    ) -> Result<R, GovernanceError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method,
            params,
            id,
        };

        let response = self
            .http_client
            .post(&self.rpc_url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                GovernanceError::communication(self.domain, format!("request failed: {}", e))
            })?;

        let rpc_response: JsonRpcResponse<R> = response.json().await.map_err(|e| {
            GovernanceError::communication(self.domain, format!("bad response: {}", e))
        })?;

        if let Some(error) = rpc_response.error {
            return Err(GovernanceError::communication(
                self.domain,
                format!("RPC error {}: {}", error.code, error.message),
            ));
        }

        rpc_response
            .result
            .ok_or_else(|| GovernanceError::communication(self.domain, "RPC response missing result"))
    }
}

#[async_trait]
impl GovernanceRouter for JsonRpcRouter {
    async fn governor(&self) -> Result<Address, GovernanceError> {
        let call = CallRequest {
            to: self.contract.to_string(),
            data: encode_call(GOVERNOR_SIGNATURE),
        };

        debug!(
            "[gov] eth_call governor() on domain {} at {}",
            self.domain, self.contract
        );

        let result: String = self.call("eth_call", (call, "latest")).await?;
        decode_address_word(self.domain, &result)
    }
}

/// Factory binding routers to per-chain RPC endpoints.
pub struct JsonRpcRouterFactory {
    http_client: reqwest::Client,
    rpc_urls: HashMap<ChainName, String>,
}

impl JsonRpcRouterFactory {
    /// Create a factory from chain -> RPC URL pairs.
    pub fn new(rpc_urls: HashMap<ChainName, String>, timeout: Duration) -> Self {
        Self {
            http_client: build_client(timeout),
            rpc_urls,
        }
    }

    /// Create a factory from loaded settings.
    pub fn from_config(config: &GovernanceConfig) -> Self {
        Self::new(config.rpc_urls.clone(), config.rpc_timeout())
    }
}

impl RouterFactory for JsonRpcRouterFactory {
    fn connect(
        &self,
        domain: &DomainRecord,
        address: &ProxiedAddress,
    ) -> Result<Arc<dyn GovernanceRouter>, GovernanceError> {
        let rpc_url = self
            .rpc_urls
            .get(&domain.name)
            .ok_or(GovernanceError::MissingRpcUrl(domain.name))?;

        Ok(Arc::new(JsonRpcRouter::with_client(
            domain.id,
            self.http_client.clone(),
            rpc_url.clone(),
            address.proxy,
        )))
    }
}

fn build_client(timeout: Duration) -> reqwest::Client {
    // reqwest::Client::new() is the infallible fallback
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
