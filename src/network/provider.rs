use std::collections::HashMap;
use std::sync::Arc;

use alloy::{
    eips::BlockNumberOrTag,
    primitives::U256,
    providers::{Provider, ProviderBuilder, RootProvider},
    rpc::types::BlockTransactionsKind,
    transports::http::{Client, Http},
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};
use url::Url;

use crate::config::models::Network;
use crate::error_context::{self, ErrorContextExt};
use crate::fees::source::FeeDataSource;

/// Errors that can occur when interacting with network providers
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Network not found: {0}")]
    NetworkNotFound(String),

    #[error("No network configured for chain {0}")]
    ChainNotFound(u64),

    #[error("{0}")]
    ProviderCreation(String),
}

/// Type alias for the alloy provider we will use
pub type EthProvider = RootProvider<Http<Client>>;

/// Fee data read over JSON-RPC from a single network
pub struct RpcFeeSource {
    network_name: String,
    provider: Arc<EthProvider>,
}

impl RpcFeeSource {
    pub fn new(network_name: impl Into<String>, provider: Arc<EthProvider>) -> Self {
        Self {
            network_name: network_name.into(),
            provider,
        }
    }
}

#[async_trait]
impl FeeDataSource for RpcFeeSource {
    async fn latest_base_fee(&self) -> Result<Option<U256>> {
        let block = self
            .provider
            .get_block_by_number(BlockNumberOrTag::Latest, BlockTransactionsKind::Hashes)
            .await
            .context_fmt(|| error_context::network::latest_block(&self.network_name))?
            .ok_or_else(|| anyhow!(error_context::not_found("Latest block", &self.network_name)))?;

        let base_fee = block.header.base_fee_per_gas.map(U256::from);
        debug!(
            "Latest block on {}: number={}, base_fee={:?}",
            self.network_name, block.header.number, base_fee
        );
        Ok(base_fee)
    }

    async fn max_priority_fee_per_gas(&self) -> Result<U256> {
        let fee = self
            .provider
            .get_max_priority_fee_per_gas()
            .await
            .context_fmt(|| error_context::network::priority_fee(&self.network_name))?;
        Ok(U256::from(fee))
    }

    async fn gas_price(&self) -> Result<U256> {
        let gas_price = self
            .provider
            .get_gas_price()
            .await
            .context_network("gas price", &self.network_name)?;
        Ok(U256::from(gas_price))
    }
}

/// Manages the connections to different EVM networks
pub struct NetworkManager {
    /// Map of network name to provider
    providers: HashMap<String, Arc<EthProvider>>,

    /// Configured chain ID to network name
    chain_ids: HashMap<u64, String>,
}

impl NetworkManager {
    /// Create a new network manager from a list of network configurations.
    ///
    /// Providers are created lazily by alloy; no RPC call is made here.
    pub fn new(networks: &[Network]) -> Result<Self, NetworkError> {
        let mut providers = HashMap::new();
        let mut chain_ids = HashMap::new();

        for network in networks {
            let provider = Self::create_provider(&network.rpc_url).map_err(|reason| {
                NetworkError::ProviderCreation(format!(
                    "{}: {}",
                    error_context::network::provider_creation(&network.name),
                    reason
                ))
            })?;

            providers.insert(network.name.clone(), Arc::new(provider));
            chain_ids.insert(network.chain_id, network.name.clone());
            info!(
                "Registered network {} (chain {}) at {}",
                network.name, network.chain_id, network.rpc_url
            );
        }

        Ok(Self {
            providers,
            chain_ids,
        })
    }

    /// Get a provider for a given network
    pub fn get_provider(&self, network_name: &str) -> Result<Arc<EthProvider>, NetworkError> {
        self.providers
            .get(network_name)
            .cloned()
            .ok_or_else(|| NetworkError::NetworkNotFound(network_name.to_string()))
    }

    /// Fee data source for a network
    pub fn fee_source(&self, network_name: &str) -> Result<RpcFeeSource, NetworkError> {
        let provider = self.get_provider(network_name)?;
        Ok(RpcFeeSource::new(network_name, provider))
    }

    /// Fee data source for the network configured with `chain_id`
    pub fn fee_source_for_chain(&self, chain_id: u64) -> Result<RpcFeeSource, NetworkError> {
        let name = self
            .chain_ids
            .get(&chain_id)
            .ok_or(NetworkError::ChainNotFound(chain_id))?;
        self.fee_source(name)
    }

    /// Get all configured network names
    pub fn get_network_names(&self) -> Vec<String> {
        self.providers.keys().cloned().collect()
    }

    /// Create a provider from an RPC URL
    fn create_provider(rpc_url: &str) -> Result<EthProvider, String> {
        let url = Url::parse(rpc_url)
            .map_err(|e| format!("{} ({e})", error_context::network::rpc_url_parse(rpc_url)))?;

        Ok(ProviderBuilder::new().on_http(url))
    }
}
