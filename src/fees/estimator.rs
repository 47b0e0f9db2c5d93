use std::sync::Arc;

use alloy::primitives::U256;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::models::{DynamicFeeData, FeeDecision, FeeType, TransactionFeeRequest};
use super::policy::{ChainFeePolicy, ChainPolicies, FeeQuirk};
use super::source::FeeDataSource;
use super::utils::{
    apply_percent_surcharge, eip1559_max_fee, format_wei, gwei_to_wei, round_up_to_granularity,
};
use crate::config::models::FeeConfig;
use crate::constants::gas_station::MIN_POLYGON_PRIORITY_FEE_GWEI;
use crate::gas_station::PriorityFeeStation;
use crate::metrics::FeeMetrics;

/// Errors that abort fee resolution
#[derive(Debug, Error)]
pub enum FeeError {
    #[error("Failed to fetch latest block: {0}")]
    BlockFetch(#[source] anyhow::Error),

    #[error("Failed to fetch gas price: {0}")]
    GasPriceFetch(#[source] anyhow::Error),
}

/// Resolves the fee fields of a transaction for one chain.
///
/// Caller-supplied values always win. Missing values are computed from the
/// chain's fee data, following the quirks recorded in [`ChainPolicies`].
pub struct FeeEstimator {
    policies: Arc<ChainPolicies>,
    source: Arc<dyn FeeDataSource>,
    station: Arc<dyn PriorityFeeStation>,
    config: FeeConfig,
    station_floor: U256,
}

impl FeeEstimator {
    pub fn new(
        policies: Arc<ChainPolicies>,
        source: Arc<dyn FeeDataSource>,
        station: Arc<dyn PriorityFeeStation>,
    ) -> Self {
        Self {
            policies,
            source,
            station,
            config: FeeConfig::default(),
            station_floor: gwei_to_wei(MIN_POLYGON_PRIORITY_FEE_GWEI),
        }
    }

    pub fn with_fee_config(mut self, config: FeeConfig) -> Self {
        self.config = config;
        self
    }

    /// Priority fee used when the gas station is unreachable
    pub fn with_station_floor(mut self, floor: U256) -> Self {
        self.station_floor = floor;
        self
    }

    /// Resolve the fee fields for a transaction.
    ///
    /// Returns [`FeeDecision::Unsupported`] when the chain has no usable
    /// EIP-1559 fee data; the caller should then price with a legacy gas
    /// price (see [`FeeEstimator::resolve_fees_or_legacy`]).
    pub async fn resolve_fees(
        &self,
        request: &TransactionFeeRequest,
    ) -> Result<FeeDecision, FeeError> {
        let decision = self.resolve(request).await?;
        FeeMetrics::record_decision(request.chain_id, &decision);
        Ok(decision)
    }

    /// Like [`FeeEstimator::resolve_fees`], but falls back to a legacy gas
    /// price instead of returning `Unsupported`.
    pub async fn resolve_fees_or_legacy(
        &self,
        request: &TransactionFeeRequest,
    ) -> Result<FeeDecision, FeeError> {
        let decision = match self.resolve(request).await? {
            FeeDecision::Unsupported => {
                info!(
                    "Chain {} has no EIP-1559 fee data, falling back to legacy gas price",
                    request.chain_id
                );
                let policy = self.policies.get(request.chain_id);
                FeeDecision::Legacy {
                    gas_price: self.legacy_gas_price(&policy).await?,
                }
            }
            decision => decision,
        };
        FeeMetrics::record_decision(request.chain_id, &decision);
        Ok(decision)
    }

    async fn resolve(&self, request: &TransactionFeeRequest) -> Result<FeeDecision, FeeError> {
        // Exit early if the caller supplied enough explicit values
        if let (Some(max_fee_per_gas), Some(max_priority_fee_per_gas)) =
            (request.max_fee_per_gas, request.max_priority_fee_per_gas)
        {
            debug!("Using explicit EIP-1559 fees for chain {}", request.chain_id);
            return Ok(FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            });
        }

        if let Some(gas_price) = request.gas_price {
            debug!("Using explicit gas price for chain {}", request.chain_id);
            return Ok(FeeDecision::Legacy { gas_price });
        }

        let defaults = self
            .default_fee_overrides(request.chain_id, request.transaction_type)
            .await?;

        // A single explicit dynamic field still overrides its computed default
        let decision = match defaults {
            FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => FeeDecision::Dynamic {
                max_fee_per_gas: request.max_fee_per_gas.unwrap_or(max_fee_per_gas),
                max_priority_fee_per_gas: request
                    .max_priority_fee_per_gas
                    .unwrap_or(max_priority_fee_per_gas),
            },
            other => other,
        };

        match &decision {
            FeeDecision::Legacy { gas_price } => info!(
                "Fees for chain {}: legacy gas_price={}",
                request.chain_id,
                format_wei(*gas_price)
            ),
            FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => info!(
                "Fees for chain {}: max_fee={}, priority_fee={}",
                request.chain_id,
                format_wei(*max_fee_per_gas),
                format_wei(*max_priority_fee_per_gas)
            ),
            FeeDecision::Unsupported => info!(
                "Fees for chain {}: EIP-1559 fee data unavailable",
                request.chain_id
            ),
        }

        Ok(decision)
    }

    /// Default fees for a chain, ignoring any caller-supplied values
    pub async fn default_fee_overrides(
        &self,
        chain_id: u64,
        fee_type: Option<FeeType>,
    ) -> Result<FeeDecision, FeeError> {
        let policy = self.policies.get(chain_id);
        let fee_type = policy.effective_fee_type(fee_type);

        if policy.forces_legacy() || fee_type == FeeType::Legacy {
            debug!(
                "Chain {} priced with legacy gas price (forced: {})",
                chain_id,
                policy.forces_legacy()
            );
            return Ok(FeeDecision::Legacy {
                gas_price: self.legacy_gas_price(&policy).await?,
            });
        }

        let decision = match self.dynamic_fee_data(&policy).await? {
            DynamicFeeData::Supported {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => FeeDecision::Dynamic {
                max_fee_per_gas: self.round(&policy, max_fee_per_gas),
                max_priority_fee_per_gas: self.round(&policy, max_priority_fee_per_gas),
            },
            DynamicFeeData::Unsupported => FeeDecision::Unsupported,
        };
        Ok(decision)
    }

    /// Network gas price plus the configured surcharge
    async fn legacy_gas_price(&self, policy: &ChainFeePolicy) -> Result<U256, FeeError> {
        let gas_price = self
            .source
            .gas_price()
            .await
            .map_err(FeeError::GasPriceFetch)?;
        let with_surcharge = apply_percent_surcharge(gas_price, self.config.percent_multiplier);
        debug!(
            "Network gas price: {} (with {}% surcharge: {})",
            format_wei(gas_price),
            self.config.percent_multiplier,
            format_wei(with_surcharge)
        );
        Ok(self.round(policy, with_surcharge))
    }

    /// EIP-1559 fee computation for a chain
    pub async fn dynamic_fee_data(
        &self,
        policy: &ChainFeePolicy,
    ) -> Result<DynamicFeeData, FeeError> {
        let chain_id = policy.chain_id;

        let (base_fee, network_priority_fee) = tokio::join!(
            self.source.latest_base_fee(),
            self.source.max_priority_fee_per_gas()
        );
        let base_fee = base_fee.map_err(FeeError::BlockFetch)?;
        let network_priority_fee = match network_priority_fee {
            Ok(fee) => Some(fee),
            Err(e) => {
                warn!("eth_maxPriorityFeePerGas unavailable on chain {}: {}", chain_id, e);
                FeeMetrics::record_priority_fee_fallback(chain_id, "rpc_unavailable");
                None
            }
        };

        let priority_fee = match policy.quirk {
            Some(FeeQuirk::NoEip1559) => {
                debug!("Chain {} does not support EIP-1559 transactions", chain_id);
                return Ok(DynamicFeeData::Unsupported);
            }
            Some(FeeQuirk::PolygonGasStation) => Some(self.gas_station_priority_fee(chain_id).await),
            _ => network_priority_fee,
        };

        let (Some(base_fee), Some(priority_fee)) = (base_fee, priority_fee) else {
            debug!(
                "Chain {} missing EIP-1559 data (base fee: {:?}, priority fee: {:?})",
                chain_id, base_fee, priority_fee
            );
            return Ok(DynamicFeeData::Unsupported);
        };

        let tipped_priority_fee = apply_percent_surcharge(priority_fee, self.config.percent_multiplier);
        let max_fee_per_gas = eip1559_max_fee(base_fee, tipped_priority_fee);

        let max_priority_fee_per_gas = if policy.has_quirk(FeeQuirk::PriorityFeeEqualsMaxFee) {
            max_fee_per_gas
        } else {
            tipped_priority_fee
        };

        Ok(DynamicFeeData::Supported {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        })
    }

    /// Gas station priority fee, or the floor if the station fails
    async fn gas_station_priority_fee(&self, chain_id: u64) -> U256 {
        match self.station.fetch_priority_fee(chain_id).await {
            Ok(fee) => fee,
            Err(e) => {
                warn!(
                    "{} failed for chain {}: {}, using floor {}",
                    self.station.name(),
                    chain_id,
                    e,
                    format_wei(self.station_floor)
                );
                FeeMetrics::record_priority_fee_fallback(chain_id, e.kind());
                self.station_floor
            }
        }
    }

    fn round(&self, policy: &ChainFeePolicy, value: U256) -> U256 {
        if policy.round_up_fees {
            round_up_to_granularity(value, self.config.rounding_granularity)
        } else {
            value
        }
    }
}
