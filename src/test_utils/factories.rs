//! Test data factories for creating common test objects

use std::sync::Arc;

use alloy::primitives::U256;

use super::mocks::{MockFeeSource, MockGasStation};
use crate::config::models::{FeeConfig, Network};
use crate::fees::{ChainPolicies, FeeEstimator};

/// Factory for creating FeeEstimator instances backed by mocks
pub struct EstimatorFactory;

impl EstimatorFactory {
    /// Estimator using the built-in chain table and default fee settings
    pub fn create(source: Arc<MockFeeSource>, station: Arc<MockGasStation>) -> FeeEstimator {
        FeeEstimator::new(Arc::new(ChainPolicies::new()), source, station)
    }

    /// Estimator with per-network policy overrides
    pub fn create_with_networks(
        networks: &[Network],
        source: Arc<MockFeeSource>,
        station: Arc<MockGasStation>,
    ) -> FeeEstimator {
        FeeEstimator::new(
            Arc::new(ChainPolicies::from_networks(networks)),
            source,
            station,
        )
    }

    /// Estimator with a custom fee config
    pub fn create_with_fee_config(
        config: FeeConfig,
        source: Arc<MockFeeSource>,
        station: Arc<MockGasStation>,
    ) -> FeeEstimator {
        Self::create(source, station).with_fee_config(config)
    }
}

/// Factory for creating Network test objects
pub struct NetworkFactory;

impl NetworkFactory {
    pub fn create(name: &str, chain_id: u64) -> Network {
        Network {
            name: name.to_string(),
            chain_id,
            rpc_url: "http://localhost:8545".to_string(),
            ..Default::default()
        }
    }

    pub fn create_rounding(name: &str, chain_id: u64) -> Network {
        Network {
            round_up_fees: true,
            ..Self::create(name, chain_id)
        }
    }

    pub fn create_with_fee_type(name: &str, chain_id: u64, fee_type: &str) -> Network {
        Network {
            fee_type: Some(fee_type.to_string()),
            ..Self::create(name, chain_id)
        }
    }
}

/// Common wei amounts
pub fn gwei(amount: u64) -> U256 {
    U256::from(amount) * U256::from(1_000_000_000u64)
}
