//! Mock implementations for testing

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use alloy::primitives::U256;
use anyhow::{anyhow, Result};
use async_trait::async_trait;

use crate::fees::source::FeeDataSource;
use crate::gas_station::models::{GasStationError, PriorityFeeStation};

/// Configuration for controlling mock failures
#[derive(Debug, Clone, Default)]
pub struct FailureConfig {
    pub fail_on_block: bool,
    pub fail_on_priority_fee: bool,
    pub fail_on_gas_price: bool,
}

impl FailureConfig {
    pub fn fail_on_operation(operation: &str) -> Self {
        match operation {
            "block" => Self {
                fail_on_block: true,
                ..Default::default()
            },
            "priority_fee" => Self {
                fail_on_priority_fee: true,
                ..Default::default()
            },
            "gas_price" => Self {
                fail_on_gas_price: true,
                ..Default::default()
            },
            _ => Self::default(),
        }
    }
}

/// Mock fee data source with fixed values
#[derive(Debug)]
pub struct MockFeeSource {
    base_fee: Option<U256>,
    priority_fee: U256,
    gas_price: U256,
    failure_config: FailureConfig,
    block_calls: AtomicUsize,
    priority_fee_calls: AtomicUsize,
    gas_price_calls: AtomicUsize,
}

impl MockFeeSource {
    /// 30 gwei base fee, 2 gwei priority fee, 20 gwei gas price
    pub fn new() -> Self {
        Self {
            base_fee: Some(U256::from(30_000_000_000u64)),
            priority_fee: U256::from(2_000_000_000u64),
            gas_price: U256::from(20_000_000_000u64),
            failure_config: FailureConfig::default(),
            block_calls: AtomicUsize::new(0),
            priority_fee_calls: AtomicUsize::new(0),
            gas_price_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_base_fee(mut self, base_fee: Option<U256>) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn with_priority_fee(mut self, priority_fee: U256) -> Self {
        self.priority_fee = priority_fee;
        self
    }

    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    pub fn with_failures(mut self, failure_config: FailureConfig) -> Self {
        self.failure_config = failure_config;
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn block_calls(&self) -> usize {
        self.block_calls.load(Ordering::SeqCst)
    }

    pub fn priority_fee_calls(&self) -> usize {
        self.priority_fee_calls.load(Ordering::SeqCst)
    }

    pub fn gas_price_calls(&self) -> usize {
        self.gas_price_calls.load(Ordering::SeqCst)
    }

    /// Total RPC calls made against this source
    pub fn total_calls(&self) -> usize {
        self.block_calls() + self.priority_fee_calls() + self.gas_price_calls()
    }
}

impl Default for MockFeeSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeeDataSource for MockFeeSource {
    async fn latest_base_fee(&self) -> Result<Option<U256>> {
        self.block_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure_config.fail_on_block {
            return Err(anyhow!("Mock block fetch failure"));
        }
        Ok(self.base_fee)
    }

    async fn max_priority_fee_per_gas(&self) -> Result<U256> {
        self.priority_fee_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure_config.fail_on_priority_fee {
            return Err(anyhow!("Mock priority fee failure"));
        }
        Ok(self.priority_fee)
    }

    async fn gas_price(&self) -> Result<U256> {
        self.gas_price_calls.fetch_add(1, Ordering::SeqCst);
        if self.failure_config.fail_on_gas_price {
            return Err(anyhow!("Mock gas price failure"));
        }
        Ok(self.gas_price)
    }
}

/// Mock gas station returning a fixed fee or an error
#[derive(Debug)]
pub struct MockGasStation {
    priority_fee: Option<U256>,
    calls: AtomicUsize,
}

impl MockGasStation {
    pub fn returning(priority_fee: U256) -> Self {
        Self {
            priority_fee: Some(priority_fee),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn unreachable() -> Self {
        Self {
            priority_fee: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PriorityFeeStation for MockGasStation {
    async fn fetch_priority_fee(&self, _chain_id: u64) -> Result<U256, GasStationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.priority_fee
            .ok_or_else(|| GasStationError::HttpError("Mock gas station unreachable".to_string()))
    }

    fn name(&self) -> &str {
        "mock-gas-station"
    }
}
