use alloy::primitives::U256;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only fee data for a single chain.
///
/// Implementations perform no retries; callers wrap them in their own
/// timeout or retry policy if they need one.
#[async_trait]
pub trait FeeDataSource: Send + Sync {
    /// Base fee of the latest block, `None` on pre-London chains
    async fn latest_base_fee(&self) -> Result<Option<U256>>;

    /// Network-suggested priority fee (`eth_maxPriorityFeePerGas`)
    async fn max_priority_fee_per_gas(&self) -> Result<U256>;

    /// Network gas price (`eth_gasPrice`)
    async fn gas_price(&self) -> Result<U256>;
}
