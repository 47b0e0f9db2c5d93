//! Fee arithmetic and unit conversions
//!
//! All fee math is integer arithmetic on `U256` wei amounts. Divisions
//! floor, additions and multiplications saturate.

use alloy::primitives::{
    utils::{format_units, parse_units},
    U256,
};
use anyhow::{Context, Result};

use crate::constants::fees::{BASE_FEE_MULTIPLIER, GWEI_DECIMALS};

/// Convert whole gwei to wei
pub fn gwei_to_wei(gwei: u64) -> U256 {
    U256::from(gwei) * U256::from(10u64).pow(U256::from(GWEI_DECIMALS))
}

/// Convert wei to gwei
///
/// Lossy; intended for logs and metrics only.
pub fn wei_to_gwei(wei: U256) -> f64 {
    // Convert to u128 first to avoid overflow in f64 conversion
    let wei_u128 = wei.min(U256::from(u128::MAX)).to::<u128>();
    wei_u128 as f64 / 1e9
}

/// Add `percent` percent on top of `value`: `value + (value / 100) * percent`.
///
/// The division happens before the multiplication, so amounts under 100 wei
/// receive no surcharge.
pub fn apply_percent_surcharge(value: U256, percent: u64) -> U256 {
    let extra = (value / U256::from(100)).saturating_mul(U256::from(percent));
    value.saturating_add(extra)
}

/// EIP-1559 max fee: `base_fee * 2 + priority_fee`
pub fn eip1559_max_fee(base_fee: U256, priority_fee: U256) -> U256 {
    base_fee
        .saturating_mul(U256::from(BASE_FEE_MULTIPLIER))
        .saturating_add(priority_fee)
}

/// Round `value` up to the next multiple of `granularity`.
///
/// Values already on the grid are unchanged. A granularity of zero or one
/// is a no-op.
pub fn round_up_to_granularity(value: U256, granularity: u64) -> U256 {
    if granularity <= 1 {
        return value;
    }
    let granularity = U256::from(granularity);
    let remainder = value % granularity;
    if remainder.is_zero() {
        value
    } else {
        value.saturating_add(granularity - remainder)
    }
}

/// Parse a decimal gwei amount (e.g. "30.5") to wei.
///
/// The amount is fixed to nine decimals first, so sub-wei precision is
/// rounded rather than rejected.
pub fn parse_gwei_decimal(gwei: f64) -> Result<U256> {
    let fixed = format!("{gwei:.9}");
    let wei = parse_units(&fixed, "gwei").with_context(|| format!("Invalid gwei amount: {fixed}"))?;
    Ok(wei.into())
}

/// Format wei as a human-readable string with unit
///
/// # Returns
/// A formatted string like "1.5 ETH", "100 gwei", or "1000 wei"
pub fn format_wei(wei: U256) -> String {
    if wei >= U256::from(10u64).pow(U256::from(18)) {
        match format_units(wei, "ether") {
            Ok(eth) => format!("{eth} ETH"),
            Err(_) => format!("{wei} wei"),
        }
    } else if wei >= U256::from(1_000_000_000u64) {
        format!("{:.2} gwei", wei_to_gwei(wei))
    } else {
        format!("{wei} wei")
    }
}

/// Parse a gas price string with unit (e.g., "50 gwei", "0.001 eth")
///
/// # Returns
/// The parsed amount in wei
pub fn parse_gas_price(s: &str) -> Result<U256> {
    let s = s.trim().to_lowercase();

    if let Some(gwei_str) = s.strip_suffix("gwei") {
        let wei = parse_units(gwei_str.trim(), "gwei").context("Invalid gwei amount")?;
        Ok(wei.into())
    } else if let Some(eth_str) = s.strip_suffix("eth") {
        let wei = parse_units(eth_str.trim(), "ether").context("Invalid eth amount")?;
        Ok(wei.into())
    } else if let Some(wei_str) = s.strip_suffix("wei") {
        let wei: U256 = wei_str.trim().parse().context("Invalid wei amount")?;
        Ok(wei)
    } else {
        // Assume wei if no unit specified
        let wei: U256 = s.parse().context("Invalid gas price")?;
        Ok(wei)
    }
}
