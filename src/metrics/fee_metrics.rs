use alloy::primitives::U256;
use lazy_static::lazy_static;
use prometheus::{register_counter_vec, register_histogram_vec, CounterVec, HistogramVec};
use tracing::debug;

use crate::fees::models::FeeDecision;
use crate::fees::utils::wei_to_gwei;

lazy_static! {
    /// Fee decisions per chain and outcome
    static ref FEE_DECISIONS_TOTAL: CounterVec = register_counter_vec!(
        "feewise_fee_decisions_total",
        "Total fee decisions by outcome",
        &["chain_id", "kind"]
    ).expect("Failed to create fee_decisions_total metric");

    /// Priority fee substitutions (RPC unavailable, gas station floor)
    static ref PRIORITY_FEE_FALLBACKS_TOTAL: CounterVec = register_counter_vec!(
        "feewise_priority_fee_fallbacks_total",
        "Priority fee lookups that fell back to a substitute value",
        &["chain_id", "reason"]
    ).expect("Failed to create priority_fee_fallbacks_total metric");

    /// Resolved fee values in gwei
    static ref RESOLVED_FEE_GWEI: HistogramVec = register_histogram_vec!(
        "feewise_resolved_fee_gwei",
        "Resolved fee values in gwei",
        &["chain_id", "field"],
        vec![0.001, 0.01, 0.1, 0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0, 200.0, 500.0]
    ).expect("Failed to create resolved_fee_gwei metric");
}

/// Fee metrics collector
pub struct FeeMetrics;

impl FeeMetrics {
    /// Record a resolved fee decision
    pub fn record_decision(chain_id: u64, decision: &FeeDecision) {
        let chain = chain_id.to_string();
        FEE_DECISIONS_TOTAL
            .with_label_values(&[&chain, decision.kind()])
            .inc();

        match decision {
            FeeDecision::Legacy { gas_price } => {
                Self::observe(&chain, "gas_price", *gas_price);
            }
            FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => {
                Self::observe(&chain, "max_fee_per_gas", *max_fee_per_gas);
                Self::observe(&chain, "max_priority_fee_per_gas", *max_priority_fee_per_gas);
            }
            FeeDecision::Unsupported => {}
        }
    }

    /// Record a priority fee fallback
    pub fn record_priority_fee_fallback(chain_id: u64, reason: &str) {
        debug!("Priority fee fallback on chain {}: {}", chain_id, reason);
        PRIORITY_FEE_FALLBACKS_TOTAL
            .with_label_values(&[&chain_id.to_string(), reason])
            .inc();
    }

    fn observe(chain: &str, field: &str, wei: U256) {
        RESOLVED_FEE_GWEI
            .with_label_values(&[chain, field])
            .observe(wei_to_gwei(wei));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_decision_counts() {
        let decision = FeeDecision::Legacy {
            gas_price: U256::from(20_000_000_000u64),
        };
        let before = FEE_DECISIONS_TOTAL
            .with_label_values(&["999001", "legacy"])
            .get();

        FeeMetrics::record_decision(999001, &decision);

        let after = FEE_DECISIONS_TOTAL
            .with_label_values(&["999001", "legacy"])
            .get();
        assert_eq!(after - before, 1.0);
    }

    #[test]
    fn test_record_fallback_counts() {
        FeeMetrics::record_priority_fee_fallback(999002, "gas_station_floor");
        let count = PRIORITY_FEE_FALLBACKS_TOTAL
            .with_label_values(&["999002", "gas_station_floor"])
            .get();
        assert!(count >= 1.0);
    }
}
