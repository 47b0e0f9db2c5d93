//! Custom assertion helpers for common test patterns

use alloy::primitives::U256;

use crate::fees::FeeDecision;

/// Assertions over fee decisions
pub mod fee_assertions {
    use super::*;

    /// Assert a legacy decision and return its gas price
    pub fn assert_legacy(decision: &FeeDecision) -> U256 {
        match decision {
            FeeDecision::Legacy { gas_price } => *gas_price,
            other => panic!("Expected legacy decision, got {:?}", other),
        }
    }

    /// Assert a dynamic decision and return (max fee, priority fee)
    pub fn assert_dynamic(decision: &FeeDecision) -> (U256, U256) {
        match decision {
            FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => (*max_fee_per_gas, *max_priority_fee_per_gas),
            other => panic!("Expected dynamic decision, got {:?}", other),
        }
    }

    /// Assert the decision signals missing EIP-1559 support
    pub fn assert_unsupported(decision: &FeeDecision) {
        assert!(
            decision.is_unsupported(),
            "Expected unsupported decision, got {:?}",
            decision
        );
    }

    /// Assert a value sits on the rounding grid
    pub fn assert_multiple_of(value: U256, granularity: u64) {
        assert!(
            (value % U256::from(granularity)).is_zero(),
            "{} is not a multiple of {}",
            value,
            granularity
        );
    }
}
