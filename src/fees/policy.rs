//! Per-chain fee policy
//!
//! Chains with non-standard fee behavior are listed once, in
//! [`KNOWN_CHAIN_QUIRKS`]. Configuration can add to this table (force a
//! chain to legacy, set a preferred fee type, enable fee rounding) but
//! never removes a built-in quirk. A configured `force_legacy` applies on
//! every chain, whatever its built-in quirk.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use super::models::FeeType;
use crate::config::models::Network;

/// Non-standard fee behavior of a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeQuirk {
    /// Always price with `gasPrice`
    ForceLegacy,
    /// Advertises `eth_maxPriorityFeePerGas` but type-2 transactions fail
    NoEip1559,
    /// Priority fee comes from the Polygon gas station instead of RPC
    PolygonGasStation,
    /// `maxPriorityFeePerGas` must equal `maxFeePerGas`
    PriorityFeeEqualsMaxFee,
}

/// Built-in chain quirks, keyed by chain ID
pub const KNOWN_CHAIN_QUIRKS: &[(u64, FeeQuirk)] = &[
    (78600, FeeQuirk::ForceLegacy),      // Vanar testnet
    (2040, FeeQuirk::ForceLegacy),       // Vanar mainnet
    (248, FeeQuirk::ForceLegacy),        // Oasys mainnet
    (9372, FeeQuirk::ForceLegacy),       // Oasys testnet
    (841, FeeQuirk::ForceLegacy),        // Taraxa mainnet
    (842, FeeQuirk::ForceLegacy),        // Taraxa testnet
    (2016, FeeQuirk::ForceLegacy),       // MainnetZ mainnet
    (9768, FeeQuirk::ForceLegacy),       // MainnetZ testnet
    (2442, FeeQuirk::ForceLegacy),       // Polygon zkEVM Cardona testnet
    (1942999413, FeeQuirk::ForceLegacy), // Humanity testnet
    (1952959480, FeeQuirk::ForceLegacy), // Lumia testnet
    (994873017, FeeQuirk::ForceLegacy),  // Lumia mainnet
    (19011, FeeQuirk::ForceLegacy),      // Homeverse mainnet
    (40875, FeeQuirk::ForceLegacy),      // Homeverse testnet
    (1511670449, FeeQuirk::ForceLegacy), // GPT mainnet
    (5464, FeeQuirk::ForceLegacy),       // Saga mainnet
    (2020, FeeQuirk::ForceLegacy),       // Ronin mainnet
    (2021, FeeQuirk::ForceLegacy),       // Ronin Saigon testnet
    (98866, FeeQuirk::ForceLegacy),      // Plume mainnet
    (220, FeeQuirk::NoEip1559),          // Flag testnet
    (1220, FeeQuirk::NoEip1559),         // Flag mainnet
    (137, FeeQuirk::PolygonGasStation),  // Polygon PoS
    (80002, FeeQuirk::PolygonGasStation), // Polygon Amoy
    (42220, FeeQuirk::PriorityFeeEqualsMaxFee), // Celo mainnet
    (44787, FeeQuirk::PriorityFeeEqualsMaxFee), // Celo Alfajores
    (62320, FeeQuirk::PriorityFeeEqualsMaxFee), // Celo Baklava
];

static QUIRKS_BY_CHAIN: Lazy<HashMap<u64, FeeQuirk>> =
    Lazy::new(|| KNOWN_CHAIN_QUIRKS.iter().copied().collect());

/// Built-in quirk for a chain, if any
pub fn known_quirk(chain_id: u64) -> Option<FeeQuirk> {
    QUIRKS_BY_CHAIN.get(&chain_id).copied()
}

/// Everything the estimator needs to know about a chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChainFeePolicy {
    pub chain_id: u64,
    pub quirk: Option<FeeQuirk>,
    /// Configured to always price with `gasPrice`, on top of any built-in quirk
    pub force_legacy: bool,
    /// Preferred fee type when the transaction doesn't name one
    pub fee_type: Option<FeeType>,
    /// Round computed fees up to the configured granularity
    pub round_up_fees: bool,
}

impl ChainFeePolicy {
    /// Policy from the built-in table alone
    pub fn builtin(chain_id: u64) -> Self {
        Self {
            chain_id,
            quirk: known_quirk(chain_id),
            force_legacy: false,
            fee_type: None,
            round_up_fees: false,
        }
    }

    pub fn forces_legacy(&self) -> bool {
        self.force_legacy || self.quirk == Some(FeeQuirk::ForceLegacy)
    }

    pub fn has_quirk(&self, quirk: FeeQuirk) -> bool {
        self.quirk == Some(quirk)
    }

    /// The fee type a transaction resolves to on this chain
    pub fn effective_fee_type(&self, requested: Option<FeeType>) -> FeeType {
        requested.or(self.fee_type).unwrap_or(FeeType::Eip1559)
    }
}

/// Lookup from chain ID to [`ChainFeePolicy`]
#[derive(Debug, Clone, Default)]
pub struct ChainPolicies {
    overrides: HashMap<u64, ChainFeePolicy>,
}

impl ChainPolicies {
    /// Policies from the built-in table only
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge per-network configuration on top of the built-in table
    pub fn from_networks(networks: &[Network]) -> Self {
        let mut policies = Self::new();
        for network in networks {
            let mut policy = ChainFeePolicy::builtin(network.chain_id);
            policy.force_legacy = network.force_legacy;
            policy.fee_type = network.fee_type();
            policy.round_up_fees = network.round_up_fees;
            policies.insert(policy);
        }
        policies
    }

    pub fn insert(&mut self, policy: ChainFeePolicy) {
        self.overrides.insert(policy.chain_id, policy);
    }

    pub fn get(&self, chain_id: u64) -> ChainFeePolicy {
        self.overrides
            .get(&chain_id)
            .copied()
            .unwrap_or_else(|| ChainFeePolicy::builtin(chain_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_quirks() {
        assert_eq!(known_quirk(2020), Some(FeeQuirk::ForceLegacy));
        assert_eq!(known_quirk(220), Some(FeeQuirk::NoEip1559));
        assert_eq!(known_quirk(1220), Some(FeeQuirk::NoEip1559));
        assert_eq!(known_quirk(137), Some(FeeQuirk::PolygonGasStation));
        assert_eq!(known_quirk(80002), Some(FeeQuirk::PolygonGasStation));
        assert_eq!(known_quirk(42220), Some(FeeQuirk::PriorityFeeEqualsMaxFee));
        assert_eq!(known_quirk(1), None);
    }

    #[test]
    fn test_table_has_no_duplicate_chains() {
        assert_eq!(QUIRKS_BY_CHAIN.len(), KNOWN_CHAIN_QUIRKS.len());
    }

    #[test]
    fn test_effective_fee_type() {
        let mut policy = ChainFeePolicy::builtin(1);
        assert_eq!(policy.effective_fee_type(None), FeeType::Eip1559);

        policy.fee_type = Some(FeeType::Legacy);
        assert_eq!(policy.effective_fee_type(None), FeeType::Legacy);
        assert_eq!(
            policy.effective_fee_type(Some(FeeType::Eip1559)),
            FeeType::Eip1559
        );
    }

    #[test]
    fn test_config_overrides() {
        let networks = vec![
            Network {
                name: "custom".to_string(),
                chain_id: 12345,
                force_legacy: true,
                ..Default::default()
            },
            Network {
                name: "base".to_string(),
                chain_id: 8453,
                round_up_fees: true,
                fee_type: Some("eip1559".to_string()),
                ..Default::default()
            },
            Network {
                name: "polygon".to_string(),
                chain_id: 137,
                force_legacy: true,
                ..Default::default()
            },
        ];

        let policies = ChainPolicies::from_networks(&networks);
        assert!(policies.get(12345).forces_legacy());

        let base = policies.get(8453);
        assert!(base.round_up_fees);
        assert_eq!(base.fee_type, Some(FeeType::Eip1559));
        assert!(!base.forces_legacy());

        // Built-in quirks are kept alongside the configured flag
        let polygon = policies.get(137);
        assert!(polygon.has_quirk(FeeQuirk::PolygonGasStation));
        assert!(polygon.forces_legacy());

        // Unconfigured chains fall back to the table
        assert!(policies.get(2040).forces_legacy());
    }
}
