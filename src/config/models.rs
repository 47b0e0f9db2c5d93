use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::fees::models::FeeType;
use crate::gas_station::models::GasStationConfig;

/// The main configuration structure for feewise
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FeewiseConfig {
    /// Networks fees can be resolved for
    #[serde(default)]
    #[validate]
    pub networks: Vec<Network>,

    /// Fee computation settings shared by all networks
    #[serde(default)]
    #[validate]
    pub fees: FeeConfig,

    /// Gas station configuration
    #[serde(default)]
    #[validate]
    pub gas_station: GasStationConfig,
}

impl FeewiseConfig {
    /// Find a network by name
    pub fn network(&self, name: &str) -> Option<&Network> {
        self.networks.iter().find(|n| n.name == name)
    }
}

/// Configuration for a blockchain network
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct Network {
    /// Network name (e.g., "ethereum", "polygon")
    #[validate(length(min = 1))]
    pub name: String,

    /// EIP-155 chain ID, used to look up fee quirks
    #[validate(range(min = 1))]
    pub chain_id: u64,

    /// RPC URL for the network
    #[validate(url)]
    pub rpc_url: String,

    /// Preferred fee type ("legacy" or "eip1559"); a transaction's own type wins
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(custom = "validate_fee_type")]
    pub fee_type: Option<String>,

    /// Round computed fees up to the configured granularity (experimental)
    #[serde(default)]
    pub round_up_fees: bool,

    /// Always price transactions with `gasPrice` on this network
    #[serde(default)]
    pub force_legacy: bool,
}

impl Network {
    /// The configured fee type, if any
    pub fn fee_type(&self) -> Option<FeeType> {
        self.fee_type.as_deref().and_then(|t| t.parse().ok())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self {
            name: "localhost".to_string(),
            chain_id: 31337,
            rpc_url: "http://localhost:8545".to_string(),
            fee_type: None,
            round_up_fees: false,
            force_legacy: false,
        }
    }
}

/// Fee computation settings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FeeConfig {
    /// Surcharge (percent) added to network gas prices and priority fees
    #[serde(default = "default_percent_multiplier")]
    #[validate(range(max = 100))]
    pub percent_multiplier: u64,

    /// Granularity in wei for chains with `round_up_fees`
    #[serde(default = "default_rounding_granularity")]
    #[validate(range(min = 1))]
    pub rounding_granularity: u64,
}

fn default_percent_multiplier() -> u64 {
    crate::constants::fees::DEFAULT_PERCENT_MULTIPLIER
}

fn default_rounding_granularity() -> u64 {
    crate::constants::fees::DEFAULT_ROUNDING_GRANULARITY
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            percent_multiplier: default_percent_multiplier(),
            rounding_granularity: default_rounding_granularity(),
        }
    }
}

/// Validates that the fee type is either "legacy" or "eip1559"
pub fn validate_fee_type(fee_type: &str) -> Result<(), ValidationError> {
    fee_type
        .parse::<FeeType>()
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_fee_type"))
}
