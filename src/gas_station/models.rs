use alloy::primitives::U256;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::gas_station::{
    MIN_POLYGON_PRIORITY_FEE_GWEI, POLYGON_AMOY_GAS_STATION_URL, POLYGON_GAS_STATION_URL,
    REQUEST_TIMEOUT_SECS,
};

/// Configuration for gas station lookups
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GasStationConfig {
    /// HTTP timeout in seconds
    #[serde(default = "default_timeout_secs")]
    #[validate(range(min = 1, max = 120))]
    pub timeout_secs: u64,

    /// Priority fee used when the station is unreachable (gwei)
    #[serde(default = "default_min_priority_fee_gwei")]
    pub min_priority_fee_gwei: u64,

    /// Polygon PoS gas station URL
    #[serde(default = "default_polygon_url")]
    #[validate(url)]
    pub polygon_url: String,

    /// Polygon Amoy gas station URL
    #[serde(default = "default_amoy_url")]
    #[validate(url)]
    pub amoy_url: String,
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT_SECS
}

fn default_min_priority_fee_gwei() -> u64 {
    MIN_POLYGON_PRIORITY_FEE_GWEI
}

fn default_polygon_url() -> String {
    POLYGON_GAS_STATION_URL.to_string()
}

fn default_amoy_url() -> String {
    POLYGON_AMOY_GAS_STATION_URL.to_string()
}

impl Default for GasStationConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            min_priority_fee_gwei: default_min_priority_fee_gwei(),
            polygon_url: default_polygon_url(),
            amoy_url: default_amoy_url(),
        }
    }
}

/// Polygon gas station response; only the fields we read
#[derive(Debug, Deserialize)]
pub struct GasStationResponse {
    pub fast: GasStationTier,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GasStationTier {
    pub max_priority_fee: GweiAmount,
}

/// A gwei amount the station may send as a JSON number or a decimal string
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum GweiAmount {
    Number(f64),
    Text(String),
}

impl GweiAmount {
    pub fn as_f64(&self) -> Result<f64, GasStationError> {
        match self {
            GweiAmount::Number(n) => Ok(*n),
            GweiAmount::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|e| GasStationError::ParseError(format!("'{s}': {e}"))),
        }
    }
}

/// Errors that can occur during gas station lookups
#[derive(Debug, thiserror::Error)]
pub enum GasStationError {
    #[error("No gas station for chain {0}")]
    UnsupportedChain(u64),
    #[error("HTTP request failed: {0}")]
    HttpError(String),
    #[error("Gas station returned HTTP {0}")]
    HttpStatus(u16),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("Gas station returned a non-positive priority fee: {0}")]
    NonPositiveFee(f64),
}

impl GasStationError {
    /// Short label used in metrics
    pub fn kind(&self) -> &'static str {
        match self {
            GasStationError::UnsupportedChain(_) => "unsupported_chain",
            GasStationError::HttpError(_) => "http",
            GasStationError::HttpStatus(_) => "http_status",
            GasStationError::ParseError(_) => "parse",
            GasStationError::NonPositiveFee(_) => "non_positive",
        }
    }
}

/// Source of priority fee suggestions outside the chain's own RPC
#[async_trait::async_trait]
pub trait PriorityFeeStation: Send + Sync {
    /// Suggested priority fee in wei for `chain_id`
    async fn fetch_priority_fee(&self, chain_id: u64) -> Result<U256, GasStationError>;

    /// Get the name of this station
    fn name(&self) -> &str;
}
