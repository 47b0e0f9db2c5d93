use std::time::Duration;

use alloy::primitives::U256;
use reqwest::Client;
use tracing::{debug, error, warn};

use crate::constants::gas_station::{POLYGON_AMOY_CHAIN_ID, POLYGON_CHAIN_ID};
use crate::fees::utils::parse_gwei_decimal;
use crate::gas_station::models::{
    GasStationConfig, GasStationError, GasStationResponse, PriorityFeeStation,
};

/// Polygon gas station client (PoS mainnet and Amoy)
pub struct PolygonGasStation {
    config: GasStationConfig,
    client: Client,
}

impl PolygonGasStation {
    /// Create a new Polygon gas station client
    pub fn new(config: GasStationConfig) -> Result<Self, GasStationError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| GasStationError::HttpError(e.to_string()))?;

        Ok(Self { config, client })
    }

    /// Station URL for a chain
    pub fn station_url(&self, chain_id: u64) -> Result<&str, GasStationError> {
        match chain_id {
            POLYGON_CHAIN_ID => Ok(self.config.polygon_url.as_str()),
            POLYGON_AMOY_CHAIN_ID => Ok(self.config.amoy_url.as_str()),
            other => Err(GasStationError::UnsupportedChain(other)),
        }
    }
}

#[async_trait::async_trait]
impl PriorityFeeStation for PolygonGasStation {
    async fn fetch_priority_fee(&self, chain_id: u64) -> Result<U256, GasStationError> {
        let url = self.station_url(chain_id)?;
        debug!("Fetching priority fee from Polygon gas station: {}", url);

        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| GasStationError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            error!("Polygon gas station error: {}", status);
            return Err(GasStationError::HttpStatus(status.as_u16()));
        }

        let data: GasStationResponse = response
            .json()
            .await
            .map_err(|e| GasStationError::ParseError(e.to_string()))?;

        // Take the "fast" tier; the caller's percent multiplier adds the extra tip
        let priority_fee_gwei = data.fast.max_priority_fee.as_f64()?;
        if priority_fee_gwei.is_nan() || priority_fee_gwei <= 0.0 {
            warn!(
                "Polygon gas station returned priority fee {} for chain {}",
                priority_fee_gwei, chain_id
            );
            return Err(GasStationError::NonPositiveFee(priority_fee_gwei));
        }

        let wei = parse_gwei_decimal(priority_fee_gwei)
            .map_err(|e| GasStationError::ParseError(e.to_string()))?;
        // Sub-wei amounts round to zero
        if wei.is_zero() {
            warn!(
                "Polygon gas station priority fee {} gwei rounds to zero wei for chain {}",
                priority_fee_gwei, chain_id
            );
            return Err(GasStationError::NonPositiveFee(priority_fee_gwei));
        }
        debug!(
            "Polygon gas station priority fee for chain {}: {} gwei",
            chain_id, priority_fee_gwei
        );
        Ok(wei)
    }

    fn name(&self) -> &str {
        "polygon-gas-station"
    }
}
