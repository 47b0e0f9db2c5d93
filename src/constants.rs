//! Application-wide constants
//!
//! Fee heuristics, gas-station endpoints and defaults live here so the
//! numbers behind each decision are easy to find and audit.

/// Fee computation constants
pub mod fees {
    /// Default surcharge applied to network gas prices and priority fees (percent)
    pub const DEFAULT_PERCENT_MULTIPLIER: u64 = 10;

    /// Base fee multiplier used when deriving `maxFeePerGas`.
    /// Doubling keeps a transaction includable for ~6 full blocks.
    pub const BASE_FEE_MULTIPLIER: u64 = 2;

    /// Granularity (in wei) that computed fees are rounded up to on chains
    /// flagged with `round_up_fees`. 0x10000 clears the two low bytes.
    pub const DEFAULT_ROUNDING_GRANULARITY: u64 = 0x10000;

    /// Decimals of gwei relative to wei
    pub const GWEI_DECIMALS: u8 = 9;
}

/// Gas station constants
pub mod gas_station {
    /// Polygon PoS mainnet chain ID
    pub const POLYGON_CHAIN_ID: u64 = 137;

    /// Polygon Amoy testnet chain ID
    pub const POLYGON_AMOY_CHAIN_ID: u64 = 80002;

    /// Polygon PoS gas station endpoint
    pub const POLYGON_GAS_STATION_URL: &str = "https://gasstation.polygon.technology/v2";

    /// Polygon Amoy gas station endpoint
    pub const POLYGON_AMOY_GAS_STATION_URL: &str =
        "https://gasstation-testnet.polygon.technology/v2";

    /// Priority fee floor when the gas station is unreachable (gwei)
    pub const MIN_POLYGON_PRIORITY_FEE_GWEI: u64 = 31;

    /// HTTP timeout for gas station requests (seconds)
    pub const REQUEST_TIMEOUT_SECS: u64 = 10;
}
