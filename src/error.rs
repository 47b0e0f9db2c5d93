use thiserror::Error;

#[derive(Debug, Error)]
pub enum FeewiseError {
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::parser::ConfigError),

    #[error("Network error: {0}")]
    Network(#[from] crate::network::NetworkError),

    #[error("Gas station error: {0}")]
    GasStation(#[from] crate::gas_station::GasStationError),

    #[error("Fee resolution error: {0}")]
    Fee(#[from] crate::fees::FeeError),
}
