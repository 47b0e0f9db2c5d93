pub mod models;
pub mod providers;


pub use models::{GasStationConfig, GasStationError, PriorityFeeStation};
pub use providers::PolygonGasStation;
