pub mod polygon;

pub use polygon::PolygonGasStation;
