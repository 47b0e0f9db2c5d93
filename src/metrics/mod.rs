pub mod fee_metrics;

pub use fee_metrics::FeeMetrics;
