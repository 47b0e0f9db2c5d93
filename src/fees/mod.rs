pub mod estimator;
pub mod models;
pub mod policy;
pub mod source;
pub mod utils;


pub use estimator::{FeeError, FeeEstimator};
pub use models::{DynamicFeeData, FeeDecision, FeeType, TransactionFeeRequest};
pub use policy::{ChainFeePolicy, ChainPolicies, FeeQuirk};
pub use source::FeeDataSource;
