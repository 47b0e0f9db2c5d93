//! Gas fee resolution for EVM chains.
//!
//! [`fees::FeeEstimator`] decides between legacy (`gasPrice`) and EIP-1559
//! (`maxFeePerGas` / `maxPriorityFeePerGas`) pricing for a transaction and
//! fills in the fee fields the caller left empty, following the per-chain
//! quirks recorded in [`fees::policy`].

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod error_context;
pub mod fees;
pub mod gas_station;
pub mod metrics;
pub mod network;
#[doc(hidden)]
pub mod test_utils;

pub use error::FeewiseError;
pub use fees::{FeeDecision, FeeError, FeeEstimator, FeeType, TransactionFeeRequest};
