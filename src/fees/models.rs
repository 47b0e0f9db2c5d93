use std::fmt;
use std::str::FromStr;

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

/// Which fee fields a transaction is priced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeType {
    /// Single `gasPrice` field
    Legacy,
    /// `maxFeePerGas` / `maxPriorityFeePerGas`. EIP-2930 and EIP-7702
    /// transactions price the same way.
    Eip1559,
}

impl FromStr for FeeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" => Ok(FeeType::Legacy),
            "eip1559" => Ok(FeeType::Eip1559),
            other => Err(format!("unknown fee type '{other}'")),
        }
    }
}

impl fmt::Display for FeeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeeType::Legacy => write!(f, "legacy"),
            FeeType::Eip1559 => write!(f, "eip1559"),
        }
    }
}

/// Fee fields of a pending transaction, as supplied by the caller
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFeeRequest {
    pub chain_id: u64,
    pub gas_price: Option<U256>,
    pub max_fee_per_gas: Option<U256>,
    pub max_priority_fee_per_gas: Option<U256>,
    /// Transaction type; `None` defers to the chain's configured fee type
    pub transaction_type: Option<FeeType>,
}

impl TransactionFeeRequest {
    pub fn new(chain_id: u64) -> Self {
        Self {
            chain_id,
            ..Default::default()
        }
    }

    pub fn with_gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = Some(gas_price);
        self
    }

    pub fn with_max_fee_per_gas(mut self, max_fee_per_gas: U256) -> Self {
        self.max_fee_per_gas = Some(max_fee_per_gas);
        self
    }

    pub fn with_max_priority_fee_per_gas(mut self, max_priority_fee_per_gas: U256) -> Self {
        self.max_priority_fee_per_gas = Some(max_priority_fee_per_gas);
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: FeeType) -> Self {
        self.transaction_type = Some(transaction_type);
        self
    }
}

/// The resolved fee fields for a transaction.
///
/// Legacy and dynamic fields never mix. `Unsupported` means dynamic fee
/// data is unavailable on the chain and the caller should price the
/// transaction with a legacy gas price instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FeeDecision {
    Legacy {
        gas_price: U256,
    },
    Dynamic {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
    Unsupported,
}

impl FeeDecision {
    /// Short label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            FeeDecision::Legacy { .. } => "legacy",
            FeeDecision::Dynamic { .. } => "dynamic",
            FeeDecision::Unsupported => "unsupported",
        }
    }

    pub fn gas_price(&self) -> Option<U256> {
        match self {
            FeeDecision::Legacy { gas_price } => Some(*gas_price),
            _ => None,
        }
    }

    pub fn max_fee_per_gas(&self) -> Option<U256> {
        match self {
            FeeDecision::Dynamic {
                max_fee_per_gas, ..
            } => Some(*max_fee_per_gas),
            _ => None,
        }
    }

    pub fn max_priority_fee_per_gas(&self) -> Option<U256> {
        match self {
            FeeDecision::Dynamic {
                max_priority_fee_per_gas,
                ..
            } => Some(*max_priority_fee_per_gas),
            _ => None,
        }
    }

    pub fn is_unsupported(&self) -> bool {
        matches!(self, FeeDecision::Unsupported)
    }
}

/// Result of the EIP-1559 computation step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicFeeData {
    Supported {
        max_fee_per_gas: U256,
        max_priority_fee_per_gas: U256,
    },
    /// No base fee, no priority fee, or the chain breaks on type-2 transactions
    Unsupported,
}

impl From<DynamicFeeData> for FeeDecision {
    fn from(data: DynamicFeeData) -> Self {
        match data {
            DynamicFeeData::Supported {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            } => FeeDecision::Dynamic {
                max_fee_per_gas,
                max_priority_fee_per_gas,
            },
            DynamicFeeData::Unsupported => FeeDecision::Unsupported,
        }
    }
}
