use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::config::models::FeewiseConfig;
use crate::error::FeewiseError;
use crate::error_context;
use crate::fees::utils::{format_wei, gwei_to_wei, parse_gas_price};
use crate::fees::{ChainFeePolicy, ChainPolicies, FeeDecision, FeeEstimator, FeeType, TransactionFeeRequest};
use crate::gas_station::PolygonGasStation;
use crate::network::{NetworkError, NetworkManager};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "feewise - gas fee resolver for EVM chains",
    long_about = "feewise decides between legacy and EIP-1559 pricing for a transaction \
                  and fills in whatever fee fields the caller did not supply, following \
                  per-chain fee quirks."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve fees for a transaction on a configured network
    Resolve {
        /// Network name from the configuration file
        #[arg(short, long)]
        network: String,

        /// Explicit gas price (e.g. "25 gwei", "1000 wei")
        #[arg(long)]
        gas_price: Option<String>,

        /// Explicit max fee per gas
        #[arg(long)]
        max_fee: Option<String>,

        /// Explicit max priority fee per gas
        #[arg(long)]
        max_priority_fee: Option<String>,

        /// Transaction fee type: legacy or eip1559
        #[arg(long = "type")]
        fee_type: Option<FeeType>,

        /// Fall back to a legacy gas price when EIP-1559 data is unavailable
        #[arg(long)]
        fallback_legacy: bool,
    },
    /// Show the fee policy applied to a chain
    Policy {
        /// EIP-155 chain ID
        #[arg(long)]
        chain_id: u64,
    },
    /// Validate the configuration file
    Check,
}

/// JSON printed by `resolve`
#[derive(Debug, Serialize)]
struct ResolveOutput<'a> {
    network: &'a str,
    chain_id: u64,
    decision: FeeDecision,
}

pub async fn handle_command(command: Commands, config: FeewiseConfig) -> Result<()> {
    match command {
        Commands::Resolve {
            network,
            gas_price,
            max_fee,
            max_priority_fee,
            fee_type,
            fallback_legacy,
        } => {
            let request_fields = RequestFields {
                gas_price,
                max_fee,
                max_priority_fee,
                fee_type,
            };
            resolve(&config, &network, request_fields, fallback_legacy).await
        }
        Commands::Policy { chain_id } => show_policy(&config, chain_id),
        Commands::Check => check(&config),
    }
}

struct RequestFields {
    gas_price: Option<String>,
    max_fee: Option<String>,
    max_priority_fee: Option<String>,
    fee_type: Option<FeeType>,
}

fn parse_amount(value: Option<String>, field: &str) -> Result<Option<alloy::primitives::U256>> {
    value
        .map(|v| {
            parse_gas_price(&v).with_context(|| {
                error_context::messages::failed_to("parse", &format!("{field} '{v}'"))
            })
        })
        .transpose()
}

async fn resolve(
    config: &FeewiseConfig,
    network_name: &str,
    fields: RequestFields,
    fallback_legacy: bool,
) -> Result<()> {
    let network = config
        .network(network_name)
        .ok_or_else(|| anyhow!(error_context::not_found("Network", network_name)))?;

    let mut request = TransactionFeeRequest::new(network.chain_id);
    request.gas_price = parse_amount(fields.gas_price, "gas price")?;
    request.max_fee_per_gas = parse_amount(fields.max_fee, "max fee")?;
    request.max_priority_fee_per_gas = parse_amount(fields.max_priority_fee, "max priority fee")?;
    request.transaction_type = fields.fee_type;

    let estimator = build_estimator(config, network_name)?;

    let decision = if fallback_legacy {
        estimator.resolve_fees_or_legacy(&request).await?
    } else {
        estimator.resolve_fees(&request).await?
    };

    let output = ResolveOutput {
        network: network_name,
        chain_id: network.chain_id,
        decision,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    match decision {
        FeeDecision::Legacy { gas_price } => eprintln!("gasPrice: {}", format_wei(gas_price)),
        FeeDecision::Dynamic {
            max_fee_per_gas,
            max_priority_fee_per_gas,
        } => eprintln!(
            "maxFeePerGas: {}, maxPriorityFeePerGas: {}",
            format_wei(max_fee_per_gas),
            format_wei(max_priority_fee_per_gas)
        ),
        FeeDecision::Unsupported => {
            eprintln!("EIP-1559 fee data unavailable; rerun with --fallback-legacy")
        }
    }

    Ok(())
}

/// Wire an estimator for one configured network: JSON-RPC fee data, the
/// Polygon gas station and the configured surcharge and rounding.
pub fn build_estimator(
    config: &FeewiseConfig,
    network_name: &str,
) -> Result<FeeEstimator, FeewiseError> {
    let network = config
        .network(network_name)
        .ok_or_else(|| NetworkError::NetworkNotFound(network_name.to_string()))?;

    let manager = NetworkManager::new(std::slice::from_ref(network))?;
    let source = manager.fee_source(network_name)?;
    let station = PolygonGasStation::new(config.gas_station.clone())?;

    Ok(FeeEstimator::new(
        Arc::new(ChainPolicies::from_networks(&config.networks)),
        Arc::new(source),
        Arc::new(station),
    )
    .with_fee_config(config.fees.clone())
    .with_station_floor(gwei_to_wei(config.gas_station.min_priority_fee_gwei)))
}

fn show_policy(config: &FeewiseConfig, chain_id: u64) -> Result<()> {
    let policy: ChainFeePolicy = ChainPolicies::from_networks(&config.networks).get(chain_id);
    println!("{}", serde_json::to_string_pretty(&policy)?);
    Ok(())
}

fn check(config: &FeewiseConfig) -> Result<()> {
    println!("Configuration OK: {} network(s)", config.networks.len());
    let policies = ChainPolicies::from_networks(&config.networks);
    for network in &config.networks {
        let policy = policies.get(network.chain_id);
        println!(
            "  {} (chain {}): quirk={:?}, force_legacy={}, fee_type={}, round_up_fees={}",
            network.name,
            network.chain_id,
            policy.quirk,
            policy.forces_legacy(),
            policy
                .fee_type
                .map(|t| t.to_string())
                .unwrap_or_else(|| "auto".to_string()),
            policy.round_up_fees
        );
    }
    Ok(())
}
