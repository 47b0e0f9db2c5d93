//! Error context utilities for consistent error handling
//!
//! Helpers for building the context strings attached to RPC, gas station
//! and configuration failures, so every call site words them the same way.

use anyhow::{Context, Result};
use std::fmt::Display;

/// Standard error context messages for common operations
pub mod messages {
    /// Create a "Failed to {action} {object}" message
    pub fn failed_to(action: &str, object: &str) -> String {
        format!("Failed to {action} {object}")
    }

    /// Create a "Failed to parse {type}: {value}" message
    pub fn failed_to_parse(type_name: &str, value: impl std::fmt::Display) -> String {
        format!("Failed to parse {type_name}: {value}")
    }

    /// Create a "Failed to get {property} from {source}" message
    pub fn failed_to_get(property: &str, source: &str) -> String {
        format!("Failed to get {property} from {source}")
    }
}

/// RPC-specific error contexts
pub mod network {
    use super::messages;

    pub fn provider_creation(network_name: &str) -> String {
        format!("Failed to create provider for network '{network_name}'")
    }

    pub fn rpc_url_parse(url: &str) -> String {
        messages::failed_to_parse("RPC URL", url)
    }

    pub fn latest_block(network_name: &str) -> String {
        messages::failed_to_get("latest block", &format!("network '{network_name}'"))
    }

    pub fn priority_fee(network_name: &str) -> String {
        messages::failed_to_get("max priority fee", &format!("network '{network_name}'"))
    }
}

/// Configuration-specific error contexts
pub mod config {
    pub fn load(path: &str) -> String {
        format!("Failed to load configuration from '{path}'")
    }

    pub fn duplicate_network(name: &str) -> String {
        format!("Network '{name}' is defined more than once")
    }
}

/// Extension trait for Result types to add common error contexts
pub trait ErrorContextExt<T> {
    /// Add context for a network operation
    fn context_network(self, operation: &str, network: &str) -> Result<T>;

    /// Add context with dynamic formatting
    fn context_fmt<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContextExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context_network(self, operation: &str, network: &str) -> Result<T> {
        self.with_context(|| format!("Network {operation} operation failed for '{network}'"))
    }

    fn context_fmt<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.with_context(f)
    }
}

/// Helper for creating not found error contexts
pub fn not_found(resource: &str, identifier: impl Display) -> String {
    format!("{resource} '{identifier}' not found")
}
