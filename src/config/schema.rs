//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the desk.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct DeskConfig {
    /// Credit contract location and artifact.
    pub contract: ContractConfig,

    /// Chain connection settings used by the injected wallet.
    pub chain: ChainConfig,

    /// Purchase data store settings.
    pub store: StoreConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Credit contract configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ContractConfig {
    /// Default contract address. Falls back to the build-time
    /// `CARBON_CREDIT_NFT_ADDRESS` when unset.
    pub address: Option<String>,

    /// Path to a Hardhat-style artifact overriding the embedded one.
    pub artifact_path: Option<PathBuf>,
}

/// Chain connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ChainConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: String,

    /// Chain ID (31337 for local Anvil/Hardhat, 11155111 for Sepolia).
    pub chain_id: u64,

    /// Number of block confirmations awaited after a retirement.
    pub confirmation_blocks: u64,

    /// Maximum wait for a retirement receipt in seconds (0 = unbounded).
    pub tx_timeout_secs: u64,

    /// Timeout for status reads in seconds (0 = unbounded).
    pub rpc_timeout_secs: u64,
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 31337,
            confirmation_blocks: 1,
            tx_timeout_secs: 0,
            rpc_timeout_secs: 0,
        }
    }
}

/// Which purchase store backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreKind {
    /// Local JSON document.
    #[default]
    File,
    /// Remote REST service.
    Http,
}

/// Purchase store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    pub kind: StoreKind,

    /// JSON document path for the `file` store.
    pub path: String,

    /// Base URL for the `http` store.
    pub base_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            kind: StoreKind::File,
            path: "purchases.json".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus exporter.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
