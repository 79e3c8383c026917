//! Chain-specific types and error definitions.

use alloy::primitives::TxHash;
use serde::Serialize;
use thiserror::Error;

/// Local Hardhat/Anvil chain.
pub const CHAIN_ID_LOCAL: u64 = 31337;

/// Sepolia testnet.
pub const CHAIN_ID_SEPOLIA: u64 = 11155111;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl ChainId {
    /// Human name for the chains the marketplace is deployed on.
    pub fn name(&self) -> &'static str {
        match self.0 {
            CHAIN_ID_LOCAL => "local",
            CHAIN_ID_SEPOLIA => "sepolia",
            _ => "unknown",
        }
    }
}

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during contract operations.
#[derive(Debug, Clone, Error)]
pub enum ContractError {
    /// No wallet was injected into the execution context.
    #[error("Wallet not available: {0}")]
    Environment(String),

    /// Address or artifact could not be resolved.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A read call or RPC request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Submitting the transaction failed (rejected, nonce, network).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// The transaction was mined but reverted.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// The call did not settle within the configured time.
    #[error("Timed out after {0} seconds")]
    Timeout(u64),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

impl ContractError {
    /// The underlying message without the kind prefix.
    pub fn detail(&self) -> String {
        match self {
            ContractError::Environment(msg)
            | ContractError::Configuration(msg)
            | ContractError::Rpc(msg)
            | ContractError::Transaction(msg)
            | ContractError::Reverted(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type for contract operations.
pub type ContractResult<T> = Result<T, ContractError>;

/// Outcome of a confirmed retirement transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetirementReceipt {
    pub tx_hash: TxHash,
    /// Block the transaction was mined in, when the node reports it.
    pub block_number: Option<u64>,
}
