//! Credit contract binding subsystem.
//!
//! # Data Flow
//! ```text
//! Environment (private key) + ChainConfig
//!     → wallet.rs (injected wallet, connection, signer)
//! ContractConfig (address) + artifact
//!     → binding.rs (contract handle, factory)
//!     → ledger.rs (retired / retire calls used by the retirement flow)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys

pub mod abi;
pub mod binding;
pub mod ledger;
pub mod types;
pub mod wallet;

pub use binding::{ContractBinder, CreditContract, CreditFactory};
pub use ledger::{CreditLedger, OnChainLedger};
pub use types::{ChainId, ContractError, ContractResult, RetirementReceipt};
pub use wallet::{acquire_provider, acquire_signer, InjectedWallet, Signer, WalletConnection};
