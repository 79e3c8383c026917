//! Carbon-credit desk library.
//!
//! Tracks a buyer's offset progress and retires purchased carbon-credit NFTs
//! through a wallet-backed signer.

pub mod config;
pub mod contract;
pub mod lifecycle;
pub mod observability;
pub mod retirement;
pub mod store;

pub use config::DeskConfig;
pub use contract::{ContractBinder, CreditLedger, OnChainLedger};
pub use retirement::{DashboardView, RetirementFlow};
pub use store::PurchaseStore;
