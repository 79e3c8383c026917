//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Config → Observability → Wallet + binder → Ledger (optional) → Store → Flow
//! ```
//!
//! # Design Decisions
//! - Configuration and artifact errors are fatal
//! - A missing wallet is not: the session runs read-only with every credit
//!   treated as active

pub mod startup;

pub use startup::{connect_ledger, init_observability, open_flow, DeskFlow};
