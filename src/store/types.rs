//! Purchase and buyer records as the marketplace store serves them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Display metadata attached to a credit at listing time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditMetadata {
    pub name: String,
    /// Offset volume in tonnes of CO2 equivalent.
    #[serde(rename = "volumeTCO2e", default)]
    pub volume_tco2e: f64,
}

/// A credit the buyer has purchased.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRecord {
    pub id: String,
    pub buyer_id: String,
    /// Contract holding the token; empty means the configured default.
    #[serde(default)]
    pub contract_address: String,
    pub token_id: u64,
    /// Sale timestamp as stored (ISO 8601).
    #[serde(default)]
    pub sold_at: Option<String>,
    pub metadata: CreditMetadata,
}

/// KYC review state of a buyer account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    #[default]
    Pending,
    Submitted,
    Approved,
    Rejected,
}

/// Buyer account as seen by the desk (read-only).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuyerProfile {
    pub id: String,
    #[serde(default, alias = "companyName")]
    pub display_name: String,
    #[serde(default)]
    pub emissions_baseline: f64,
    #[serde(default)]
    pub offset_target: f64,
    #[serde(default)]
    pub target_year: Option<u32>,
    #[serde(default)]
    pub kyc_status: KycStatus,
}

/// Errors raised by purchase stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Store IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed store data: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
