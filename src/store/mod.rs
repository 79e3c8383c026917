//! Purchase data store boundary.
//!
//! The store owns purchase records and buyer profiles; the desk only reads
//! them, once per session load.

use std::future::Future;
use std::sync::Arc;

pub mod file;
pub mod http;
pub mod types;

pub use file::JsonFileStore;
pub use http::HttpPurchaseStore;
pub use types::{BuyerProfile, CreditMetadata, KycStatus, PurchaseRecord, StoreError, StoreResult};

use crate::config::{StoreConfig, StoreKind};

/// Read-only access to a buyer's purchases and profile.
pub trait PurchaseStore: Send + Sync {
    fn purchases_by_buyer(
        &self,
        buyer_id: &str,
    ) -> impl Future<Output = StoreResult<Vec<PurchaseRecord>>> + Send;

    fn buyer_profile(&self, buyer_id: &str) -> impl Future<Output = StoreResult<BuyerProfile>> + Send;
}

impl<S: PurchaseStore> PurchaseStore for Arc<S> {
    fn purchases_by_buyer(
        &self,
        buyer_id: &str,
    ) -> impl Future<Output = StoreResult<Vec<PurchaseRecord>>> + Send {
        (**self).purchases_by_buyer(buyer_id)
    }

    fn buyer_profile(&self, buyer_id: &str) -> impl Future<Output = StoreResult<BuyerProfile>> + Send {
        (**self).buyer_profile(buyer_id)
    }
}

/// Store selected by configuration.
#[derive(Debug, Clone)]
pub enum ConfiguredStore {
    File(JsonFileStore),
    Http(HttpPurchaseStore),
}

impl ConfiguredStore {
    pub fn from_config(config: &StoreConfig) -> Self {
        match config.kind {
            StoreKind::File => Self::File(JsonFileStore::new(&config.path)),
            StoreKind::Http => Self::Http(HttpPurchaseStore::new(&config.base_url)),
        }
    }
}

impl PurchaseStore for ConfiguredStore {
    async fn purchases_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<PurchaseRecord>> {
        match self {
            Self::File(store) => store.purchases_by_buyer(buyer_id).await,
            Self::Http(store) => store.purchases_by_buyer(buyer_id).await,
        }
    }

    async fn buyer_profile(&self, buyer_id: &str) -> StoreResult<BuyerProfile> {
        match self {
            Self::File(store) => store.buyer_profile(buyer_id).await,
            Self::Http(store) => store.buyer_profile(buyer_id).await,
        }
    }
}
