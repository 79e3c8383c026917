//! REST-backed store.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::store::types::{BuyerProfile, PurchaseRecord, StoreError, StoreResult};
use crate::store::PurchaseStore;

/// Store served over HTTP:
/// `GET {base}/buyers/{id}` and `GET {base}/buyers/{id}/purchases`.
#[derive(Debug, Clone)]
pub struct HttpPurchaseStore {
    client: Client,
    base_url: String,
}

impl HttpPurchaseStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn buyer_url(&self, buyer_id: &str) -> String {
        format!("{}/buyers/{}", self.base_url, buyer_id)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String, what: &str) -> StoreResult<T> {
        let resp = self.client.get(&url).send().await?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(what.to_string()));
        }
        Ok(resp.error_for_status()?.json().await?)
    }
}

impl PurchaseStore for HttpPurchaseStore {
    async fn purchases_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<PurchaseRecord>> {
        let url = format!("{}/purchases", self.buyer_url(buyer_id));
        let purchases: Vec<PurchaseRecord> = self
            .get_json(url, &format!("purchases of buyer {}", buyer_id))
            .await?;
        tracing::debug!(buyer_id, count = purchases.len(), "Fetched purchases");
        Ok(purchases)
    }

    async fn buyer_profile(&self, buyer_id: &str) -> StoreResult<BuyerProfile> {
        self.get_json(self.buyer_url(buyer_id), &format!("buyer {}", buyer_id))
            .await
    }
}
