//! JSON document store.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::store::types::{BuyerProfile, PurchaseRecord, StoreError, StoreResult};
use crate::store::PurchaseStore;

/// On-disk layout of the store document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub buyers: Vec<BuyerProfile>,
    #[serde(default)]
    pub purchases: Vec<PurchaseRecord>,
}

/// Store reading a JSON document; re-read on every query.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> StoreResult<StoreDocument> {
        let file = File::open(&self.path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

impl PurchaseStore for JsonFileStore {
    async fn purchases_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<PurchaseRecord>> {
        let document = self.read()?;
        let purchases: Vec<_> = document
            .purchases
            .into_iter()
            .filter(|p| p.buyer_id == buyer_id)
            .collect();
        tracing::debug!(buyer_id, count = purchases.len(), "Loaded purchases from file");
        Ok(purchases)
    }

    async fn buyer_profile(&self, buyer_id: &str) -> StoreResult<BuyerProfile> {
        self.read()?
            .buyers
            .into_iter()
            .find(|b| b.id == buyer_id)
            .ok_or_else(|| StoreError::NotFound(format!("buyer {}", buyer_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::types::{CreditMetadata, KycStatus};

    fn purchase(id: &str, buyer: &str) -> PurchaseRecord {
        PurchaseRecord {
            id: id.to_string(),
            buyer_id: buyer.to_string(),
            contract_address: String::new(),
            token_id: 1,
            sold_at: None,
            metadata: CreditMetadata {
                name: "Mangrove restoration".to_string(),
                volume_tco2e: 10.0,
            },
        }
    }

    #[tokio::test]
    async fn test_filters_by_buyer() {
        let path = std::env::temp_dir().join("carbon_desk_file_store_test.json");
        let document = StoreDocument {
            buyers: vec![BuyerProfile {
                id: "b1".to_string(),
                display_name: "Acme".to_string(),
                emissions_baseline: 1000.0,
                offset_target: 200.0,
                target_year: Some(2030),
                kyc_status: KycStatus::Approved,
            }],
            purchases: vec![purchase("p1", "b1"), purchase("p2", "b2"), purchase("p3", "b1")],
        };
        std::fs::write(&path, serde_json::to_string(&document).unwrap()).unwrap();

        let store = JsonFileStore::new(&path);
        let ids: Vec<_> = store
            .purchases_by_buyer("b1")
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["p1", "p3"]);

        assert_eq!(store.buyer_profile("b1").await.unwrap().target_year, Some(2030));
        assert!(matches!(
            store.buyer_profile("b9").await.unwrap_err(),
            StoreError::NotFound(_)
        ));

        std::fs::remove_file(&path).unwrap_or_default();
    }

    #[tokio::test]
    async fn test_missing_document() {
        let store = JsonFileStore::new("no/such/store.json");
        assert!(matches!(
            store.purchases_by_buyer("b1").await.unwrap_err(),
            StoreError::Io(_)
        ));
    }
}
