//! Shared mocks for the retirement integration tests.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use alloy::primitives::TxHash;
use tokio::sync::Semaphore;

use carbon_desk::contract::{ContractError, ContractResult, CreditLedger, RetirementReceipt};
use carbon_desk::retirement::RetirementFlow;
use carbon_desk::store::{
    BuyerProfile, CreditMetadata, KycStatus, PurchaseRecord, PurchaseStore, StoreError, StoreResult,
};

pub const BUYER: &str = "buyer-1";

/// Holds callers until opened. Open gates let everyone through.
pub struct Gate {
    closed: AtomicBool,
    permits: Semaphore,
}

impl Default for Gate {
    fn default() -> Self {
        Self {
            closed: AtomicBool::new(false),
            permits: Semaphore::new(0),
        }
    }
}

impl Gate {
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    pub fn open(&self) {
        self.closed.store(false, Ordering::SeqCst);
        self.permits.add_permits(1);
    }

    async fn pass(&self) {
        if self.closed.load(Ordering::SeqCst) {
            let _permit = self.permits.acquire().await;
        }
    }
}

/// In-memory ledger keyed by token id.
#[derive(Default)]
pub struct MockLedger {
    statuses: Mutex<HashMap<u64, bool>>,
    failing_reads: Mutex<HashSet<u64>>,
    retire_error: Mutex<Option<ContractError>>,
    pub reads: Gate,
    pub writes: Gate,
    pub retire_calls: AtomicUsize,
}

impl MockLedger {
    pub fn with_retired(tokens: &[u64]) -> Self {
        let ledger = Self::default();
        for token in tokens {
            ledger.set_status(*token, true);
        }
        ledger
    }

    pub fn set_status(&self, token_id: u64, retired: bool) {
        self.statuses.lock().unwrap().insert(token_id, retired);
    }

    pub fn fail_reads_for(&self, token_id: u64) {
        self.failing_reads.lock().unwrap().insert(token_id);
    }

    pub fn fail_retire_with(&self, error: ContractError) {
        *self.retire_error.lock().unwrap() = Some(error);
    }
}

impl CreditLedger for MockLedger {
    async fn is_retired(&self, _contract: &str, token_id: u64) -> ContractResult<bool> {
        self.reads.pass().await;
        if self.failing_reads.lock().unwrap().contains(&token_id) {
            return Err(ContractError::Rpc("connection reset".to_string()));
        }
        Ok(self
            .statuses
            .lock()
            .unwrap()
            .get(&token_id)
            .copied()
            .unwrap_or(false))
    }

    async fn retire(&self, _contract: &str, token_id: u64) -> ContractResult<RetirementReceipt> {
        self.retire_calls.fetch_add(1, Ordering::SeqCst);
        self.writes.pass().await;
        if let Some(error) = self.retire_error.lock().unwrap().clone() {
            return Err(error);
        }
        self.set_status(token_id, true);
        Ok(RetirementReceipt {
            tx_hash: TxHash::with_last_byte(token_id as u8),
            block_number: Some(42),
        })
    }
}

/// In-memory purchase store.
#[derive(Default)]
pub struct MemoryStore {
    pub profiles: Vec<BuyerProfile>,
    pub purchases: Vec<PurchaseRecord>,
}

impl PurchaseStore for MemoryStore {
    async fn purchases_by_buyer(&self, buyer_id: &str) -> StoreResult<Vec<PurchaseRecord>> {
        Ok(self
            .purchases
            .iter()
            .filter(|p| p.buyer_id == buyer_id)
            .cloned()
            .collect())
    }

    async fn buyer_profile(&self, buyer_id: &str) -> StoreResult<BuyerProfile> {
        self.profiles
            .iter()
            .find(|p| p.id == buyer_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(buyer_id.to_string()))
    }
}

pub fn purchase(id: &str, token_id: u64, volume_tco2e: f64) -> PurchaseRecord {
    PurchaseRecord {
        id: id.to_string(),
        buyer_id: BUYER.to_string(),
        contract_address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string(),
        token_id,
        sold_at: Some("2024-03-01T12:00:00Z".to_string()),
        metadata: CreditMetadata {
            name: format!("Credit {}", id),
            volume_tco2e,
        },
    }
}

pub fn profile(baseline: f64, target: f64, kyc_status: KycStatus) -> BuyerProfile {
    BuyerProfile {
        id: BUYER.to_string(),
        display_name: "Acme Logistics".to_string(),
        emissions_baseline: baseline,
        offset_target: target,
        target_year: Some(2030),
        kyc_status,
    }
}

pub fn store(purchases: Vec<PurchaseRecord>) -> MemoryStore {
    MemoryStore {
        profiles: vec![profile(1000.0, 200.0, KycStatus::Approved)],
        purchases,
    }
}

pub type TestFlow = RetirementFlow<Arc<MockLedger>, MemoryStore>;

/// Flow over `purchases` with a shared handle on the ledger.
pub fn flow(ledger: MockLedger, purchases: Vec<PurchaseRecord>) -> (Arc<TestFlow>, Arc<MockLedger>) {
    let ledger = Arc::new(ledger);
    let flow = RetirementFlow::new(store(purchases), Some(ledger.clone()));
    (Arc::new(flow), ledger)
}

/// Poll `cond` until it holds, failing the test after a second.
pub async fn wait_until(mut cond: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(1), async {
        while !cond() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("condition not reached");
}
