//! Retirement reconciliation for one buyer session.
//!
//! Keeps the visible credit list in step with on-chain retirement status and
//! runs at most one retirement at a time.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use arc_swap::ArcSwap;
use futures_util::future::join_all;
use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::contract::{ContractError, CreditLedger, RetirementReceipt};
use crate::observability::metrics;
use crate::retirement::notify::{Notification, Notifier};
use crate::retirement::state::{RetirementState, TrackedCredit};
use crate::store::{PurchaseStore, StoreResult};

/// Why a retire request did not produce a retirement.
#[derive(Debug, Error)]
pub enum RetireError {
    #[error("Another retirement is in progress ({0})")]
    Busy(String),

    #[error("No purchase with id {0}")]
    UnknownRecord(String),

    #[error("Credit {0} is already retired")]
    AlreadyRetired(String),

    #[error("Retirement status of {0} has not been checked yet")]
    StatusUnknown(String),

    #[error("No wallet connected")]
    NoSigner,

    #[error("Retire failed: {0}")]
    Failed(#[from] ContractError),
}

/// How the retire control for a credit should render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RetireControl {
    /// Credit is retired; no control at all.
    Hidden,
    Enabled,
    Disabled,
    /// This credit's retirement is in flight.
    Pending,
}

/// Single-slot marker for the retirement currently in flight.
#[derive(Debug, Default)]
pub struct InFlightSlot {
    current: Mutex<Option<String>>,
}

impl InFlightSlot {
    /// Claim the slot for `record_id`, or `None` if it is taken.
    pub fn try_acquire(&self, record_id: &str) -> Option<InFlightGuard<'_>> {
        let mut current = self.current.lock().unwrap_or_else(PoisonError::into_inner);
        if current.is_some() {
            return None;
        }
        *current = Some(record_id.to_string());
        Some(InFlightGuard { slot: self })
    }

    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Releases the slot on drop.
#[derive(Debug)]
pub struct InFlightGuard<'a> {
    slot: &'a InFlightSlot,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        *self
            .slot
            .current
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// Reconciles a buyer's purchases with on-chain retirement status.
pub struct RetirementFlow<L, S> {
    store: S,
    /// `None` when no signer could be acquired.
    ledger: Option<L>,
    credits: ArcSwap<Vec<TrackedCredit>>,
    in_flight: InFlightSlot,
    loading: AtomicBool,
    notifier: Notifier,
}

impl<L: CreditLedger, S: PurchaseStore> RetirementFlow<L, S> {
    pub fn new(store: S, ledger: Option<L>) -> Self {
        Self {
            store,
            ledger,
            credits: ArcSwap::from_pointee(Vec::new()),
            in_flight: InFlightSlot::default(),
            loading: AtomicBool::new(false),
            notifier: Notifier::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Notifier) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn has_signer(&self) -> bool {
        self.ledger.is_some()
    }

    /// Snapshot of the visible list.
    pub fn credits(&self) -> Arc<Vec<TrackedCredit>> {
        self.credits.load_full()
    }

    pub fn credit(&self, record_id: &str) -> Option<TrackedCredit> {
        self.credits.load().iter().find(|c| c.id() == record_id).cloned()
    }

    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::SeqCst)
    }

    /// Record id of the retirement in flight, if any.
    pub fn in_flight(&self) -> Option<String> {
        self.in_flight.current()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn control_for(&self, credit: &TrackedCredit) -> RetireControl {
        if credit.is_retired() {
            return RetireControl::Hidden;
        }
        match self.in_flight() {
            Some(id) if id == credit.id() => RetireControl::Pending,
            Some(_) => RetireControl::Disabled,
            None if credit.state == RetirementState::Unknown => RetireControl::Disabled,
            None => RetireControl::Enabled,
        }
    }

    /// Load the buyer's purchases and check each one's status on-chain.
    ///
    /// The list is published twice: unchecked right after the store read,
    /// then once more after every status read has settled.
    pub async fn load(&self, buyer_id: &str) -> StoreResult<usize> {
        self.loading.store(true, Ordering::SeqCst);
        let result = self.load_and_check(buyer_id).await;
        self.loading.store(false, Ordering::SeqCst);
        result
    }

    async fn load_and_check(&self, buyer_id: &str) -> StoreResult<usize> {
        let fresh: Vec<TrackedCredit> = self
            .store
            .purchases_by_buyer(buyer_id)
            .await?
            .into_iter()
            .map(TrackedCredit::new)
            .collect();
        let count = fresh.len();
        self.publish(&fresh);

        let checked: Vec<TrackedCredit> = match &self.ledger {
            None => {
                tracing::debug!(buyer_id, count, "No signer; treating credits as active");
                fresh
                    .into_iter()
                    .map(|mut credit| {
                        credit.state = credit.state.observe(None);
                        credit
                    })
                    .collect()
            }
            Some(ledger) => {
                join_all(fresh.into_iter().map(|credit| check_status(ledger, credit))).await
            }
        };

        self.publish(&checked);
        metrics::record_credits_tracked(count);
        tracing::info!(
            buyer_id,
            count,
            retired = checked.iter().filter(|c| c.is_retired()).count(),
            "Credits reconciled"
        );
        Ok(count)
    }

    /// Swap in `next`, never regressing a credit that is already retired.
    fn publish(&self, next: &[TrackedCredit]) {
        self.credits.rcu(|current| {
            next.iter()
                .map(|credit| {
                    let prior = current.iter().find(|c| c.id() == credit.id());
                    TrackedCredit {
                        record: credit.record.clone(),
                        state: prior.map_or(credit.state, |p| p.state.merge(credit.state)),
                    }
                })
                .collect::<Vec<_>>()
        });
    }

    /// Retire one credit: submit, wait for confirmation, then mark it retired.
    ///
    /// Rejected immediately while another retirement is in flight.
    pub async fn retire(&self, record_id: &str) -> Result<RetirementReceipt, RetireError> {
        let credit = self
            .credit(record_id)
            .ok_or_else(|| RetireError::UnknownRecord(record_id.to_string()))?;
        match credit.state {
            RetirementState::Retired => {
                return Err(RetireError::AlreadyRetired(record_id.to_string()))
            }
            RetirementState::Unknown => {
                return Err(RetireError::StatusUnknown(record_id.to_string()))
            }
            RetirementState::Active => {}
        }

        let Some(guard) = self.in_flight.try_acquire(record_id) else {
            metrics::record_retirement("busy");
            return Err(RetireError::Busy(self.in_flight().unwrap_or_default()));
        };

        let Some(ledger) = &self.ledger else {
            drop(guard);
            self.notifier.send(Notification::connect_wallet());
            metrics::record_retirement("no_signer");
            return Err(RetireError::NoSigner);
        };

        tracing::info!(
            record_id,
            token_id = credit.record.token_id,
            contract = %credit.record.contract_address,
            "Retiring credit"
        );

        let result = ledger
            .retire(&credit.record.contract_address, credit.record.token_id)
            .await;

        if result.is_ok() {
            self.mark_retired(record_id);
        }
        drop(guard);

        match result {
            Ok(receipt) => {
                tracing::info!(record_id, tx_hash = %receipt.tx_hash, "Credit retired");
                metrics::record_retirement("success");
                self.notifier.send(Notification::retired());
                Ok(receipt)
            }
            Err(e) => {
                tracing::warn!(record_id, error = %e, "Retirement failed");
                metrics::record_retirement("failed");
                self.notifier.send(Notification::retire_failed(&e.detail()));
                Err(RetireError::Failed(e))
            }
        }
    }

    fn mark_retired(&self, record_id: &str) {
        self.credits.rcu(|current| {
            current
                .iter()
                .map(|credit| {
                    let mut credit = credit.clone();
                    if credit.id() == record_id {
                        credit.state = RetirementState::Retired;
                    }
                    credit
                })
                .collect::<Vec<_>>()
        });
    }
}

async fn check_status<L: CreditLedger>(ledger: &L, mut credit: TrackedCredit) -> TrackedCredit {
    let observed = match ledger
        .is_retired(&credit.record.contract_address, credit.record.token_id)
        .await
    {
        Ok(retired) => {
            metrics::record_status_check(if retired { "retired" } else { "active" });
            Some(retired)
        }
        Err(e) => {
            tracing::debug!(
                record_id = %credit.record.id,
                error = %e,
                "Status check failed; treating credit as active"
            );
            metrics::record_status_check("failed");
            None
        }
    };
    credit.state = credit.state.observe(observed);
    credit
}
