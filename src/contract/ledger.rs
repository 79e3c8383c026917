//! Retirement status reads and retire transactions.
//!
//! `CreditLedger` is the seam the retirement flow talks to; `OnChainLedger`
//! is the implementation backed by a signer and the credit contract.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use alloy::primitives::U256;
use tokio::time::timeout;

use crate::config::ChainConfig;
use crate::contract::binding::ContractBinder;
use crate::contract::types::{ContractError, ContractResult, RetirementReceipt};
use crate::contract::wallet::{acquire_signer, InjectedWallet, Signer};

/// Read and write access to credit retirement state.
pub trait CreditLedger: Send + Sync {
    /// Whether `token_id` on `contract` has been retired. An empty contract
    /// address means the default one.
    fn is_retired(
        &self,
        contract: &str,
        token_id: u64,
    ) -> impl Future<Output = ContractResult<bool>> + Send;

    /// Submit `retire(token_id)` and wait for its confirmation.
    fn retire(
        &self,
        contract: &str,
        token_id: u64,
    ) -> impl Future<Output = ContractResult<RetirementReceipt>> + Send;
}

impl<L: CreditLedger> CreditLedger for Arc<L> {
    fn is_retired(
        &self,
        contract: &str,
        token_id: u64,
    ) -> impl Future<Output = ContractResult<bool>> + Send {
        (**self).is_retired(contract, token_id)
    }

    fn retire(
        &self,
        contract: &str,
        token_id: u64,
    ) -> impl Future<Output = ContractResult<RetirementReceipt>> + Send {
        (**self).retire(contract, token_id)
    }
}

/// Ledger backed by the on-chain credit contract.
#[derive(Debug, Clone)]
pub struct OnChainLedger {
    signer: Signer,
    binder: ContractBinder,
    confirmations: u64,
    tx_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
}

impl OnChainLedger {
    pub fn new(signer: Signer, binder: ContractBinder, chain: &ChainConfig) -> Self {
        Self {
            signer,
            binder,
            confirmations: chain.confirmation_blocks.max(1),
            tx_timeout: secs(chain.tx_timeout_secs),
            read_timeout: secs(chain.rpc_timeout_secs),
        }
    }

    /// Acquire the signer from the injected wallet and build the ledger.
    pub async fn connect(
        wallet: Option<&InjectedWallet>,
        binder: ContractBinder,
        chain: &ChainConfig,
    ) -> ContractResult<Self> {
        let signer = acquire_signer(wallet).await?;
        Ok(Self::new(signer, binder, chain))
    }

    pub fn signer(&self) -> &Signer {
        &self.signer
    }

    pub fn binder(&self) -> &ContractBinder {
        &self.binder
    }
}

impl CreditLedger for OnChainLedger {
    async fn is_retired(&self, contract: &str, token_id: u64) -> ContractResult<bool> {
        let handle = self.binder.bind(&self.signer, Some(contract))?;
        let read = async {
            handle
                .retired(U256::from(token_id))
                .call()
                .await
                .map_err(|e| ContractError::Rpc(e.to_string()))
        };
        bounded(self.read_timeout, read).await
    }

    async fn retire(&self, contract: &str, token_id: u64) -> ContractResult<RetirementReceipt> {
        let handle = self.binder.bind(&self.signer, Some(contract))?;

        let pending = handle
            .retire(U256::from(token_id))
            .send()
            .await
            .map_err(|e| ContractError::Transaction(e.to_string()))?;
        let tx_hash = *pending.tx_hash();

        tracing::info!(
            tx_hash = %tx_hash,
            contract = %handle.address(),
            token_id = token_id,
            "Retire transaction submitted"
        );

        let receipt = pending
            .with_required_confirmations(self.confirmations)
            .with_timeout(self.tx_timeout)
            .get_receipt()
            .await
            .map_err(|e| ContractError::Transaction(e.to_string()))?;

        if !receipt.status() {
            return Err(ContractError::Reverted(format!(
                "retire({}) reverted in {}",
                token_id, tx_hash
            )));
        }

        Ok(RetirementReceipt {
            tx_hash,
            block_number: receipt.block_number,
        })
    }
}

fn secs(value: u64) -> Option<Duration> {
    (value > 0).then(|| Duration::from_secs(value))
}

async fn bounded<T>(
    limit: Option<Duration>,
    fut: impl Future<Output = ContractResult<T>>,
) -> ContractResult<T> {
    match limit {
        None => fut.await,
        Some(limit) => timeout(limit, fut)
            .await
            .unwrap_or_else(|_| Err(ContractError::Timeout(limit.as_secs()))),
    }
}
