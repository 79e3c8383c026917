//! Startup orchestration.

use crate::config::DeskConfig;
use crate::contract::{ContractBinder, ContractError, ContractResult, InjectedWallet, OnChainLedger};
use crate::observability::{logging, metrics};
use crate::retirement::RetirementFlow;
use crate::store::ConfiguredStore;

/// The flow as wired by configuration.
pub type DeskFlow = RetirementFlow<OnChainLedger, ConfiguredStore>;

/// Initialize logging and, when enabled, the metrics exporter.
pub fn init_observability(config: &DeskConfig) {
    logging::init_logging(&config.observability.log_level);

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }
}

/// Build the on-chain ledger from the injected wallet.
///
/// Returns `Ok(None)` when no wallet is injected.
pub async fn connect_ledger(config: &DeskConfig) -> ContractResult<Option<OnChainLedger>> {
    let binder = ContractBinder::from_config(&config.contract)?;
    if binder.resolve_address().is_empty() {
        tracing::warn!("No default contract address; purchases must carry their own");
    }

    let wallet = InjectedWallet::from_env(&config.chain)?;
    match OnChainLedger::connect(wallet.as_ref(), binder, &config.chain).await {
        Ok(ledger) => {
            tracing::info!(signer = %ledger.signer().address(), "Ledger ready");
            Ok(Some(ledger))
        }
        Err(ContractError::Environment(reason)) => {
            tracing::warn!(%reason, "Running without a signer");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Wire store, ledger and flow from configuration.
pub async fn open_flow(config: &DeskConfig) -> ContractResult<DeskFlow> {
    let ledger = connect_ledger(config).await?;
    let store = ConfiguredStore::from_config(&config.store);
    Ok(RetirementFlow::new(store, ledger))
}
