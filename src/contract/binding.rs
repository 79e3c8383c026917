//! Contract handle construction.
//!
//! Pure construction: no retries, no caching, no ABI checks beyond trusting
//! the static artifact.

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes};
use alloy::providers::{DynProvider, Provider};
use alloy::rpc::types::TransactionRequest;

use crate::config::ContractConfig;
use crate::contract::abi::{Artifact, CarbonCreditNFT};
use crate::contract::types::{ContractError, ContractResult};
use crate::contract::wallet::Signer;

/// Build-time environment variable carrying the default contract address.
pub const ADDRESS_ENV_VAR: &str = "CARBON_CREDIT_NFT_ADDRESS";

/// Typed handle to a deployed credit contract.
pub type CreditContract = CarbonCreditNFT::CarbonCreditNFTInstance<DynProvider>;

/// Address baked in at build time, if any.
pub fn build_time_address() -> Option<&'static str> {
    option_env!("CARBON_CREDIT_NFT_ADDRESS")
}

/// Produces contract and factory handles for a signer.
#[derive(Debug, Clone)]
pub struct ContractBinder {
    default_address: String,
    artifact: Artifact,
}

impl ContractBinder {
    pub fn new(default_address: impl Into<String>, artifact: Artifact) -> Self {
        Self {
            default_address: default_address.into(),
            artifact,
        }
    }

    /// Build a binder from configuration, falling back to the build-time
    /// address and the embedded artifact.
    pub fn from_config(config: &ContractConfig) -> ContractResult<Self> {
        let default_address = config
            .address
            .clone()
            .filter(|a| !a.is_empty())
            .or_else(|| build_time_address().map(str::to_string))
            .unwrap_or_default();

        let artifact = match &config.artifact_path {
            Some(path) => Artifact::from_path(path)?,
            None => Artifact::embedded()?,
        };

        Ok(Self::new(default_address, artifact))
    }

    /// The configured default address; empty when none is configured.
    pub fn resolve_address(&self) -> &str {
        &self.default_address
    }

    pub fn artifact(&self) -> &Artifact {
        &self.artifact
    }

    /// Bind the credit contract at `address`, or at the default address.
    pub fn bind(&self, signer: &Signer, address: Option<&str>) -> ContractResult<CreditContract> {
        let address = address
            .filter(|a| !a.is_empty())
            .unwrap_or(self.resolve_address());
        if address.is_empty() {
            return Err(ContractError::Configuration(format!(
                "Contract address is required (pass address or set {})",
                ADDRESS_ENV_VAR
            )));
        }

        let address: Address = address.parse().map_err(|e| {
            ContractError::Configuration(format!("Invalid contract address '{}': {}", address, e))
        })?;

        Ok(CarbonCreditNFT::new(address, signer.provider().clone()))
    }

    /// A factory able to deploy new instances of the artifact.
    pub fn factory(&self, signer: &Signer) -> ContractResult<CreditFactory> {
        if !self.artifact.has_bytecode() {
            return Err(ContractError::Configuration(format!(
                "{} bytecode not found in artifact",
                self.artifact_name()
            )));
        }
        Ok(CreditFactory {
            bytecode: self.artifact.bytecode.clone(),
            signer: signer.clone(),
        })
    }

    fn artifact_name(&self) -> &str {
        if self.artifact.contract_name.is_empty() {
            "CarbonCreditNFT"
        } else {
            &self.artifact.contract_name
        }
    }
}

/// Deploys the credit contract from the artifact bytecode.
#[derive(Debug, Clone)]
pub struct CreditFactory {
    bytecode: Bytes,
    signer: Signer,
}

impl CreditFactory {
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Send the creation transaction and wait for its receipt.
    ///
    /// `constructor_args` must already be ABI-encoded.
    pub async fn deploy(&self, constructor_args: Bytes) -> ContractResult<Address> {
        let mut code = self.bytecode.to_vec();
        code.extend_from_slice(&constructor_args);

        let tx = TransactionRequest::default()
            .with_from(self.signer.address())
            .with_deploy_code(Bytes::from(code));

        let pending = self
            .signer
            .provider()
            .send_transaction(tx)
            .await
            .map_err(|e| ContractError::Transaction(e.to_string()))?;
        let tx_hash = *pending.tx_hash();
        tracing::info!(tx_hash = %tx_hash, "Deployment submitted");

        let receipt = pending
            .get_receipt()
            .await
            .map_err(|e| ContractError::Transaction(e.to_string()))?;

        if !receipt.status() {
            return Err(ContractError::Reverted(format!("deployment {} reverted", tx_hash)));
        }

        let address = receipt.contract_address.ok_or_else(|| {
            ContractError::Transaction(format!("receipt for {} has no contract address", tx_hash))
        })?;
        tracing::info!(address = %address, "Contract deployed");
        Ok(address)
    }
}
