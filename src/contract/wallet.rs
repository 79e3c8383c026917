//! Injected wallet, live connection and signer resolution.
//!
//! # Security
//! - Private keys are loaded ONLY from environment variables
//! - Keys are never logged or serialized
//!
//! The wallet is passed explicitly to every operation that needs chain
//! access; nothing here reads ambient state except `InjectedWallet::from_env`.

use std::fmt;

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use url::Url;

use crate::config::ChainConfig;
use crate::contract::types::{ChainId, ContractError, ContractResult};

/// Environment variable name for the private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "CARBON_WALLET_PRIVATE_KEY";

/// A wallet made available to the desk: a signing key plus the endpoint it
/// talks to.
#[derive(Clone)]
pub struct InjectedWallet {
    key: PrivateKeySigner,
    rpc_url: Url,
    chain_id: u64,
}

impl InjectedWallet {
    /// Create a wallet from a hex-encoded private key string.
    pub fn from_private_key(private_key_hex: &str, chain: &ChainConfig) -> ContractResult<Self> {
        let key_hex = private_key_hex.strip_prefix("0x").unwrap_or(private_key_hex);

        let key: PrivateKeySigner = key_hex.parse().map_err(|e| {
            ContractError::Configuration(format!("Invalid private key format: {}", e))
        })?;

        let rpc_url: Url = chain.rpc_url.parse().map_err(|e| {
            ContractError::Configuration(format!("Invalid RPC URL '{}': {}", chain.rpc_url, e))
        })?;

        tracing::info!(
            address = %key.address(),
            chain_id = chain.chain_id,
            "Wallet injected"
        );

        Ok(Self {
            key,
            rpc_url,
            chain_id: chain.chain_id,
        })
    }

    /// Load the wallet from `CARBON_WALLET_PRIVATE_KEY`.
    ///
    /// Returns `Ok(None)` when the variable is unset, which callers treat as
    /// "no wallet injected".
    pub fn from_env(chain: &ChainConfig) -> ContractResult<Option<Self>> {
        match std::env::var(PRIVATE_KEY_ENV_VAR) {
            Ok(key) if !key.trim().is_empty() => Self::from_private_key(key.trim(), chain).map(Some),
            _ => Ok(None),
        }
    }

    pub fn address(&self) -> Address {
        self.key.address()
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn rpc_url(&self) -> &Url {
        &self.rpc_url
    }
}

impl fmt::Debug for InjectedWallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InjectedWallet")
            .field("address", &self.key.address())
            .field("rpc_url", &self.rpc_url.as_str())
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// Live connection to an injected wallet.
#[derive(Clone)]
pub struct WalletConnection {
    provider: DynProvider,
    accounts: Vec<Address>,
    chain_id: u64,
}

impl WalletConnection {
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Accounts the wallet has authorized, in wallet order.
    pub fn accounts(&self) -> &[Address] {
        &self.accounts
    }

    /// Verify the connected chain ID matches the wallet's configuration.
    pub async fn verify_chain_id(&self) -> ContractResult<ChainId> {
        let actual = self
            .provider
            .get_chain_id()
            .await
            .map_err(|e| ContractError::Rpc(e.to_string()))?;
        if actual != self.chain_id {
            return Err(ContractError::ChainMismatch {
                expected: self.chain_id,
                actual,
            });
        }
        Ok(ChainId(actual))
    }

    /// The first authorized account as a signer.
    pub fn signer(&self) -> ContractResult<Signer> {
        let address = self.accounts.first().copied().ok_or_else(|| {
            ContractError::Environment("Wallet has no authorized accounts".to_string())
        })?;
        Ok(Signer {
            provider: self.provider.clone(),
            address,
        })
    }
}

impl fmt::Debug for WalletConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConnection")
            .field("accounts", &self.accounts)
            .field("chain_id", &self.chain_id)
            .finish()
    }
}

/// An authorized account able to send transactions.
#[derive(Clone)]
pub struct Signer {
    provider: DynProvider,
    address: Address,
}

impl Signer {
    pub fn address(&self) -> Address {
        self.address
    }

    /// Signing provider used to bind contracts.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("address", &self.address).finish()
    }
}

/// Open a connection to the injected wallet.
///
/// Fails with an environment error when no wallet is injected. A chain that
/// cannot be reached or reports a different chain ID is logged, not fatal.
pub async fn acquire_provider(wallet: Option<&InjectedWallet>) -> ContractResult<WalletConnection> {
    let wallet = wallet.ok_or_else(|| {
        ContractError::Environment(format!(
            "No wallet injected (set {})",
            PRIVATE_KEY_ENV_VAR
        ))
    })?;

    let provider = ProviderBuilder::new()
        .wallet(EthereumWallet::from(wallet.key.clone()))
        .connect_http(wallet.rpc_url.clone())
        .erased();

    let connection = WalletConnection {
        provider,
        accounts: vec![wallet.address()],
        chain_id: wallet.chain_id,
    };

    match connection.verify_chain_id().await {
        Ok(chain_id) => {
            tracing::info!(
                rpc_url = %wallet.rpc_url,
                chain_id = chain_id.0,
                chain = chain_id.name(),
                "Wallet connected"
            );
        }
        Err(e) => {
            tracing::warn!(error = %e, "Wallet connected but chain verification failed");
        }
    }

    Ok(connection)
}

/// Resolve the active signer from the injected wallet.
pub async fn acquire_signer(wallet: Option<&InjectedWallet>) -> ContractResult<Signer> {
    acquire_provider(wallet).await?.signer()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Well-known test private key (Anvil's first account)
    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    fn unreachable_chain() -> ChainConfig {
        ChainConfig {
            rpc_url: "http://127.0.0.1:1".to_string(),
            ..ChainConfig::default()
        }
    }

    #[test]
    fn test_wallet_from_private_key() {
        let wallet = InjectedWallet::from_private_key(TEST_PRIVATE_KEY, &ChainConfig::default()).unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
        assert_eq!(wallet.chain_id(), 31337);
    }

    #[test]
    fn test_wallet_with_0x_prefix() {
        let wallet =
            InjectedWallet::from_private_key(&format!("0x{}", TEST_PRIVATE_KEY), &ChainConfig::default())
                .unwrap();
        assert_eq!(
            wallet.address().to_string().to_lowercase(),
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"
        );
    }

    #[test]
    fn test_invalid_private_key() {
        let result = InjectedWallet::from_private_key("invalid_key", &ChainConfig::default());
        assert!(result.unwrap_err().to_string().contains("Invalid private key"));
    }

    #[test]
    fn test_debug_hides_key() {
        let wallet = InjectedWallet::from_private_key(TEST_PRIVATE_KEY, &ChainConfig::default()).unwrap();
        let debug = format!("{:?}", wallet);
        assert!(!debug.contains(TEST_PRIVATE_KEY));
    }

    #[tokio::test]
    async fn test_acquire_provider_without_wallet() {
        let err = acquire_provider(None).await.unwrap_err();
        assert!(matches!(err, ContractError::Environment(_)));
    }

    #[tokio::test]
    async fn test_acquire_signer_propagates_environment_error() {
        let err = acquire_signer(None).await.unwrap_err();
        assert!(err.to_string().contains(PRIVATE_KEY_ENV_VAR));
    }

    #[tokio::test]
    async fn test_acquire_signer_uses_first_account() {
        // The endpoint is unreachable; acquisition must still succeed.
        let wallet = InjectedWallet::from_private_key(TEST_PRIVATE_KEY, &unreachable_chain()).unwrap();
        let signer = acquire_signer(Some(&wallet)).await.unwrap();
        assert_eq!(signer.address(), wallet.address());
    }
}
