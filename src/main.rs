//! carbon-desk
//!
//! Buyer dashboard for carbon-credit NFTs: offset progress, on-chain
//! retirement status, and retiring a credit.
//!
//! # Architecture Overview
//!
//! ```text
//!   config.toml ──▶ lifecycle::startup ──▶ RetirementFlow
//!                        │                    │        │
//!   CARBON_WALLET_  ─────┘          PurchaseStore   CreditLedger
//!   PRIVATE_KEY                   (file / http)    (OnChainLedger)
//!                                                        │
//!                                              CarbonCreditNFT contract
//! ```

use std::path::{Path, PathBuf};

use alloy::primitives::Bytes;
use clap::{Parser, Subcommand};
use serde_json::json;

use carbon_desk::config::{load_config, DeskConfig};
use carbon_desk::contract::CreditLedger;
use carbon_desk::lifecycle::{connect_ledger, init_observability, open_flow};
use carbon_desk::retirement::DashboardView;
use carbon_desk::store::PurchaseStore;

const DEFAULT_CONFIG: &str = "carbon-desk.toml";

#[derive(Parser)]
#[command(name = "carbon-desk")]
#[command(about = "Track carbon offsets and retire purchased credits", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./carbon-desk.toml when present).
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show offset progress and purchased credits
    Dashboard {
        #[arg(long)]
        buyer: String,
    },
    /// Retire one purchased credit
    Retire {
        #[arg(long)]
        buyer: String,
        #[arg(long)]
        purchase: String,
    },
    /// Read the on-chain retirement status of a token
    Status {
        #[arg(long)]
        token: u64,
        #[arg(long)]
        contract: Option<String>,
    },
    /// Deploy the credit contract from the artifact
    Deploy,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(cli.config.as_deref())?;
    init_observability(&config);

    tracing::debug!(
        rpc_url = %config.chain.rpc_url,
        chain_id = config.chain.chain_id,
        "Configuration loaded"
    );

    match cli.command {
        Commands::Dashboard { buyer } => {
            let flow = open_flow(&config).await?;
            let profile = flow.store().buyer_profile(&buyer).await?;
            flow.load(&buyer).await?;
            print_json(&DashboardView::build(&profile, &flow))?;
        }
        Commands::Retire { buyer, purchase } => {
            let flow = open_flow(&config).await?;
            flow.load(&buyer).await?;
            let mut notifications = flow.subscribe();

            let outcome = flow.retire(&purchase).await;
            let notification = notifications.try_recv().ok();
            match outcome {
                Ok(receipt) => print_json(&json!({
                    "retired": true,
                    "receipt": receipt,
                    "notification": notification,
                }))?,
                Err(e) => {
                    print_json(&json!({
                        "retired": false,
                        "error": e.to_string(),
                        "notification": notification,
                    }))?;
                    std::process::exit(1);
                }
            }
        }
        Commands::Status { token, contract } => {
            let ledger = connect_ledger(&config)
                .await?
                .ok_or("no wallet injected; set CARBON_WALLET_PRIVATE_KEY")?;
            let retired = ledger
                .is_retired(contract.as_deref().unwrap_or(""), token)
                .await?;
            print_json(&json!({ "token_id": token, "retired": retired }))?;
        }
        Commands::Deploy => {
            let ledger = connect_ledger(&config)
                .await?
                .ok_or("no wallet injected; set CARBON_WALLET_PRIVATE_KEY")?;
            let factory = ledger.binder().factory(ledger.signer())?;
            let address = factory.deploy(Bytes::new()).await?;
            print_json(&json!({ "address": address }))?;
        }
    }

    Ok(())
}

fn resolve_config(path: Option<&Path>) -> Result<DeskConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(load_config(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Ok(load_config(Path::new(DEFAULT_CONFIG))?),
        None => Ok(DeskConfig::default()),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
