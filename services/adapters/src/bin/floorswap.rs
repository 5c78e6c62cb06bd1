//! Floorswap CLI
//!
//! Usage:
//!   floorswap buy --units 2 --collection 0x...
//!   floorswap --env mainnet sell --units 1 --collection 0x... --wait
//!   floorswap --json-logs buy --units 1 --collection 0x... --base-asset 0x...

use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use floorswap_adapters::wiring;
use floorswap_config::{load_config, SwapConfig};
use floorswap_types::{Address, PoolKey, H256};
use swap_orchestrator::{SwapOrchestrator, SwapReceipt, SwapRequest};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "floorswap")]
#[command(about = "Quote and execute NFT floor pool swaps")]
#[command(version)]
struct Args {
    /// Base configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Environment overlay (config/environments/<NAME>.toml)
    #[arg(short, long, global = true)]
    env: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Buy whole units out of the pool
    Buy(TradeArgs),
    /// Sell whole units into the pool
    Sell(TradeArgs),
}

#[derive(clap::Args, Debug)]
struct TradeArgs {
    /// Number of whole collection units
    #[arg(short, long)]
    units: u64,

    /// Collection contract address
    #[arg(long)]
    collection: String,

    /// Base asset address; the zero address means the native asset
    #[arg(long, default_value = "0x0000000000000000000000000000000000000000")]
    base_asset: String,

    /// Eligibility merkle root of a restricted pool
    #[arg(long)]
    eligibility_root: Option<String>,

    /// Wait for the swap transaction to be mined
    #[arg(long)]
    wait: bool,
}

impl TradeArgs {
    fn pool_key(&self) -> Result<PoolKey> {
        let collection = parse_address("collection", &self.collection)?;
        let base_asset = parse_address("base asset", &self.base_asset)?;
        let eligibility_root = match &self.eligibility_root {
            Some(raw) => H256::from_str(raw.trim_start_matches("0x"))
                .with_context(|| format!("Invalid eligibility root: {}", raw))?,
            None => H256::zero(),
        };
        Ok(PoolKey::new(collection, base_asset, eligibility_root))
    }
}

fn parse_address(label: &str, raw: &str) -> Result<Address> {
    Address::from_str(raw.trim_start_matches("0x"))
        .with_context(|| format!("Invalid {} address: {}", label, raw))
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = load_config(args.config.clone(), args.env.as_deref())?;
    init_logging(&config, args.json_logs);

    info!("🚀 Starting floorswap on {:?}", config.network);

    let (request, wait) = match &args.command {
        Command::Buy(trade) => (SwapRequest::buy(trade.pool_key()?, trade.units), trade.wait),
        Command::Sell(trade) => (SwapRequest::sell(trade.pool_key()?, trade.units), trade.wait),
    };

    let (collaborators, ledger) = wiring::connect(&config)?;
    let orchestrator = SwapOrchestrator::new(&config, collaborators);

    let receipt = match orchestrator.execute(request).await {
        Ok(receipt) => receipt,
        Err(e) => {
            error!(
                kind = %e.kind(),
                retryable = e.is_retryable(),
                "Swap failed: {}",
                e
            );
            bail!("{}: {}", e.kind(), e);
        }
    };
    report(&receipt);

    if wait {
        info!("⏱️ Waiting for 0x{:x}", receipt.tx_hash);
        let confirmation = ledger
            .wait(receipt.tx_hash)
            .await
            .context("Swap confirmation failed")?;
        if !confirmation.succeeded {
            bail!("Swap transaction 0x{:x} reverted on chain", receipt.tx_hash);
        }
        info!(
            "✅ Swap mined in block {}",
            confirmation
                .block_number
                .map_or_else(|| "unknown".to_string(), |block| block.to_string())
        );
    }

    Ok(())
}

fn init_logging(config: &SwapConfig, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));

    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

fn report(receipt: &SwapReceipt) {
    info!("📋 {} on pool {:?}", receipt.direction, receipt.pool);
    info!("   reserves: {}", receipt.reserves);
    info!("   quote: {}", receipt.quote);
    info!("   bound: {}  value: {}", receipt.bound, receipt.value);
    info!("   units: {:?}", receipt.units);
    if let Some(deadline) = receipt.deadline {
        info!("   deadline: {}", deadline);
    } else {
        warn!("   pool has no deadline guard");
    }
    if let Some(approval) = receipt.approval_tx {
        info!("   approval tx: 0x{:x}", approval);
    }
    info!("   swap tx: 0x{:x}", receipt.tx_hash);
}
