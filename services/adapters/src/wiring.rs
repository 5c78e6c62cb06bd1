//! Build the full collaborator set from configuration

use std::sync::Arc;

use anyhow::{Context, Result};
use floorswap_config::SwapConfig;
use swap_orchestrator::{Collaborators, Ledger, SystemClock};
use tracing::info;

use crate::contracts::{Erc20Allowance, Erc721Approval, PairContract, RegistryContract};
use crate::holdings::AlchemyHoldings;
use crate::ledger::EthersLedger;
use crate::oracle::ReservoirOracle;

/// Collaborators backed by the configured network and HTTP APIs
///
/// Returns the ledger separately so drivers can wait on the swap transaction.
pub fn connect(config: &SwapConfig) -> Result<(Collaborators, Arc<dyn Ledger>)> {
    let registry = config.registry_address()?;
    let ledger: Arc<dyn Ledger> = Arc::new(EthersLedger::connect(config)?);

    let holdings = AlchemyHoldings::from_config(config).context("Holdings index setup failed")?;
    let oracle = ReservoirOracle::from_config(config).context("Oracle setup failed")?;

    info!(
        "✅ Collaborators ready: registry={:?}, deadline={}, oracle={}",
        registry, config.pool.supports_deadline, config.oracle.endpoint
    );

    let collaborators = Collaborators {
        ledger: ledger.clone(),
        registry: Arc::new(RegistryContract::new(ledger.clone(), registry)),
        pair: Arc::new(PairContract::new(
            ledger.clone(),
            config.pool.supports_deadline,
        )),
        approval: Arc::new(Erc721Approval::new(ledger.clone())),
        allowance: Arc::new(Erc20Allowance::new(ledger.clone())),
        holdings: Arc::new(holdings),
        oracle: Arc::new(oracle),
        clock: Arc::new(SystemClock),
    };
    Ok((collaborators, ledger))
}
