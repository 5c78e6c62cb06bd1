//! Ethers-backed ledger with a signing wallet
//!
//! Reads go through `eth_call`, writes are signed locally and broadcast, and
//! confirmation is observed by polling for the receipt.

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use ethers::middleware::SignerMiddleware;
use ethers::prelude::*;
use ethers::providers::Http;
use ethers::types::transaction::eip2718::TypedTransaction;
use floorswap_config::SwapConfig;
use swap_orchestrator::{CollaboratorError, CollaboratorResult, Confirmation, Ledger};
use tracing::{debug, info, warn};
use url::Url;

use crate::error::middleware_error;

type Client = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Ledger over JSON-RPC, signing with a local wallet
pub struct EthersLedger {
    client: Arc<Client>,
    poll_interval: Duration,
    confirmation_timeout: Duration,
}

impl EthersLedger {
    /// Connect to `config.ledger_endpoint` and load the trading wallet
    pub fn connect(config: &SwapConfig) -> Result<Self> {
        // Pooled keep-alive client, same tuning as the other RPC consumers
        let http_client = reqwest::Client::builder()
            .pool_idle_timeout(Duration::from_secs(60))
            .pool_max_idle_per_host(5)
            .timeout(Duration::from_secs(30))
            .tcp_keepalive(Duration::from_secs(60))
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        let url: Url = config
            .ledger_endpoint
            .parse()
            .context("Invalid ledger endpoint URL")?;
        let provider = Provider::new(Http::new_with_client(url, http_client))
            .interval(config.confirmation.poll_interval());

        let wallet = config
            .wallet_credential
            .expose()
            .parse::<LocalWallet>()
            .context("Invalid wallet credential")?
            .with_chain_id(config.chain_id());

        info!(
            "🌐 Ledger connected: network={}, sender={:?}",
            config.network,
            wallet.address()
        );

        Ok(Self {
            client: Arc::new(SignerMiddleware::new(provider, wallet)),
            poll_interval: config.confirmation.poll_interval(),
            confirmation_timeout: config.confirmation.timeout(),
        })
    }
}

#[async_trait]
impl Ledger for EthersLedger {
    fn sender(&self) -> Address {
        self.client.address()
    }

    async fn call(&self, contract: Address, calldata: Bytes) -> CollaboratorResult<Bytes> {
        let tx: TypedTransaction = TransactionRequest::new()
            .from(self.sender())
            .to(contract)
            .data(calldata)
            .into();
        self.client.call(&tx, None).await.map_err(middleware_error)
    }

    async fn send(
        &self,
        contract: Address,
        calldata: Bytes,
        value: U256,
    ) -> CollaboratorResult<H256> {
        let tx = TransactionRequest::new()
            .to(contract)
            .data(calldata)
            .value(value);
        let pending = self
            .client
            .send_transaction(tx, None)
            .await
            .map_err(middleware_error)?;
        let tx_hash = pending.tx_hash();
        debug!("Broadcast transaction 0x{:x}", tx_hash);
        Ok(tx_hash)
    }

    async fn wait(&self, tx_hash: H256) -> CollaboratorResult<Confirmation> {
        let started = Instant::now();
        loop {
            if started.elapsed() > self.confirmation_timeout {
                return Err(CollaboratorError::Transport(format!(
                    "transaction 0x{:x} not mined within {}s",
                    tx_hash,
                    self.confirmation_timeout.as_secs()
                )));
            }

            match self.client.get_transaction_receipt(tx_hash).await {
                Ok(Some(receipt)) => {
                    let confirmation = Confirmation {
                        tx_hash,
                        block_number: receipt.block_number.map(|block| block.as_u64()),
                        succeeded: receipt.status == Some(U64::one()),
                    };
                    debug!(?confirmation, "receipt observed");
                    return Ok(confirmation);
                }
                Ok(None) => {}
                Err(e) => warn!("Error checking transaction receipt: {}", e),
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
