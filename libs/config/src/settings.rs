//! Swap Configuration Module
//!
//! Loads the configuration value handed to the swap orchestrator and the
//! adapters. Supports a base TOML file with environment-specific overrides
//! and `FLOORSWAP_` environment variables.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};
use config_crate::{Config, Environment, File};
use floorswap_types::{Address, FeeTier, RoundingPolicy};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::network::{Network, DEFAULT_ORACLE_ENDPOINT, DEMO_ORACLE_API_KEY};
use crate::secret::Secret;

const DEFAULT_CONFIG_PATH: &str = "config/floorswap.toml";
const ENV_PREFIX: &str = "FLOORSWAP";

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SwapConfig {
    /// Network the trade runs on
    pub network: Network,

    /// JSON-RPC endpoint of the ledger
    pub ledger_endpoint: String,

    /// Private key of the trading wallet
    pub wallet_credential: Secret,

    /// Shared key for the attestation oracle
    #[serde(default = "default_oracle_api_key")]
    pub oracle_api_key: Secret,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Registry override; networks without a preset require it
    #[serde(default)]
    pub registry: Option<Address>,

    #[serde(default)]
    pub pool: PoolSettings,

    #[serde(default)]
    pub trade: TradeSettings,

    #[serde(default)]
    pub confirmation: ConfirmationSettings,

    #[serde(default)]
    pub oracle: OracleSettings,

    #[serde(default)]
    pub holdings: HoldingsSettings,
}

/// Fixed pricing terms of the pool variant being traded
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct PoolSettings {
    pub fee: FeeTier,
    pub rounding: RoundingPolicy,
    /// Whether the pool's swap functions take a deadline argument
    pub supports_deadline: bool,
}

/// Per-trade parameters
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct TradeSettings {
    /// Seconds between quoting and the on-chain deadline
    pub deadline_window_secs: u64,
    /// Tolerance applied to the submitted bound; 0 submits the exact quote
    pub slippage_bps: u32,
}

/// Transaction confirmation polling
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(default)]
pub struct ConfirmationSettings {
    pub poll_interval_ms: u64,
    pub timeout_secs: u64,
}

/// Attestation oracle endpoint
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OracleSettings {
    pub endpoint: String,
    pub timeout_ms: u64,
}

/// Unit-ownership index endpoint
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct HoldingsSettings {
    /// Defaults to the network's preset host
    pub endpoint: Option<String>,
    pub api_key: Option<Secret>,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            fee: FeeTier::ONE_PERCENT,
            rounding: RoundingPolicy::Ceil,
            supports_deadline: true,
        }
    }
}

impl Default for TradeSettings {
    fn default() -> Self {
        Self {
            deadline_window_secs: 3600,
            slippage_bps: 0,
        }
    }
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            timeout_secs: 300,
        }
    }
}

impl Default for OracleSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ORACLE_ENDPOINT.to_string(),
            timeout_ms: 10_000,
        }
    }
}

fn default_oracle_api_key() -> Secret {
    Secret::new(DEMO_ORACLE_API_KEY)
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ConfirmationSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl SwapConfig {
    /// Load configuration from files with environment overrides
    ///
    /// `environment` selects `environments/<name>.toml` next to the base file.
    pub fn load(base_path: Option<&Path>, environment: Option<&str>) -> Result<Self> {
        let base = base_path.unwrap_or(Path::new(DEFAULT_CONFIG_PATH));

        let mut builder = Config::builder().add_source(File::from(base).required(true));

        if let Some(env) = environment {
            let env_file = base
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
                .join("environments")
                .join(format!("{env}.toml"));

            if env_file.exists() {
                info!("Loading environment config: {:?}", env_file);
                builder = builder.add_source(File::from(env_file));
            } else {
                warn!("Environment config not found: {:?}", env_file);
            }
        }

        // Override with environment variables (FLOORSWAP_TRADE__SLIPPAGE_BPS, ...)
        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", base.display()))?;

        let mut swap_config: SwapConfig = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        swap_config.expand_env_vars()?;

        debug!(network = %swap_config.network, "configuration loaded");
        Ok(swap_config)
    }

    /// Expand `${VAR}` references in endpoints and credentials
    pub fn expand_env_vars(&mut self) -> Result<()> {
        self.ledger_endpoint = shellexpand::env(&self.ledger_endpoint)
            .context("Failed to expand ledger endpoint")?
            .into_owned();

        self.wallet_credential
            .expand()
            .context("Failed to expand wallet credential")?;

        self.oracle_api_key
            .expand()
            .context("Failed to expand oracle API key")?;

        self.oracle.endpoint = shellexpand::env(&self.oracle.endpoint)
            .context("Failed to expand oracle endpoint")?
            .into_owned();

        if let Some(endpoint) = &self.holdings.endpoint {
            let expanded =
                shellexpand::env(endpoint).context("Failed to expand holdings endpoint")?;
            self.holdings.endpoint = Some(expanded.into_owned());
        }

        if let Some(key) = self.holdings.api_key.as_mut() {
            key.expand().context("Failed to expand holdings API key")?;
        }

        Ok(())
    }

    /// Check cross-field constraints that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.ledger_endpoint.trim().is_empty() {
            bail!("ledger_endpoint must not be empty");
        }
        if self.wallet_credential.is_empty() {
            bail!("wallet_credential must not be empty");
        }
        if self.trade.slippage_bps > 10_000 {
            bail!(
                "trade.slippage_bps {} exceeds 10000 (100%)",
                self.trade.slippage_bps
            );
        }
        if self.confirmation.poll_interval_ms == 0 {
            bail!("confirmation.poll_interval_ms must be positive");
        }
        self.registry_address()?;
        Ok(())
    }

    /// Registry to resolve pools through
    pub fn registry_address(&self) -> Result<Address> {
        match self.registry.or_else(|| self.network.default_registry()) {
            Some(address) => Ok(address),
            None => bail!(
                "No pool registry known for network {}; set `registry`",
                self.network
            ),
        }
    }

    /// Holdings index base URL
    pub fn holdings_endpoint(&self) -> String {
        self.holdings
            .endpoint
            .clone()
            .unwrap_or_else(|| self.network.holdings_host().to_string())
    }

    pub fn chain_id(&self) -> u64 {
        self.network.chain_id()
    }
}

/// Convenience function to load configuration from the default location
pub fn load_config(path: Option<PathBuf>, environment: Option<&str>) -> Result<SwapConfig> {
    let config = SwapConfig::load(path.as_deref(), environment)?;
    config.validate()?;
    Ok(config)
}
