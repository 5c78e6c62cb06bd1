//! # Floorswap Configuration
//!
//! Explicit configuration for a trade run. The swap core never reads the
//! process environment; a driver loads a [`SwapConfig`] here and passes the
//! value into the orchestrator.
//!
//! ## Features
//!
//! - **Layered Loading**: base TOML file, optional per-environment overlay,
//!   then `FLOORSWAP_` environment variables (`__` separates nested keys)
//! - **Variable Expansion**: `${VAR}` references in endpoints and credentials
//! - **Network Presets**: chain ids, registry addresses and API hosts
//! - **Secret Redaction**: credentials never appear in `Debug` output or logs
//!
//! ## Usage
//!
//! ```no_run
//! use floorswap_config::SwapConfig;
//!
//! let config = SwapConfig::load(Some("config/floorswap.toml".as_ref()), None)?;
//! println!("trading on {}", config.network);
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod network;
pub mod secret;
pub mod settings;

pub use network::Network;
pub use secret::Secret;
pub use settings::{
    load_config, ConfirmationSettings, HoldingsSettings, OracleSettings, PoolSettings,
    SwapConfig, TradeSettings,
};
