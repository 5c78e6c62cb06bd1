//! # Floorswap Types
//!
//! Data model shared by the quote engine and the swap orchestrator.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: every amount is a 256-bit integer in the smallest
//!   denomination of its asset, never a float
//! - **Type Safety**: unit identifiers, trade sizes and deadlines are distinct
//!   types so a token id cannot be passed where a fractional amount is expected
//! - **Ephemeral Values**: nothing here is persisted; every value is derived from
//!   a fresh on-chain read for a single trade
//!
//! ## Units
//!
//! ```text
//! 1 whole collection unit  ==  10^18 fractional units  (FRACTIONAL_SCALE)
//! TradeSize                ==  fractional units moved by one trade
//! UnitSelection            ==  TradeSize / 10^18 concrete token ids
//! ```
//!
//! ```rust
//! use floorswap_types::{TradeSize, FRACTIONAL_SCALE};
//!
//! let size = TradeSize::from_units(2);
//! assert_eq!(size.whole_units().unwrap(), 2);
//! assert_eq!(size.fractional().as_u64(), 2 * FRACTIONAL_SCALE);
//! ```

pub mod attestation;
pub mod deadline;
pub mod errors;
pub mod fee;
pub mod pool;
pub mod quote;
pub mod reserves;
pub mod units;

pub use attestation::{Attestation, SignedMessage};
pub use deadline::Deadline;
pub use errors::ValidationError;
pub use fee::{FeeTier, RoundingPolicy};
pub use pool::PoolKey;
pub use quote::{Direction, Quote};
pub use reserves::ReservePair;
pub use units::{TradeSize, UnitId, UnitSelection, FRACTIONAL_SCALE};

/// Ethereum primitives used throughout the data model
pub use ethers_core::types::{Address, Bytes, H256, U256};
