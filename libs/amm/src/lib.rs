//! # Floorswap AMM Library - Exact Constant-Product Pricing
//!
//! ## Purpose
//!
//! Prices discrete trades against a pool holding a base asset and the
//! fractional representation of one NFT collection. Every result is an exact
//! integer that matches the pool contract's own arithmetic: buys round up so
//! the trader is never under-quoted, sells round down so the trader is never
//! over-quoted.
//!
//! ## Formulas
//!
//! ```text
//! buy  (exact output): cost     = amount * base * den / ((fractional - amount) * num)   rounded up
//! sell (exact input):  proceeds = amount * num * base / (fractional * den + amount * num) rounded down
//! ```
//!
//! `num / den` is the [`FeeTier`]. Intermediates are computed in 512 bits, so
//! no valid 256-bit reserve state can overflow before the final narrowing.
//!
//! ## Integration Points
//!
//! - **Input Sources**: reserve reads performed by the swap orchestrator
//! - **Output Destinations**: submission bounds (`maxCost` / `minProceeds`)
//! - **Rounding**: [`RoundingPolicy::Ceil`] or [`RoundingPolicy::TruncatePlusOne`]
//!   depending on the pool variant

pub mod error;
pub mod math;
pub mod pool_traits;
pub mod quote_engine;

pub use error::{QuoteError, Result};
pub use pool_traits::{NftAmmPool, PoolSnapshot};
pub use quote_engine::QuoteEngine;

/// Common types for quote calculations
pub use floorswap_types::{FeeTier, Quote, ReservePair, RoundingPolicy, TradeSize};
