//! Pool trait definitions for a unified pricing interface

use ethers_core::types::U256;
use floorswap_types::{FeeTier, Quote, ReservePair, RoundingPolicy, TradeSize};

use crate::error::Result;
use crate::QuoteEngine;

/// Priceable view of a single pool
pub trait NftAmmPool {
    /// Cost of buying `amount` fractional units
    fn buy_quote(&self, amount: TradeSize) -> Result<Quote>;

    /// Proceeds of selling `amount` fractional units
    fn sell_quote(&self, amount: TradeSize) -> Result<Quote>;

    /// Reserves the quotes are computed from
    fn reserves(&self) -> ReservePair;

    /// Fee tier of the pool
    fn fee_tier(&self) -> FeeTier;

    /// Fee-free price of one whole unit
    fn spot_price(&self) -> Result<U256> {
        QuoteEngine::spot_price(&self.reserves())
    }
}

/// Reserves read at one moment plus the pool's fixed pricing terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub reserves: ReservePair,
    pub fee: FeeTier,
    pub rounding: RoundingPolicy,
}

impl PoolSnapshot {
    pub fn new(reserves: ReservePair, fee: FeeTier, rounding: RoundingPolicy) -> Self {
        Self {
            reserves,
            fee,
            rounding,
        }
    }
}

impl NftAmmPool for PoolSnapshot {
    fn buy_quote(&self, amount: TradeSize) -> Result<Quote> {
        QuoteEngine::quote_buy(&self.reserves, self.fee, self.rounding, amount)
    }

    fn sell_quote(&self, amount: TradeSize) -> Result<Quote> {
        QuoteEngine::quote_sell(&self.reserves, self.fee, amount)
    }

    fn reserves(&self) -> ReservePair {
        self.reserves
    }

    fn fee_tier(&self) -> FeeTier {
        self.fee
    }
}
