//! Constant-product quotes with exact integer rounding
//!
//! Mirrors the pool contract's arithmetic bit for bit. Any deviation in
//! rounding direction either overcharges the trader or lets the pool be
//! drained one wei at a time, so every division states its direction.

use ethers_core::types::{U256, U512};
use floorswap_types::{
    Direction, FeeTier, Quote, ReservePair, RoundingPolicy, TradeSize, FRACTIONAL_SCALE,
};
use tracing::trace;

use crate::error::{QuoteError, Result};
use crate::math::{div_ceil, div_floor, narrow, product};

const BPS_SCALE: u64 = 10_000;

/// Pure pricing functions; no state, no I/O
pub struct QuoteEngine;

impl QuoteEngine {
    /// Base-asset cost of removing `amount` fractional units from the pool
    ///
    /// `cost = amount * base * den / ((fractional - amount) * num)`, rounded
    /// according to `rounding`. The fee shrinks the effective liquidity, which
    /// raises the cost.
    ///
    /// # Errors
    /// * [`QuoteError::InvalidAmount`] when `amount` is zero
    /// * [`QuoteError::InsufficientLiquidity`] when `amount >= fractional_reserve`
    pub fn quote_buy(
        reserves: &ReservePair,
        fee: FeeTier,
        rounding: RoundingPolicy,
        amount: TradeSize,
    ) -> Result<Quote> {
        let amount = amount.fractional();
        if amount.is_zero() {
            return Err(QuoteError::InvalidAmount);
        }
        if amount >= reserves.fractional_reserve {
            return Err(QuoteError::InsufficientLiquidity {
                requested: amount,
                available: reserves.fractional_reserve,
            });
        }

        let numerator = product(
            amount,
            reserves.base_reserve,
            U256::from(fee.denominator()),
            "buy numerator",
        )?;
        // fractional_reserve > amount and num > 0, so this is at least 1
        let denominator =
            (reserves.fractional_reserve - amount).full_mul(U256::from(fee.numerator()));

        let cost = match rounding {
            RoundingPolicy::Ceil => div_ceil(numerator, denominator),
            RoundingPolicy::TruncatePlusOne => div_floor(numerator, denominator)
                .checked_add(U512::one())
                .ok_or(QuoteError::Overflow {
                    operation: "buy correction unit",
                })?,
        };
        let cost = narrow(cost, "buy cost")?;

        trace!(%amount, %cost, fee = %fee, policy = rounding.description(), "priced buy");
        Ok(Quote::buy(cost))
    }

    /// Base-asset proceeds of adding `amount` fractional units to the pool
    ///
    /// `proceeds = amount * num * base / (fractional * den + amount * num)`,
    /// rounded down. Selling only grows the fractional reserve, so there is
    /// no liquidity bound.
    ///
    /// # Errors
    /// * [`QuoteError::InvalidAmount`] when `amount` is zero
    pub fn quote_sell(reserves: &ReservePair, fee: FeeTier, amount: TradeSize) -> Result<Quote> {
        let amount = amount.fractional();
        if amount.is_zero() {
            return Err(QuoteError::InvalidAmount);
        }

        let fee_numerator = U256::from(fee.numerator());
        let numerator = product(
            amount,
            fee_numerator,
            reserves.base_reserve,
            "sell numerator",
        )?;
        let denominator = reserves
            .fractional_reserve
            .full_mul(U256::from(fee.denominator()))
            .checked_add(amount.full_mul(fee_numerator))
            .ok_or(QuoteError::Overflow {
                operation: "sell denominator",
            })?;

        let proceeds = narrow(div_floor(numerator, denominator), "sell proceeds")?;

        trace!(%amount, %proceeds, fee = %fee, "priced sell");
        Ok(Quote::sell(proceeds))
    }

    /// Marginal price of one whole unit, in base-asset units, ignoring fees
    ///
    /// Used for reporting only; rounded down.
    pub fn spot_price(reserves: &ReservePair) -> Result<U256> {
        if reserves.fractional_reserve.is_zero() {
            return Err(QuoteError::InsufficientLiquidity {
                requested: U256::from(FRACTIONAL_SCALE),
                available: U256::zero(),
            });
        }
        let numerator = reserves
            .base_reserve
            .full_mul(U256::from(FRACTIONAL_SCALE));
        narrow(
            div_floor(numerator, U512::from(reserves.fractional_reserve)),
            "spot price",
        )
    }

    /// Submission bound after applying a slippage tolerance to a quote
    ///
    /// Buys widen upward (`maxCost`, rounded up), sells narrow downward
    /// (`minProceeds`, rounded down). Tolerances above 100% clamp to 100%.
    pub fn bound_with_slippage(quote: &Quote, slippage_bps: u32) -> Result<U256> {
        if slippage_bps == 0 {
            return Ok(quote.amount);
        }
        let tolerance = u64::from(slippage_bps).min(BPS_SCALE);
        let scale = U512::from(BPS_SCALE);

        let bound = match quote.direction {
            Direction::Buy => div_ceil(
                quote.amount.full_mul(U256::from(BPS_SCALE + tolerance)),
                scale,
            ),
            Direction::Sell => div_floor(
                quote.amount.full_mul(U256::from(BPS_SCALE - tolerance)),
                scale,
            ),
        };
        narrow(bound, "slippage bound")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ether(units: u64) -> U256 {
        U256::from(units) * U256::exp10(18)
    }

    fn reserves(base: u64, fractional: u64) -> ReservePair {
        ReservePair::new(ether(base), ether(fractional))
    }

    #[test]
    fn test_buy_fixture_one_percent() {
        let quote = QuoteEngine::quote_buy(
            &reserves(10, 20),
            FeeTier::ONE_PERCENT,
            RoundingPolicy::Ceil,
            TradeSize::from_units(2),
        )
        .unwrap();

        assert_eq!(quote.direction, Direction::Buy);
        assert_eq!(quote.amount, U256::from(1_122_334_455_667_789_002u64));
    }

    #[test]
    fn test_buy_fixture_truncate_plus_one() {
        let quote = QuoteEngine::quote_buy(
            &reserves(10, 20),
            FeeTier::ONE_PERCENT,
            RoundingPolicy::TruncatePlusOne,
            TradeSize::from_units(2),
        )
        .unwrap();

        assert_eq!(quote.amount, U256::from(1_122_334_455_667_789_002u64));
    }

    #[test]
    fn test_buy_fixture_thirty_bps() {
        let quote = QuoteEngine::quote_buy(
            &reserves(10, 20),
            FeeTier::THIRTY_BPS,
            RoundingPolicy::Ceil,
            TradeSize::from_units(2),
        )
        .unwrap();

        assert_eq!(quote.amount, U256::from(1_114_454_474_534_715_257u64));
    }

    #[test]
    fn test_rounding_policies_diverge_on_exact_division() {
        let no_fee = FeeTier::new(1000, 1000).unwrap();
        let pool = reserves(4, 5);

        let ceil =
            QuoteEngine::quote_buy(&pool, no_fee, RoundingPolicy::Ceil, TradeSize::from_units(1))
                .unwrap();
        let corrected = QuoteEngine::quote_buy(
            &pool,
            no_fee,
            RoundingPolicy::TruncatePlusOne,
            TradeSize::from_units(1),
        )
        .unwrap();

        assert_eq!(ceil.amount, ether(1));
        assert_eq!(corrected.amount, ether(1) + U256::one());
    }

    #[test]
    fn test_sell_fixtures() {
        let one_percent =
            QuoteEngine::quote_sell(&reserves(10, 20), FeeTier::ONE_PERCENT, TradeSize::from_units(2))
                .unwrap();
        let thirty_bps =
            QuoteEngine::quote_sell(&reserves(10, 20), FeeTier::THIRTY_BPS, TradeSize::from_units(2))
                .unwrap();

        assert_eq!(one_percent.direction, Direction::Sell);
        assert_eq!(one_percent.amount, U256::from(900_818_926_296_633_303u64));
        assert_eq!(thirty_bps.amount, U256::from(906_610_893_880_149_131u64));
    }

    #[test]
    fn test_zero_amount_rejected() {
        let pool = reserves(10, 20);
        assert_eq!(
            QuoteEngine::quote_buy(&pool, FeeTier::ONE_PERCENT, RoundingPolicy::Ceil, TradeSize::default()),
            Err(QuoteError::InvalidAmount)
        );
        assert_eq!(
            QuoteEngine::quote_sell(&pool, FeeTier::ONE_PERCENT, TradeSize::default()),
            Err(QuoteError::InvalidAmount)
        );
    }

    #[test]
    fn test_buy_entire_reserve_rejected() {
        let pool = reserves(10, 2);
        let result = QuoteEngine::quote_buy(
            &pool,
            FeeTier::ONE_PERCENT,
            RoundingPolicy::Ceil,
            TradeSize::from_units(2),
        );
        assert_eq!(
            result,
            Err(QuoteError::InsufficientLiquidity {
                requested: ether(2),
                available: ether(2),
            })
        );

        // selling far more than the reserve is still priceable
        assert!(QuoteEngine::quote_sell(&pool, FeeTier::ONE_PERCENT, TradeSize::from_units(50)).is_ok());
    }

    #[test]
    fn test_empty_base_reserve() {
        let pool = ReservePair::new(U256::zero(), ether(20));
        let buy = QuoteEngine::quote_buy(
            &pool,
            FeeTier::ONE_PERCENT,
            RoundingPolicy::Ceil,
            TradeSize::from_units(1),
        )
        .unwrap();
        let sell =
            QuoteEngine::quote_sell(&pool, FeeTier::ONE_PERCENT, TradeSize::from_units(1)).unwrap();

        assert_eq!(buy.amount, U256::zero());
        assert_eq!(sell.amount, U256::zero());
    }

    #[test]
    fn test_huge_reserves_do_not_overflow_intermediates() {
        let pool = ReservePair::new(U256::MAX / 2, U256::MAX / 2);
        let quote = QuoteEngine::quote_sell(&pool, FeeTier::THIRTY_BPS, TradeSize::from_units(1));
        assert!(quote.is_ok());
    }

    #[test]
    fn test_spot_price() {
        assert_eq!(QuoteEngine::spot_price(&reserves(10, 20)).unwrap(), ether(1) / 2);
        assert!(QuoteEngine::spot_price(&ReservePair::default()).is_err());
    }

    #[test]
    fn test_slippage_bounds() {
        let buy = Quote::buy(U256::from(10_001u64));
        let sell = Quote::sell(U256::from(10_001u64));

        assert_eq!(QuoteEngine::bound_with_slippage(&buy, 0).unwrap(), U256::from(10_001u64));
        // 10_001 * 1.005 = 10_051.005 -> 10_052
        assert_eq!(QuoteEngine::bound_with_slippage(&buy, 50).unwrap(), U256::from(10_052u64));
        // 10_001 * 0.995 = 9_950.995 -> 9_950
        assert_eq!(QuoteEngine::bound_with_slippage(&sell, 50).unwrap(), U256::from(9_950u64));
        assert_eq!(QuoteEngine::bound_with_slippage(&sell, 20_000).unwrap(), U256::zero());
    }
}
