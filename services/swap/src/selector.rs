//! Unit selection for buys and sells

use floorswap_types::{UnitId, UnitSelection};

use crate::error::{Result, SwapError};

/// Picks the first `count` units in the order the holdings source reported
///
/// Applies no preference of its own; callers that need particular units
/// pre-filter the holdings they pass in.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnitSelector;

impl UnitSelector {
    /// Units to buy, drawn from what the pool holds
    pub fn select_for_buy(pool_holdings: &[UnitId], count: usize) -> Result<UnitSelection> {
        Self::first(pool_holdings, count)
    }

    /// Units to sell, drawn from what the trader holds
    pub fn select_for_sell(wallet_holdings: &[UnitId], count: usize) -> Result<UnitSelection> {
        Self::first(wallet_holdings, count)
    }

    fn first(holdings: &[UnitId], count: usize) -> Result<UnitSelection> {
        if count > holdings.len() {
            return Err(SwapError::InsufficientUnits {
                requested: count,
                available: holdings.len(),
            });
        }
        Ok(UnitSelection::new(holdings[..count].to_vec())?)
    }
}
