//! Pool reserve snapshot

use std::fmt;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// Holdings of a pool at the moment they were read
///
/// `base_reserve` is in the base asset's smallest unit, `fractional_reserve`
/// in fractional units (10^18 per whole collection unit).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservePair {
    pub base_reserve: U256,
    pub fractional_reserve: U256,
}

impl ReservePair {
    pub fn new(base_reserve: U256, fractional_reserve: U256) -> Self {
        Self {
            base_reserve,
            fractional_reserve,
        }
    }
}

impl fmt::Display for ReservePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "base={} fractional={}",
            self.base_reserve, self.fractional_reserve
        )
    }
}
