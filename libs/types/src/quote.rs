//! Trade direction and priced quotes

use std::fmt;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

/// Side of the trade from the trader's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Trader receives units and pays base asset (exact output)
    Buy,
    /// Trader sends units and receives base asset (exact input)
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "buy"),
            Self::Sell => write!(f, "sell"),
        }
    }
}

/// Base-asset amount for a trade
///
/// For buys this is the cost the trader supplies, for sells the proceeds the
/// trader receives. Derived per trade and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub amount: U256,
    pub direction: Direction,
}

impl Quote {
    pub fn buy(amount: U256) -> Self {
        Self {
            amount,
            direction: Direction::Buy,
        }
    }

    pub fn sell(amount: U256) -> Self {
        Self {
            amount,
            direction: Direction::Sell,
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.direction {
            Direction::Buy => write!(f, "cost {}", self.amount),
            Direction::Sell => write!(f, "proceeds {}", self.amount),
        }
    }
}
