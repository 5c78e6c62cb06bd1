//! Fee tiers and rounding policies of pool variants
//!
//! A fee tier is the fraction of the trade that survives the fee, written as
//! `numerator / denominator` (990/1000 keeps 99%, i.e. a 1% fee). Pools fix
//! their tier at deployment; it is never recomputed mid-trade.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Fee retained by the pool, expressed as the surviving fraction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawFeeTier")]
pub struct FeeTier {
    numerator: u32,
    denominator: u32,
}

#[derive(Deserialize)]
struct RawFeeTier {
    numerator: u32,
    denominator: u32,
}

impl TryFrom<RawFeeTier> for FeeTier {
    type Error = ValidationError;

    fn try_from(raw: RawFeeTier) -> Result<Self, Self::Error> {
        Self::new(raw.numerator, raw.denominator)
    }
}

impl FeeTier {
    /// 1% fee (990/1000)
    pub const ONE_PERCENT: Self = Self {
        numerator: 990,
        denominator: 1000,
    };

    /// 0.3% fee (997/1000)
    pub const THIRTY_BPS: Self = Self {
        numerator: 997,
        denominator: 1000,
    };

    pub fn new(numerator: u32, denominator: u32) -> Result<Self, ValidationError> {
        let reason = if denominator == 0 {
            Some("denominator must be positive")
        } else if numerator == 0 {
            Some("numerator must be positive")
        } else if numerator > denominator {
            Some("numerator must not exceed denominator")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ValidationError::InvalidFeeTier {
                numerator,
                denominator,
                reason,
            }),
            None => Ok(Self {
                numerator,
                denominator,
            }),
        }
    }

    pub fn numerator(&self) -> u32 {
        self.numerator
    }

    pub fn denominator(&self) -> u32 {
        self.denominator
    }

    /// Fee charged, in basis points (rounded down)
    pub fn fee_bps(&self) -> u32 {
        let kept = u64::from(self.denominator - self.numerator);
        (kept * 10_000 / u64::from(self.denominator)) as u32
    }
}

impl Default for FeeTier {
    fn default() -> Self {
        Self::ONE_PERCENT
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

/// How a buy quote is rounded after the exact division
///
/// Both policies never quote below what the pool charges; they differ only
/// when the division is exact.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Exact ceiling of the quotient
    #[default]
    Ceil,
    /// Truncating division followed by one correction unit
    TruncatePlusOne,
}

impl RoundingPolicy {
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Ceil => "ceiling division",
            Self::TruncatePlusOne => "truncating division plus one",
        }
    }
}
