//! Collection units, trade sizes and unit selections

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use ethers_core::types::U256;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Fractional units per whole collection unit
pub const FRACTIONAL_SCALE: u64 = 1_000_000_000_000_000_000;

/// Identifier of one concrete unit (token id) of the collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(U256);

impl UnitId {
    pub fn new(value: U256) -> Self {
        Self(value)
    }

    pub fn as_u256(&self) -> U256 {
        self.0
    }

    /// Parse a token id in decimal or `0x`-prefixed hex form
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        let parsed = match trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"))
        {
            Some(hex) => U256::from_str_radix(hex, 16).ok(),
            None => U256::from_dec_str(trimmed).ok(),
        };

        parsed.map(Self).ok_or_else(|| ValidationError::InvalidUnitId {
            input: input.to_string(),
        })
    }
}

impl From<u64> for UnitId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for UnitId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl FromStr for UnitId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Amount of fractional units moved by a single trade
///
/// The quote engine accepts any size; whole-unit checks belong to callers
/// that need to pick concrete token ids.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TradeSize(U256);

impl TradeSize {
    pub fn from_fractional(amount: U256) -> Self {
        Self(amount)
    }

    /// Size of `count` whole collection units
    pub fn from_units(count: u64) -> Self {
        // u64 * 10^18 stays below 2^128
        Self(U256::from(count) * U256::from(FRACTIONAL_SCALE))
    }

    pub fn fractional(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Number of whole collection units this size represents
    pub fn whole_units(&self) -> Result<usize, ValidationError> {
        let (count, remainder) = self.0.div_mod(U256::from(FRACTIONAL_SCALE));
        if !remainder.is_zero() {
            return Err(ValidationError::NotWholeUnits { amount: self.0 });
        }
        if count > U256::from(usize::MAX) {
            return Err(ValidationError::TooManyUnits { amount: self.0 });
        }
        Ok(count.as_usize())
    }
}

impl fmt::Display for TradeSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered, duplicate-free list of unit ids chosen for one trade
///
/// Order is significant: sell-side attestations are matched to it by position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSelection(Vec<UnitId>);

impl UnitSelection {
    pub fn new(units: Vec<UnitId>) -> Result<Self, ValidationError> {
        let mut seen = HashSet::with_capacity(units.len());
        for unit in &units {
            if !seen.insert(*unit) {
                return Err(ValidationError::DuplicateUnit { unit_id: *unit });
            }
        }
        Ok(Self(units))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[UnitId] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &UnitId> {
        self.0.iter()
    }

    /// Raw token ids in selection order, as passed to the pool contract
    pub fn token_ids(&self) -> Vec<U256> {
        self.0.iter().map(UnitId::as_u256).collect()
    }

    pub fn into_inner(self) -> Vec<UnitId> {
        self.0
    }
}

impl fmt::Display for UnitSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<String> = self.0.iter().map(UnitId::to_string).collect();
        write!(f, "[{}]", ids.join(", "))
    }
}
