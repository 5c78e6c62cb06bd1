//! Validation errors for data model construction

use ethers_core::types::U256;
use thiserror::Error;

use crate::units::UnitId;

/// Errors raised when a data model value would violate its invariants
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Fee tier fraction is not in (0, 1]
    #[error("Invalid fee tier {numerator}/{denominator}: {reason}")]
    InvalidFeeTier {
        numerator: u32,
        denominator: u32,
        reason: &'static str,
    },

    /// Fractional amount does not divide into whole collection units
    #[error("Amount {amount} is not a whole number of collection units")]
    NotWholeUnits { amount: U256 },

    /// Unit count does not fit the platform's index type
    #[error("Amount {amount} spans more units than can be selected")]
    TooManyUnits { amount: U256 },

    /// The same unit appears twice in a selection
    #[error("Unit {unit_id} selected more than once")]
    DuplicateUnit { unit_id: UnitId },

    /// A unit identifier string could not be parsed
    #[error("Invalid unit identifier: '{input}'")]
    InvalidUnitId { input: String },
}
