//! Quote engine errors

use ethers_core::types::U256;
use thiserror::Error;

/// Result type alias for pricing operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Reasons a trade cannot be priced
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Trade size is zero
    #[error("Trade amount must be positive")]
    InvalidAmount,

    /// Buy would remove the pool's entire fractional reserve or more
    #[error("Insufficient liquidity: requested {requested} fractional units, pool holds {available}")]
    InsufficientLiquidity { requested: U256, available: U256 },

    /// Result does not fit 256 bits
    #[error("Arithmetic overflow while computing {operation}")]
    Overflow { operation: &'static str },
}
