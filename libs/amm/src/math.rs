//! 512-bit intermediate arithmetic
//!
//! Products of two reserves and a fee term exceed 256 bits for large pools, so
//! every numerator and denominator is widened before dividing.

use ethers_core::types::{U256, U512};

use crate::error::{QuoteError, Result};

/// `a * b * c` without intermediate truncation
pub fn product(a: U256, b: U256, c: U256, operation: &'static str) -> Result<U512> {
    a.full_mul(b)
        .checked_mul(U512::from(c))
        .ok_or(QuoteError::Overflow { operation })
}

pub fn div_floor(numerator: U512, denominator: U512) -> U512 {
    numerator / denominator
}

pub fn div_ceil(numerator: U512, denominator: U512) -> U512 {
    let (quotient, remainder) = numerator.div_mod(denominator);
    if remainder.is_zero() {
        quotient
    } else {
        // quotient < numerator here, so the increment cannot wrap
        quotient + U512::one()
    }
}

/// Narrow a 512-bit result back to the 256-bit on-chain width
pub fn narrow(value: U512, operation: &'static str) -> Result<U256> {
    U256::try_from(value).map_err(|_| QuoteError::Overflow { operation })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounding_directions() {
        let seven = U512::from(7u64);
        let two = U512::from(2u64);
        assert_eq!(div_floor(seven, two), U512::from(3u64));
        assert_eq!(div_ceil(seven, two), U512::from(4u64));
        assert_eq!(div_ceil(U512::from(8u64), two), U512::from(4u64));
    }

    #[test]
    fn test_product_spans_512_bits() {
        let wide = product(U256::MAX, U256::MAX, U256::one(), "test").unwrap();
        assert!(narrow(wide, "test").is_err());
        assert!(product(U256::MAX, U256::MAX, U256::from(2u64), "test").is_err());
    }
}
