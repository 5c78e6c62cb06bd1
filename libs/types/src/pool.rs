//! Registry key identifying a pool

use std::fmt;

use ethers_core::types::{Address, H256};
use serde::{Deserialize, Serialize};

/// The (collection, base asset, eligibility root) triple the registry is keyed by
///
/// A zero base asset means the native coin; a zero eligibility root means the
/// pool accepts every unit of the collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PoolKey {
    pub collection: Address,
    pub base_asset: Address,
    pub eligibility_root: H256,
}

impl PoolKey {
    pub fn new(collection: Address, base_asset: Address, eligibility_root: H256) -> Self {
        Self {
            collection,
            base_asset,
            eligibility_root,
        }
    }

    /// Unrestricted pool trading the collection against the native coin
    pub fn native(collection: Address) -> Self {
        Self::new(collection, Address::zero(), H256::zero())
    }

    pub fn is_native_base(&self) -> bool {
        self.base_asset.is_zero()
    }

    pub fn has_eligibility_root(&self) -> bool {
        !self.eligibility_root.is_zero()
    }
}

impl fmt::Display for PoolKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}:{:?}:{:?}",
            self.collection, self.base_asset, self.eligibility_root
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_native_key() {
        let key = PoolKey::native(Address::repeat_byte(0xbc));
        assert!(key.is_native_base());
        assert!(!key.has_eligibility_root());

        let restricted = PoolKey::new(
            Address::repeat_byte(0xbc),
            Address::repeat_byte(0x01),
            H256::repeat_byte(0x11),
        );
        assert!(!restricted.is_native_base());
        assert!(restricted.has_eligibility_root());
    }
}
