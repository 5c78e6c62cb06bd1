//! Pool discovery through the registry

use std::sync::Arc;

use floorswap_types::{Address, PoolKey};
use tracing::debug;

use crate::collaborators::PoolRegistry;
use crate::error::{Result, SwapError};

/// Resolves the canonical pool for a registry key
#[derive(Clone)]
pub struct PoolLocator {
    registry: Arc<dyn PoolRegistry>,
}

impl PoolLocator {
    pub fn new(registry: Arc<dyn PoolRegistry>) -> Self {
        Self { registry }
    }

    /// One registry read; the zero address means no pool is registered
    pub async fn locate(&self, key: &PoolKey) -> Result<Address> {
        let pool = self.registry.pairs(key).await?;
        if pool.is_zero() {
            return Err(SwapError::PoolNotFound { key: *key });
        }
        debug!(%key, ?pool, "registry resolved pool");
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockChain;
    use crate::ErrorKind;

    #[tokio::test]
    async fn test_locate_registered_pool() {
        let collection = Address::repeat_byte(0xbc);
        let chain = Arc::new(MockChain::new(Address::repeat_byte(0x01)));
        let pool = Address::repeat_byte(0x77);
        chain.register_pool(PoolKey::native(collection), pool);

        let locator = PoolLocator::new(chain);
        assert_eq!(locator.locate(&PoolKey::native(collection)).await.unwrap(), pool);
    }

    #[tokio::test]
    async fn test_unregistered_key_is_pool_not_found() {
        let chain = Arc::new(MockChain::new(Address::repeat_byte(0x01)));
        let locator = PoolLocator::new(chain);

        let err = locator
            .locate(&PoolKey::native(Address::repeat_byte(0xbc)))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PoolNotFound);
    }
}
