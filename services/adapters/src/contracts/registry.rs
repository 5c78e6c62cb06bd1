//! Pool registry lookups

use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::Token;
use floorswap_types::{Address, PoolKey};
use swap_orchestrator::{CollaboratorError, CollaboratorResult, Ledger, PoolRegistry};

use super::call_single;
use crate::abi::REGISTRY_PAIRS;

/// Registry contract deployed at a fixed address
pub struct RegistryContract {
    ledger: Arc<dyn Ledger>,
    address: Address,
}

impl RegistryContract {
    pub fn new(ledger: Arc<dyn Ledger>, address: Address) -> Self {
        Self { ledger, address }
    }
}

#[async_trait]
impl PoolRegistry for RegistryContract {
    async fn pairs(&self, key: &PoolKey) -> CollaboratorResult<Address> {
        let args = [
            Token::Address(key.collection),
            Token::Address(key.base_asset),
            Token::FixedBytes(key.eligibility_root.as_bytes().to_vec()),
        ];
        match call_single(self.ledger.as_ref(), self.address, &REGISTRY_PAIRS, &args).await? {
            Token::Address(pool) => Ok(pool),
            other => Err(CollaboratorError::Malformed(format!(
                "pairs returned {other:?}"
            ))),
        }
    }
}
