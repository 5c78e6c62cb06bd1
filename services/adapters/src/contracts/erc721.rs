//! Collection-wide operator approvals

use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::Token;
use floorswap_types::{Address, H256, U256};
use swap_orchestrator::{
    CollaboratorError, CollaboratorResult, CollectionApproval, Ledger,
};

use super::{call_single, encode};
use crate::abi::{IS_APPROVED_FOR_ALL, SET_APPROVAL_FOR_ALL};

/// ERC-721 `setApprovalForAll` / `isApprovedForAll` on any collection
pub struct Erc721Approval {
    ledger: Arc<dyn Ledger>,
}

impl Erc721Approval {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl CollectionApproval for Erc721Approval {
    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> CollaboratorResult<bool> {
        let args = [Token::Address(owner), Token::Address(operator)];
        match call_single(self.ledger.as_ref(), collection, &IS_APPROVED_FOR_ALL, &args).await? {
            Token::Bool(approved) => Ok(approved),
            other => Err(CollaboratorError::Malformed(format!(
                "isApprovedForAll returned {other:?}"
            ))),
        }
    }

    async fn set_approval_for_all(
        &self,
        collection: Address,
        operator: Address,
        approved: bool,
    ) -> CollaboratorResult<H256> {
        let calldata = encode(
            &SET_APPROVAL_FOR_ALL,
            &[Token::Address(operator), Token::Bool(approved)],
        )?;
        self.ledger.send(collection, calldata, U256::zero()).await
    }
}
