//! Base-token allowances for token-based pools

use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::Token;
use floorswap_types::{Address, H256, U256};
use swap_orchestrator::{CollaboratorError, CollaboratorResult, Ledger, TokenAllowance};

use super::{call_single, encode};
use crate::abi::{ALLOWANCE, APPROVE};

/// ERC-20 `allowance` / `approve` on any token
pub struct Erc20Allowance {
    ledger: Arc<dyn Ledger>,
}

impl Erc20Allowance {
    pub fn new(ledger: Arc<dyn Ledger>) -> Self {
        Self { ledger }
    }
}

#[async_trait]
impl TokenAllowance for Erc20Allowance {
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> CollaboratorResult<U256> {
        let args = [Token::Address(owner), Token::Address(spender)];
        match call_single(self.ledger.as_ref(), token, &ALLOWANCE, &args).await? {
            Token::Uint(amount) => Ok(amount),
            other => Err(CollaboratorError::Malformed(format!(
                "allowance returned {other:?}"
            ))),
        }
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> CollaboratorResult<H256> {
        let calldata = encode(&APPROVE, &[Token::Address(spender), Token::Uint(amount)])?;
        self.ledger.send(token, calldata, U256::zero()).await
    }
}
