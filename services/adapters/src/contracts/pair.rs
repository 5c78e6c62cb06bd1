//! Pair contract reads and swap submissions

use std::sync::Arc;

use async_trait::async_trait;
use ethers::abi::{Function, Token};
use floorswap_types::{Address, Deadline, H256, U256};
use swap_orchestrator::{
    BuyOrder, CollaboratorError, CollaboratorResult, Ledger, PairPool, SellOrder,
};
use tracing::debug;

use super::{call_single, encode};
use crate::abi::{
    BASE_TOKEN_RESERVES, FRACTIONAL_TOKEN_RESERVES, NFT_BUY, NFT_BUY_LEGACY, NFT_SELL,
    NFT_SELL_LEGACY,
};
use crate::error::classify_pair_revert;

/// Pair contract client for one pool variant
pub struct PairContract {
    ledger: Arc<dyn Ledger>,
    supports_deadline: bool,
}

impl PairContract {
    pub fn new(ledger: Arc<dyn Ledger>, supports_deadline: bool) -> Self {
        Self {
            ledger,
            supports_deadline,
        }
    }

    async fn read_uint(&self, pool: Address, function: &Function) -> CollaboratorResult<U256> {
        match call_single(self.ledger.as_ref(), pool, function, &[]).await? {
            Token::Uint(value) => Ok(value),
            other => Err(CollaboratorError::Malformed(format!(
                "{} returned {other:?}",
                function.name
            ))),
        }
    }

    /// Deadline argument for this pool variant
    ///
    /// Deadline pools have no deadline-free selector, so an order without one
    /// cannot be encoded for them. Legacy pools take no deadline at all.
    fn deadline_arg(&self, deadline: Option<Deadline>) -> CollaboratorResult<Option<Token>> {
        match (self.supports_deadline, deadline) {
            (true, Some(deadline)) => Ok(Some(Token::Uint(deadline.as_u256()))),
            (true, None) => Err(CollaboratorError::Malformed(
                "pool requires a deadline but the order carries none".to_string(),
            )),
            (false, _) => Ok(None),
        }
    }

    fn buy_args(&self, order: &BuyOrder) -> CollaboratorResult<(&'static Function, Vec<Token>)> {
        let mut args = vec![uint_array(&order.token_ids), Token::Uint(order.max_cost)];
        match self.deadline_arg(order.deadline)? {
            Some(deadline) => {
                args.push(deadline);
                Ok((&*NFT_BUY, args))
            }
            None => Ok((&*NFT_BUY_LEGACY, args)),
        }
    }

    fn sell_args(&self, order: &SellOrder) -> CollaboratorResult<(&'static Function, Vec<Token>)> {
        let mut args = vec![uint_array(&order.token_ids), Token::Uint(order.min_proceeds)];
        let function: &'static Function = match self.deadline_arg(order.deadline)? {
            Some(deadline) => {
                args.push(deadline);
                &*NFT_SELL
            }
            None => &*NFT_SELL_LEGACY,
        };

        let proofs = order
            .proofs
            .iter()
            .map(|proof| {
                Token::Array(
                    proof
                        .iter()
                        .map(|node| Token::FixedBytes(node.as_bytes().to_vec()))
                        .collect(),
                )
            })
            .collect();
        args.push(Token::Array(proofs));

        let messages = order
            .messages
            .iter()
            .map(|message| {
                Token::Tuple(vec![
                    Token::FixedBytes(message.id.as_bytes().to_vec()),
                    Token::Bytes(message.payload.to_vec()),
                    Token::Uint(message.timestamp),
                    Token::Bytes(message.signature.to_vec()),
                ])
            })
            .collect();
        args.push(Token::Array(messages));

        Ok((function, args))
    }
}

fn uint_array(values: &[U256]) -> Token {
    Token::Array(values.iter().copied().map(Token::Uint).collect())
}

#[async_trait]
impl PairPool for PairContract {
    fn supports_deadline(&self) -> bool {
        self.supports_deadline
    }

    async fn base_reserves(&self, pool: Address) -> CollaboratorResult<U256> {
        self.read_uint(pool, &BASE_TOKEN_RESERVES).await
    }

    async fn fractional_reserves(&self, pool: Address) -> CollaboratorResult<U256> {
        self.read_uint(pool, &FRACTIONAL_TOKEN_RESERVES).await
    }

    async fn nft_buy(
        &self,
        pool: Address,
        order: &BuyOrder,
        value: U256,
    ) -> CollaboratorResult<H256> {
        let (function, args) = self.buy_args(order)?;
        let calldata = encode(function, &args)?;
        debug!(
            signature = %function.signature(),
            bytes = calldata.len(),
            "encoded buy"
        );
        self.ledger
            .send(pool, calldata, value)
            .await
            .map_err(classify_pair_revert)
    }

    async fn nft_sell(&self, pool: Address, order: &SellOrder) -> CollaboratorResult<H256> {
        let (function, args) = self.sell_args(order)?;
        let calldata = encode(function, &args)?;
        debug!(
            signature = %function.signature(),
            bytes = calldata.len(),
            "encoded sell"
        );
        self.ledger
            .send(pool, calldata, U256::zero())
            .await
            .map_err(classify_pair_revert)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contracts::test_support::RecordingLedger;
    use floorswap_types::{Bytes, SignedMessage};

    fn pool() -> Address {
        Address::repeat_byte(0x77)
    }

    fn message() -> SignedMessage {
        SignedMessage {
            id: H256::repeat_byte(0x0a),
            payload: Bytes::from(vec![1, 2, 3]),
            timestamp: U256::from(1_700_000_000u64),
            signature: Bytes::from(vec![0x1b; 65]),
        }
    }

    #[tokio::test]
    async fn test_reads_reserves() {
        let ledger = Arc::new(RecordingLedger::default());
        ledger.respond(&BASE_TOKEN_RESERVES, &[Token::Uint(U256::exp10(19))]);
        ledger.respond(&FRACTIONAL_TOKEN_RESERVES, &[Token::Uint(U256::exp10(19) * 2)]);

        let pair = PairContract::new(ledger, true);
        assert_eq!(pair.base_reserves(pool()).await.unwrap(), U256::exp10(19));
        assert_eq!(
            pair.fractional_reserves(pool()).await.unwrap(),
            U256::exp10(19) * 2
        );
    }

    #[tokio::test]
    async fn test_buy_with_deadline_attaches_value() {
        let ledger = Arc::new(RecordingLedger::default());
        let pair = PairContract::new(ledger.clone(), true);
        let order = BuyOrder {
            token_ids: vec![U256::from(11), U256::from(12)],
            max_cost: U256::from(1_000u64),
            deadline: Some(Deadline::at(1_700_003_600)),
        };

        pair.nft_buy(pool(), &order, U256::from(1_000u64))
            .await
            .unwrap();

        let (target, calldata, value) = ledger.last_send();
        assert_eq!(target, pool());
        assert_eq!(value, U256::from(1_000u64));
        assert_eq!(&calldata[..4], &NFT_BUY.short_signature()[..]);
        let decoded = NFT_BUY.decode_input(&calldata[4..]).unwrap();
        assert_eq!(decoded[2], Token::Uint(U256::from(1_700_003_600u64)));
    }

    #[tokio::test]
    async fn test_legacy_pool_uses_deadline_free_variants() {
        let ledger = Arc::new(RecordingLedger::default());
        let pair = PairContract::new(ledger.clone(), false);
        let order = SellOrder {
            token_ids: vec![U256::from(7)],
            min_proceeds: U256::from(500u64),
            deadline: None,
            proofs: vec![],
            messages: vec![message()],
        };

        pair.nft_sell(pool(), &order).await.unwrap();

        let (_, calldata, value) = ledger.last_send();
        assert!(value.is_zero());
        assert_eq!(&calldata[..4], &NFT_SELL_LEGACY.short_signature()[..]);
        let decoded = NFT_SELL_LEGACY.decode_input(&calldata[4..]).unwrap();
        assert_eq!(decoded[2], Token::Array(vec![]));
        assert_eq!(
            decoded[3],
            Token::Array(vec![Token::Tuple(vec![
                Token::FixedBytes(vec![0x0a; 32]),
                Token::Bytes(vec![1, 2, 3]),
                Token::Uint(U256::from(1_700_000_000u64)),
                Token::Bytes(vec![0x1b; 65]),
            ])])
        );
    }

    #[tokio::test]
    async fn test_sell_encodes_proofs_in_order() {
        let ledger = Arc::new(RecordingLedger::default());
        let pair = PairContract::new(ledger.clone(), true);
        let order = SellOrder {
            token_ids: vec![U256::from(7), U256::from(3)],
            min_proceeds: U256::from(500u64),
            deadline: Some(Deadline::at(42)),
            proofs: vec![vec![H256::repeat_byte(0xa1)], vec![]],
            messages: vec![message(), message()],
        };

        pair.nft_sell(pool(), &order).await.unwrap();

        let (_, calldata, _) = ledger.last_send();
        let decoded = NFT_SELL.decode_input(&calldata[4..]).unwrap();
        assert_eq!(
            decoded[0],
            Token::Array(vec![Token::Uint(U256::from(7)), Token::Uint(U256::from(3))])
        );
        assert_eq!(
            decoded[3],
            Token::Array(vec![
                Token::Array(vec![Token::FixedBytes(vec![0xa1; 32])]),
                Token::Array(vec![]),
            ])
        );
    }

    #[tokio::test]
    async fn test_deadline_pool_rejects_order_without_deadline() {
        let ledger = Arc::new(RecordingLedger::default());
        let pair = PairContract::new(ledger.clone(), true);
        let buy = BuyOrder {
            token_ids: vec![U256::from(1)],
            max_cost: U256::one(),
            deadline: None,
        };
        let sell = SellOrder {
            token_ids: vec![U256::from(1)],
            min_proceeds: U256::one(),
            deadline: None,
            proofs: vec![],
            messages: vec![message()],
        };

        let err = pair.nft_buy(pool(), &buy, U256::one()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed(_)));
        let err = pair.nft_sell(pool(), &sell).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::Malformed(_)));
        assert!(ledger.sends.lock().is_empty());
    }

    #[tokio::test]
    async fn test_expired_revert_maps_to_deadline() {
        let ledger = Arc::new(RecordingLedger::default());
        *ledger.send_error.lock() = Some(CollaboratorError::Reverted {
            reason: "Expired".to_string(),
        });
        let pair = PairContract::new(ledger, true);
        let order = BuyOrder {
            token_ids: vec![U256::from(1)],
            max_cost: U256::one(),
            deadline: Some(Deadline::at(1)),
        };

        let err = pair.nft_buy(pool(), &order, U256::one()).await.unwrap_err();
        assert!(matches!(err, CollaboratorError::DeadlineExpired { .. }));
    }
}
