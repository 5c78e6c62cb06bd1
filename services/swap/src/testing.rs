//! In-memory collaborators for exercising the orchestrator

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use floorswap_config::{
    ConfirmationSettings, HoldingsSettings, Network, OracleSettings, PoolSettings, Secret,
    SwapConfig, TradeSettings,
};
use floorswap_types::{
    Address, Attestation, Bytes, FeeTier, PoolKey, ReservePair, SignedMessage, UnitId, H256,
    U256,
};
use parking_lot::Mutex;

use crate::clock::Clock;
use crate::collaborators::{
    AttestationOracle, BuyOrder, CollaboratorResult, CollectionApproval, Confirmation,
    HoldingsIndex, Ledger, PairPool, PoolRegistry, SellOrder, TokenAllowance,
};
use crate::error::CollaboratorError;
use crate::orchestrator::Collaborators;

/// Clock frozen at a fixed UNIX time
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_unix(&self) -> u64 {
        self.0
    }
}

/// Observable side effects recorded by [`MockChain`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChainEvent {
    ApprovalSent {
        collection: Address,
        operator: Address,
        tx_hash: H256,
    },
    AllowanceSent {
        token: Address,
        spender: Address,
        amount: U256,
        tx_hash: H256,
    },
    Confirmed {
        tx_hash: H256,
        succeeded: bool,
    },
    Buy {
        pool: Address,
        order: BuyOrder,
        value: U256,
        tx_hash: H256,
    },
    Sell {
        pool: Address,
        order: SellOrder,
        tx_hash: H256,
    },
    RawSend {
        contract: Address,
        calldata: Bytes,
        value: U256,
        tx_hash: H256,
    },
}

#[derive(Default)]
struct ChainState {
    pools: HashMap<PoolKey, Address>,
    reserves: HashMap<Address, ReservePair>,
    holdings: HashMap<(Address, Address), Vec<UnitId>>,
    /// (collection, owner, operator)
    approvals: HashSet<(Address, Address, Address)>,
    pending_approvals: HashMap<H256, (Address, Address, bool)>,
    /// (token, owner, spender)
    allowances: HashMap<(Address, Address, Address), U256>,
    pending_allowances: HashMap<H256, (Address, Address, U256)>,
    attestations: HashMap<UnitId, SignedMessage>,
    legacy_pool: bool,
    approvals_revert: bool,
    wait_error: Option<CollaboratorError>,
    read_error: Option<CollaboratorError>,
    submission_error: Option<CollaboratorError>,
    events: Vec<ChainEvent>,
    tx_count: u64,
}

impl ChainState {
    fn next_tx(&mut self) -> H256 {
        self.tx_count += 1;
        H256::from_low_u64_be(self.tx_count)
    }

    fn check_reads(&self) -> CollaboratorResult<()> {
        match &self.read_error {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

/// A single in-memory chain implementing every collaborator interface
///
/// The oracle answers in reverse request order so callers cannot rely on it.
pub struct MockChain {
    sender: Address,
    state: Mutex<ChainState>,
}

impl MockChain {
    pub fn new(sender: Address) -> Self {
        Self {
            sender,
            state: Mutex::new(ChainState::default()),
        }
    }

    /// Wire every collaborator slot to this chain
    pub fn collaborators(self: &Arc<Self>, clock: Arc<dyn Clock>) -> Collaborators {
        Collaborators {
            ledger: self.clone(),
            registry: self.clone(),
            pair: self.clone(),
            approval: self.clone(),
            allowance: self.clone(),
            holdings: self.clone(),
            oracle: self.clone(),
            clock,
        }
    }

    pub fn register_pool(&self, key: PoolKey, pool: Address) {
        self.state.lock().pools.insert(key, pool);
    }

    pub fn set_reserves(&self, pool: Address, reserves: ReservePair) {
        self.state.lock().reserves.insert(pool, reserves);
    }

    pub fn set_holdings(&self, owner: Address, collection: Address, units: Vec<UnitId>) {
        self.state
            .lock()
            .holdings
            .insert((owner, collection), units);
    }

    pub fn grant_approval(&self, collection: Address, owner: Address, operator: Address) {
        self.state
            .lock()
            .approvals
            .insert((collection, owner, operator));
    }

    pub fn set_allowance(&self, token: Address, owner: Address, spender: Address, amount: U256) {
        self.state
            .lock()
            .allowances
            .insert((token, owner, spender), amount);
    }

    pub fn allowance_of(&self, token: Address, owner: Address, spender: Address) -> U256 {
        self.state
            .lock()
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    pub fn set_attestation(&self, unit_id: UnitId, message: SignedMessage) {
        self.state.lock().attestations.insert(unit_id, message);
    }

    /// Pool variant whose swap functions take no deadline
    pub fn use_legacy_pool(&self) {
        self.state.lock().legacy_pool = true;
    }

    /// Approval and allowance transactions are mined but revert
    pub fn revert_approvals(&self) {
        self.state.lock().approvals_revert = true;
    }

    pub fn fail_waits(&self, err: CollaboratorError) {
        self.state.lock().wait_error = Some(err);
    }

    pub fn fail_reads(&self, err: CollaboratorError) {
        self.state.lock().read_error = Some(err);
    }

    pub fn fail_submissions(&self, err: CollaboratorError) {
        self.state.lock().submission_error = Some(err);
    }

    pub fn is_approved(&self, collection: Address, owner: Address, operator: Address) -> bool {
        self.state
            .lock()
            .approvals
            .contains(&(collection, owner, operator))
    }

    pub fn events(&self) -> Vec<ChainEvent> {
        self.state.lock().events.clone()
    }

    fn reserves_of(&self, pool: Address) -> CollaboratorResult<ReservePair> {
        let state = self.state.lock();
        state.check_reads()?;
        state
            .reserves
            .get(&pool)
            .copied()
            .ok_or_else(|| CollaboratorError::Reverted {
                reason: format!("no pool deployed at {pool:?}"),
            })
    }
}

#[async_trait]
impl Ledger for MockChain {
    fn sender(&self) -> Address {
        self.sender
    }

    async fn call(&self, _contract: Address, _calldata: Bytes) -> CollaboratorResult<Bytes> {
        self.state.lock().check_reads()?;
        Ok(Bytes::default())
    }

    async fn send(
        &self,
        contract: Address,
        calldata: Bytes,
        value: U256,
    ) -> CollaboratorResult<H256> {
        let mut state = self.state.lock();
        let tx_hash = state.next_tx();
        state.events.push(ChainEvent::RawSend {
            contract,
            calldata,
            value,
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn wait(&self, tx_hash: H256) -> CollaboratorResult<Confirmation> {
        let mut state = self.state.lock();
        if let Some(err) = state.wait_error.clone() {
            return Err(err);
        }

        let succeeded = !state.approvals_revert;
        if let Some((collection, operator, approved)) = state.pending_approvals.remove(&tx_hash) {
            let entry = (collection, self.sender, operator);
            if succeeded && approved {
                state.approvals.insert(entry);
            } else if succeeded {
                state.approvals.remove(&entry);
            }
        }
        if let Some((token, spender, amount)) = state.pending_allowances.remove(&tx_hash) {
            if succeeded {
                state.allowances.insert((token, self.sender, spender), amount);
            }
        }
        state.events.push(ChainEvent::Confirmed { tx_hash, succeeded });

        Ok(Confirmation {
            tx_hash,
            block_number: Some(state.tx_count),
            succeeded,
        })
    }
}

#[async_trait]
impl PoolRegistry for MockChain {
    async fn pairs(&self, key: &PoolKey) -> CollaboratorResult<Address> {
        let state = self.state.lock();
        state.check_reads()?;
        Ok(state.pools.get(key).copied().unwrap_or_else(Address::zero))
    }
}

#[async_trait]
impl PairPool for MockChain {
    fn supports_deadline(&self) -> bool {
        !self.state.lock().legacy_pool
    }

    async fn base_reserves(&self, pool: Address) -> CollaboratorResult<U256> {
        Ok(self.reserves_of(pool)?.base_reserve)
    }

    async fn fractional_reserves(&self, pool: Address) -> CollaboratorResult<U256> {
        Ok(self.reserves_of(pool)?.fractional_reserve)
    }

    async fn nft_buy(
        &self,
        pool: Address,
        order: &BuyOrder,
        value: U256,
    ) -> CollaboratorResult<H256> {
        let mut state = self.state.lock();
        if let Some(err) = state.submission_error.clone() {
            return Err(err);
        }
        let tx_hash = state.next_tx();
        state.events.push(ChainEvent::Buy {
            pool,
            order: order.clone(),
            value,
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn nft_sell(&self, pool: Address, order: &SellOrder) -> CollaboratorResult<H256> {
        let mut state = self.state.lock();
        if let Some(err) = state.submission_error.clone() {
            return Err(err);
        }
        let tx_hash = state.next_tx();
        state.events.push(ChainEvent::Sell {
            pool,
            order: order.clone(),
            tx_hash,
        });
        Ok(tx_hash)
    }
}

#[async_trait]
impl CollectionApproval for MockChain {
    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> CollaboratorResult<bool> {
        let state = self.state.lock();
        state.check_reads()?;
        Ok(state.approvals.contains(&(collection, owner, operator)))
    }

    async fn set_approval_for_all(
        &self,
        collection: Address,
        operator: Address,
        approved: bool,
    ) -> CollaboratorResult<H256> {
        let mut state = self.state.lock();
        let tx_hash = state.next_tx();
        state
            .pending_approvals
            .insert(tx_hash, (collection, operator, approved));
        state.events.push(ChainEvent::ApprovalSent {
            collection,
            operator,
            tx_hash,
        });
        Ok(tx_hash)
    }
}

#[async_trait]
impl TokenAllowance for MockChain {
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> CollaboratorResult<U256> {
        let state = self.state.lock();
        state.check_reads()?;
        Ok(state
            .allowances
            .get(&(token, owner, spender))
            .copied()
            .unwrap_or_default())
    }

    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> CollaboratorResult<H256> {
        let mut state = self.state.lock();
        let tx_hash = state.next_tx();
        state
            .pending_allowances
            .insert(tx_hash, (token, spender, amount));
        state.events.push(ChainEvent::AllowanceSent {
            token,
            spender,
            amount,
            tx_hash,
        });
        Ok(tx_hash)
    }
}

#[async_trait]
impl HoldingsIndex for MockChain {
    async fn units_owned_by(
        &self,
        owner: Address,
        collection: Address,
    ) -> CollaboratorResult<Vec<UnitId>> {
        let state = self.state.lock();
        state.check_reads()?;
        Ok(state
            .holdings
            .get(&(owner, collection))
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl AttestationOracle for MockChain {
    async fn fetch(
        &self,
        _collection: Address,
        units: &[UnitId],
    ) -> CollaboratorResult<Vec<Attestation>> {
        let state = self.state.lock();
        Ok(units
            .iter()
            .rev()
            .filter_map(|unit_id| {
                state.attestations.get(unit_id).map(|message| Attestation {
                    unit_id: *unit_id,
                    message: message.clone(),
                })
            })
            .collect())
    }
}

/// Deterministic oracle message distinguishable by `seed`
pub fn signed_message(seed: u64) -> SignedMessage {
    SignedMessage {
        id: H256::from_low_u64_be(seed),
        payload: Bytes::from(seed.to_be_bytes().to_vec()),
        timestamp: U256::from(1_700_000_000u64 + seed),
        signature: Bytes::from(vec![0x1b; 65]),
    }
}

/// Configuration for a Goerli run with the given fee tier and default terms
pub fn test_config(fee: FeeTier) -> SwapConfig {
    SwapConfig {
        network: Network::Goerli,
        ledger_endpoint: "http://localhost:8545".to_string(),
        wallet_credential: Secret::new(
            "0x4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318",
        ),
        oracle_api_key: Secret::new("demo-api-key"),
        log_level: "debug".to_string(),
        registry: None,
        pool: PoolSettings {
            fee,
            ..PoolSettings::default()
        },
        trade: TradeSettings::default(),
        confirmation: ConfirmationSettings::default(),
        oracle: OracleSettings::default(),
        holdings: HoldingsSettings::default(),
    }
}
