//! Collaborator interfaces consumed by the orchestrator
//!
//! Each trait has fixed, typed signatures. ABI binding, HTTP framing and key
//! management live behind these seams in the adapters crate, so the swap core
//! can run against in-memory implementations.

use async_trait::async_trait;
use floorswap_types::{
    Address, Attestation, Bytes, Deadline, PoolKey, SignedMessage, UnitId, H256, U256,
};

use crate::error::CollaboratorError;

pub type CollaboratorResult<T> = std::result::Result<T, CollaboratorError>;

/// Finality report for a submitted transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Confirmation {
    pub tx_hash: H256,
    pub block_number: Option<u64>,
    /// `false` when the transaction was mined but reverted
    pub succeeded: bool,
}

/// Ledger read/write service
#[async_trait]
pub trait Ledger: Send + Sync {
    /// Account that signs and sends transactions
    fn sender(&self) -> Address;

    /// Read-only call with ABI-encoded calldata
    async fn call(&self, contract: Address, calldata: Bytes) -> CollaboratorResult<Bytes>;

    /// Sign and broadcast a transaction, returning its hash
    async fn send(
        &self,
        contract: Address,
        calldata: Bytes,
        value: U256,
    ) -> CollaboratorResult<H256>;

    /// Suspend until the transaction is mined
    async fn wait(&self, tx_hash: H256) -> CollaboratorResult<Confirmation>;
}

/// Pool registry keyed by (collection, base asset, eligibility root)
#[async_trait]
pub trait PoolRegistry: Send + Sync {
    /// Registered pool, or the zero address when none exists
    async fn pairs(&self, key: &PoolKey) -> CollaboratorResult<Address>;
}

/// Buy submission parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyOrder {
    pub token_ids: Vec<U256>,
    pub max_cost: U256,
    pub deadline: Option<Deadline>,
}

/// Sell submission parameters
///
/// `messages` are aligned index for index with `token_ids`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SellOrder {
    pub token_ids: Vec<U256>,
    pub min_proceeds: U256,
    pub deadline: Option<Deadline>,
    pub proofs: Vec<Vec<H256>>,
    pub messages: Vec<SignedMessage>,
}

/// Pair contract of a constant-product NFT pool
#[async_trait]
pub trait PairPool: Send + Sync {
    /// Whether this pool variant's swap functions take a deadline argument
    fn supports_deadline(&self) -> bool;

    async fn base_reserves(&self, pool: Address) -> CollaboratorResult<U256>;

    async fn fractional_reserves(&self, pool: Address) -> CollaboratorResult<U256>;

    /// Buy units, attaching `value` as native payment
    async fn nft_buy(&self, pool: Address, order: &BuyOrder, value: U256)
        -> CollaboratorResult<H256>;

    async fn nft_sell(&self, pool: Address, order: &SellOrder) -> CollaboratorResult<H256>;
}

/// Operator approvals on the collection contract
#[async_trait]
pub trait CollectionApproval: Send + Sync {
    async fn is_approved_for_all(
        &self,
        collection: Address,
        owner: Address,
        operator: Address,
    ) -> CollaboratorResult<bool>;

    /// Broadcast the approval grant; finality is observed through [`Ledger::wait`]
    async fn set_approval_for_all(
        &self,
        collection: Address,
        operator: Address,
        approved: bool,
    ) -> CollaboratorResult<H256>;
}

/// Spending allowances on a fungible base-asset token
#[async_trait]
pub trait TokenAllowance: Send + Sync {
    async fn allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> CollaboratorResult<U256>;

    /// Broadcast the allowance grant; finality is observed through [`Ledger::wait`]
    async fn approve(
        &self,
        token: Address,
        spender: Address,
        amount: U256,
    ) -> CollaboratorResult<H256>;
}

/// Unit ownership index
#[async_trait]
pub trait HoldingsIndex: Send + Sync {
    /// Units of `collection` held by `owner`, in the index's reported order
    async fn units_owned_by(
        &self,
        owner: Address,
        collection: Address,
    ) -> CollaboratorResult<Vec<UnitId>>;
}

/// Third-party attestation oracle
#[async_trait]
pub trait AttestationOracle: Send + Sync {
    /// Attestations for `units`; response order is unspecified and units
    /// without a message are simply absent
    async fn fetch(
        &self,
        collection: Address,
        units: &[UnitId],
    ) -> CollaboratorResult<Vec<Attestation>>;
}
