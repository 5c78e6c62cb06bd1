//! # Swap Orchestrator - Quote-then-Swap Sequencing
//!
//! ## Purpose
//!
//! Drives one trade from pool discovery to submission. Every run re-reads
//! reserves, prices the trade exactly, picks concrete units and submits a
//! single swap call. Sells additionally secure the pool's operator approval
//! and the oracle attestations the pool requires.
//!
//! ## Architecture Role
//!
//! ```text
//! SwapRequest → [PoolLocator] → [Reserve + Holdings Reads] → [QuoteEngine]
//!                    ↓                     ↓                      ↓
//!               PoolLocated          ReservesRead              Quoted
//!
//!             → [UnitSelector] → [Approval*] → [AttestationResolver*] → [Submission]
//!                    ↓                ↓                  ↓                    ↓
//!              UnitsSelected      Approved     AttestationsResolved      Submitted
//!
//! * sell path only
//! ```
//!
//! Buys from a token-based pool also grant the pool an allowance of `maxCost`
//! over the base token before submission. That step belongs to the buy path
//! and adds no state.
//!
//! ## Limitations
//!
//! The deadline is fixed at quote time and the quote is never refreshed. If
//! reserves move before the transaction executes, the pool's own bound check
//! reverts the swap and the caller sees a retryable `REVERTED` error. Failed
//! steps are not retried here.

use std::sync::Arc;
use std::time::Instant;

use floorswap_amm::{NftAmmPool, PoolSnapshot, QuoteEngine};
use floorswap_config::SwapConfig;
use floorswap_types::{
    Address, Deadline, Direction, FeeTier, PoolKey, Quote, ReservePair, RoundingPolicy,
    TradeSize, UnitSelection, H256, U256,
};
use tracing::debug;

use crate::attestation::AttestationResolver;
use crate::clock::Clock;
use crate::collaborators::{
    AttestationOracle, BuyOrder, CollectionApproval, HoldingsIndex, Ledger, PairPool,
    PoolRegistry, SellOrder, TokenAllowance,
};
use crate::error::{Result, SwapError};
use crate::locator::PoolLocator;
use crate::selector::UnitSelector;
use crate::state::{StateTrail, SwapState};

/// External services one orchestrator talks to
#[derive(Clone)]
pub struct Collaborators {
    pub ledger: Arc<dyn Ledger>,
    pub registry: Arc<dyn PoolRegistry>,
    pub pair: Arc<dyn PairPool>,
    pub approval: Arc<dyn CollectionApproval>,
    pub allowance: Arc<dyn TokenAllowance>,
    pub holdings: Arc<dyn HoldingsIndex>,
    pub oracle: Arc<dyn AttestationOracle>,
    pub clock: Arc<dyn Clock>,
}

/// Pricing and submission terms fixed for the orchestrator's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TradeTerms {
    pub fee: FeeTier,
    pub rounding: RoundingPolicy,
    pub deadline_window_secs: u64,
    pub slippage_bps: u32,
}

impl TradeTerms {
    pub fn from_config(config: &SwapConfig) -> Self {
        Self {
            fee: config.pool.fee,
            rounding: config.pool.rounding,
            deadline_window_secs: config.trade.deadline_window_secs,
            slippage_bps: config.trade.slippage_bps,
        }
    }
}

/// One trade to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub direction: Direction,
    pub pool: PoolKey,
    /// Fractional amount; must be a whole number of collection units
    pub size: TradeSize,
    /// Merkle proofs, one per sold unit; only used when the pool has an eligibility root
    pub proofs: Vec<Vec<H256>>,
}

impl SwapRequest {
    pub fn buy(pool: PoolKey, units: u64) -> Self {
        Self {
            direction: Direction::Buy,
            pool,
            size: TradeSize::from_units(units),
            proofs: Vec::new(),
        }
    }

    pub fn sell(pool: PoolKey, units: u64) -> Self {
        Self {
            direction: Direction::Sell,
            pool,
            size: TradeSize::from_units(units),
            proofs: Vec::new(),
        }
    }

    pub fn with_proofs(mut self, proofs: Vec<Vec<H256>>) -> Self {
        self.proofs = proofs;
        self
    }
}

/// Outcome of a submitted trade
///
/// `quote` was computed from `reserves` as read at `quoted_at`. It is not
/// re-validated before submission; a stale quote surfaces only as a revert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapReceipt {
    pub direction: Direction,
    pub pool: Address,
    pub reserves: ReservePair,
    pub quote: Quote,
    /// `maxCost` for buys, `minProceeds` for sells
    pub bound: U256,
    /// Native payment attached to the submission
    pub value: U256,
    pub units: UnitSelection,
    pub deadline: Option<Deadline>,
    pub quoted_at: u64,
    /// Operator approval (sells) or base-token allowance (token-based buys) sent by this run
    pub approval_tx: Option<H256>,
    pub tx_hash: H256,
    pub states: Vec<SwapState>,
}

impl SwapReceipt {
    /// Seconds elapsed since the reserves behind the quote were read
    pub fn quote_age(&self, now_unix: u64) -> u64 {
        now_unix.saturating_sub(self.quoted_at)
    }
}

/// Runs trades through the linear swap state machine
pub struct SwapOrchestrator {
    terms: TradeTerms,
    locator: PoolLocator,
    resolver: AttestationResolver,
    ledger: Arc<dyn Ledger>,
    pair: Arc<dyn PairPool>,
    approval: Arc<dyn CollectionApproval>,
    allowance: Arc<dyn TokenAllowance>,
    holdings: Arc<dyn HoldingsIndex>,
    clock: Arc<dyn Clock>,
}

impl SwapOrchestrator {
    pub fn new(config: &SwapConfig, collaborators: Collaborators) -> Self {
        Self::with_terms(TradeTerms::from_config(config), collaborators)
    }

    pub fn with_terms(terms: TradeTerms, collaborators: Collaborators) -> Self {
        Self {
            terms,
            locator: PoolLocator::new(collaborators.registry),
            resolver: AttestationResolver::new(collaborators.oracle),
            ledger: collaborators.ledger,
            pair: collaborators.pair,
            approval: collaborators.approval,
            allowance: collaborators.allowance,
            holdings: collaborators.holdings,
            clock: collaborators.clock,
        }
    }

    pub fn terms(&self) -> &TradeTerms {
        &self.terms
    }

    /// Run one trade to submission
    ///
    /// Stops at the first failing step; nothing is retried.
    pub async fn execute(&self, request: SwapRequest) -> Result<SwapReceipt> {
        let started = Instant::now();
        let mut trail = StateTrail::new(request.direction);

        match self.run(&request, &mut trail).await {
            Ok(receipt) => {
                log_success!(
                    "{} of {} unit(s) submitted in {}ms: 0x{:x}",
                    receipt.direction,
                    receipt.units.len(),
                    started.elapsed().as_millis(),
                    receipt.tx_hash
                );
                Ok(receipt)
            }
            Err(err) => {
                log_error!(
                    "{} failed after {} [{}]: {}",
                    request.direction,
                    trail.current(),
                    err.kind(),
                    err
                );
                Err(err)
            }
        }
    }

    async fn run(&self, request: &SwapRequest, trail: &mut StateTrail) -> Result<SwapReceipt> {
        let count = Self::validate(request)?;
        let key = request.pool;
        let direction = request.direction;

        log_search!("Locating {} pool for {}", direction, key);
        let pool = self.locator.locate(&key).await?;
        Self::enter(trail);

        // Reserves and holdings are independent reads against the same block range
        let owner = match direction {
            Direction::Buy => pool,
            Direction::Sell => self.ledger.sender(),
        };
        let (base_reserve, fractional_reserve, holdings) = tokio::try_join!(
            self.pair.base_reserves(pool),
            self.pair.fractional_reserves(pool),
            self.holdings.units_owned_by(owner, key.collection),
        )?;
        let reserves = ReservePair::new(base_reserve, fractional_reserve);
        log_reserves!(
            "Pool {:?} reserves {}; {} unit(s) held by {:?}",
            pool,
            reserves,
            holdings.len(),
            owner
        );
        Self::enter(trail);

        let snapshot = PoolSnapshot::new(reserves, self.terms.fee, self.terms.rounding);
        let quote = match direction {
            Direction::Buy => snapshot.buy_quote(request.size)?,
            Direction::Sell => snapshot.sell_quote(request.size)?,
        };
        let bound = QuoteEngine::bound_with_slippage(&quote, self.terms.slippage_bps)?;
        let quoted_at = self.clock.now_unix();
        let deadline = self
            .pair
            .supports_deadline()
            .then(|| Deadline::after(quoted_at, self.terms.deadline_window_secs));
        if let Ok(spot) = snapshot.spot_price() {
            debug!(%spot, fee = %self.terms.fee, "spot price per unit");
        }
        log_quote!(
            "Quoted {} {} units: {} (bound {}, deadline {})",
            direction,
            request.size,
            quote,
            bound,
            deadline.map_or_else(|| "none".to_string(), |d| d.to_string())
        );
        Self::enter(trail);

        let units = match direction {
            Direction::Buy => UnitSelector::select_for_buy(&holdings, count)?,
            Direction::Sell => UnitSelector::select_for_sell(&holdings, count)?,
        };
        log_units!("Selected units {}", units);
        Self::enter(trail);

        let mut approval_tx = None;
        let mut messages = Vec::new();
        if direction == Direction::Sell {
            approval_tx = self.ensure_approval(key.collection, pool).await?;
            Self::enter(trail);

            let attestations = self.resolver.resolve(&units, key.collection).await?;
            log_oracle!("Resolved {} attestation(s)", attestations.len());
            messages = attestations
                .into_iter()
                .map(|attestation| attestation.message)
                .collect();
            Self::enter(trail);
        }

        // Token-based pools pull the base asset, so the pool needs an allowance
        if direction == Direction::Buy && !key.is_native_base() {
            approval_tx = self.ensure_allowance(key.base_asset, pool, bound).await?;
        }

        let value = if direction == Direction::Buy && key.is_native_base() {
            bound
        } else {
            U256::zero()
        };
        let tx_hash = match direction {
            Direction::Buy => {
                let order = BuyOrder {
                    token_ids: units.token_ids(),
                    max_cost: bound,
                    deadline,
                };
                self.pair.nft_buy(pool, &order, value).await?
            }
            Direction::Sell => {
                let proofs = if key.has_eligibility_root() {
                    request.proofs.clone()
                } else {
                    Vec::new()
                };
                let order = SellOrder {
                    token_ids: units.token_ids(),
                    min_proceeds: bound,
                    deadline,
                    proofs,
                    messages,
                };
                self.pair.nft_sell(pool, &order).await?
            }
        };
        log_swap!("Submitted {} to {:?}: 0x{:x}", direction, pool, tx_hash);
        Self::enter(trail);

        // Swap finality is the caller's to observe
        Self::enter(trail);

        Ok(SwapReceipt {
            direction,
            pool,
            reserves,
            quote,
            bound,
            value,
            units,
            deadline,
            quoted_at,
            approval_tx,
            tx_hash,
            states: trail.visited().to_vec(),
        })
    }

    /// Checks that need no collaborator; returns the whole-unit count
    fn validate(request: &SwapRequest) -> Result<usize> {
        if request.size.is_zero() {
            return Err(SwapError::InvalidAmount);
        }
        let count = request.size.whole_units()?;

        if request.direction == Direction::Sell && request.pool.has_eligibility_root() {
            if request.proofs.len() != count {
                return Err(SwapError::InvalidRequest(format!(
                    "{} merkle proof(s) supplied for {} unit(s)",
                    request.proofs.len(),
                    count
                )));
            }
        } else if !request.proofs.is_empty() {
            log_warning!("Ignoring merkle proofs: pool has no eligibility root or trade is a buy");
        }
        Ok(count)
    }

    /// Make `pool` an operator for the trader and observe it final
    ///
    /// Returns the approval transaction when one had to be sent.
    async fn ensure_approval(&self, collection: Address, pool: Address) -> Result<Option<H256>> {
        let owner = self.ledger.sender();
        if self
            .approval
            .is_approved_for_all(collection, owner, pool)
            .await?
        {
            log_approval!("Pool {:?} already approved as operator", pool);
            return Ok(None);
        }

        let tx_hash = self
            .approval
            .set_approval_for_all(collection, pool, true)
            .await?;
        self.confirm_approval(tx_hash).await?;
        Ok(Some(tx_hash))
    }

    /// Let `pool` spend at least `amount` of the trader's base token
    ///
    /// An allowance that already covers the bound needs no transaction.
    async fn ensure_allowance(
        &self,
        token: Address,
        pool: Address,
        amount: U256,
    ) -> Result<Option<H256>> {
        let owner = self.ledger.sender();
        let current = self.allowance.allowance(token, owner, pool).await?;
        if current >= amount {
            log_approval!("Pool {:?} allowance {} covers {}", pool, current, amount);
            return Ok(None);
        }

        let tx_hash = self.allowance.approve(token, pool, amount).await?;
        self.confirm_approval(tx_hash).await?;
        Ok(Some(tx_hash))
    }

    /// Wait for an approval transaction and require it to have succeeded
    async fn confirm_approval(&self, tx_hash: H256) -> Result<()> {
        log_timing!("Waiting for approval 0x{:x} to confirm", tx_hash);

        let confirmation =
            self.ledger
                .wait(tx_hash)
                .await
                .map_err(|err| SwapError::ApprovalNotConfirmed {
                    reason: err.to_string(),
                })?;
        if !confirmation.succeeded {
            return Err(SwapError::ApprovalNotConfirmed {
                reason: format!("approval 0x{tx_hash:x} reverted"),
            });
        }

        log_approval!(
            "Approval confirmed in block {}",
            confirmation
                .block_number
                .map_or_else(|| "unknown".to_string(), |block| block.to_string())
        );
        Ok(())
    }

    fn enter(trail: &mut StateTrail) {
        let state = trail.advance();
        debug!(%state, "entered state");
    }
}
