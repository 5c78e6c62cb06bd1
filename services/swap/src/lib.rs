//! # Swap Orchestrator
//!
//! Prices and executes discrete buy/sell trades against a constant-product
//! pool that trades one NFT collection against a base asset.
//!
//! ## Components
//!
//! - [`PoolLocator`]: registry lookup by (collection, base asset, eligibility root)
//! - [`UnitSelector`]: first-N unit choice from a holdings list
//! - [`AttestationResolver`]: oracle messages aligned with the unit order
//! - [`SwapOrchestrator`]: the linear state machine tying them together
//!
//! Collaborators are reached only through the traits in [`collaborators`];
//! this crate performs no I/O of its own and never reads the environment.
//! In-memory implementations live in `testing`, behind the `testing` feature.

#[macro_use]
pub mod logging;

pub mod attestation;
pub mod clock;
pub mod collaborators;
pub mod error;
pub mod locator;
pub mod orchestrator;
pub mod selector;
pub mod state;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use attestation::AttestationResolver;
pub use clock::{Clock, SystemClock};
pub use collaborators::{
    AttestationOracle, BuyOrder, CollaboratorResult, CollectionApproval, Confirmation,
    HoldingsIndex, Ledger, PairPool, PoolRegistry, SellOrder, TokenAllowance,
};
pub use error::{CollaboratorError, ErrorKind, Result, SwapError};
pub use locator::PoolLocator;
pub use orchestrator::{Collaborators, SwapOrchestrator, SwapReceipt, SwapRequest, TradeTerms};
pub use selector::UnitSelector;
pub use state::{StateTrail, SwapState};
