//! # Floorswap Adapters
//!
//! Concrete collaborators for the swap orchestrator. This is the only crate
//! in the workspace that performs network I/O.
//!
//! - [`EthersLedger`]: JSON-RPC reads, locally signed writes, receipt polling
//! - [`contracts`]: registry, pair, ERC-721 and ERC-20 bindings over any ledger
//! - [`AlchemyHoldings`]: paginated unit-ownership index
//! - [`ReservoirOracle`]: sell-side attestations
//! - [`wiring::connect`]: everything above, built from a `SwapConfig`

pub mod abi;
pub mod contracts;
pub mod error;
pub mod holdings;
pub mod ledger;
pub mod oracle;
pub mod wiring;

pub use contracts::{Erc20Allowance, Erc721Approval, PairContract, RegistryContract};
pub use holdings::AlchemyHoldings;
pub use ledger::EthersLedger;
pub use oracle::ReservoirOracle;
