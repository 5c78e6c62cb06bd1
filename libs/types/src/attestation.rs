//! Oracle attestations for sell-side trades

use ethers_core::types::{Bytes, H256, U256};
use serde::{Deserialize, Serialize};

use crate::units::UnitId;

/// Signed oracle message, passed to the pool without interpretation
///
/// The pool checks the signature and the validity window; this crate only
/// carries the fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedMessage {
    pub id: H256,
    pub payload: Bytes,
    pub timestamp: U256,
    pub signature: Bytes,
}

/// Attestation bound to a single unit of the collection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attestation {
    pub unit_id: UnitId,
    pub message: SignedMessage,
}
