//! Sell-side attestation fetching and ordering

use std::collections::HashMap;
use std::sync::Arc;

use floorswap_types::{Address, Attestation, UnitSelection};
use tracing::debug;

use crate::collaborators::AttestationOracle;
use crate::error::{Result, SwapError};

/// Fetches one attestation per selected unit and aligns them with the selection
///
/// The pool matches messages to units by position, so a batch with any unit
/// missing is rejected as a whole.
#[derive(Clone)]
pub struct AttestationResolver {
    oracle: Arc<dyn AttestationOracle>,
}

impl AttestationResolver {
    pub fn new(oracle: Arc<dyn AttestationOracle>) -> Self {
        Self { oracle }
    }

    pub async fn resolve(
        &self,
        selection: &UnitSelection,
        collection: Address,
    ) -> Result<Vec<Attestation>> {
        let fetched = self.oracle.fetch(collection, selection.as_slice()).await?;
        debug!(
            requested = selection.len(),
            received = fetched.len(),
            "oracle responded"
        );
        align(selection, fetched)
    }
}

/// Re-project `fetched` into selection order
pub fn align(selection: &UnitSelection, fetched: Vec<Attestation>) -> Result<Vec<Attestation>> {
    let mut by_unit: HashMap<_, _> = fetched
        .into_iter()
        .map(|attestation| (attestation.unit_id, attestation))
        .collect();

    selection
        .iter()
        .map(|unit_id| {
            by_unit
                .remove(unit_id)
                .ok_or(SwapError::AttestationMissing { unit_id: *unit_id })
        })
        .collect()
}
