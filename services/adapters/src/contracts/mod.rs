//! Contract collaborators bound to ABI definitions over any [`Ledger`]

mod erc20;
mod erc721;
mod pair;
mod registry;

pub use erc20::Erc20Allowance;
pub use erc721::Erc721Approval;
pub use pair::PairContract;
pub use registry::RegistryContract;

use ethers::abi::{Function, Token};
use swap_orchestrator::{CollaboratorError, CollaboratorResult, Ledger};
use floorswap_types::{Address, Bytes};

use crate::error::abi_error;

pub(crate) fn encode(function: &Function, args: &[Token]) -> CollaboratorResult<Bytes> {
    function
        .encode_input(args)
        .map(Bytes::from)
        .map_err(abi_error)
}

/// `eth_call` a single-output view function
pub(crate) async fn call_single(
    ledger: &dyn Ledger,
    contract: Address,
    function: &Function,
    args: &[Token],
) -> CollaboratorResult<Token> {
    let calldata = encode(function, args)?;
    let output = ledger.call(contract, calldata).await?;
    function
        .decode_output(&output)
        .map_err(abi_error)?
        .into_iter()
        .next()
        .ok_or_else(|| CollaboratorError::Malformed(format!("{} returned nothing", function.name)))
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::collections::HashMap;

    use async_trait::async_trait;
    use ethers::abi::{self, Function, Token};
    use floorswap_types::{Address, Bytes, H256, U256};
    use parking_lot::Mutex;
    use swap_orchestrator::{CollaboratorError, CollaboratorResult, Confirmation, Ledger};

    /// Ledger that answers calls by selector and records every send
    #[derive(Default)]
    pub struct RecordingLedger {
        pub sender: Address,
        pub responses: Mutex<HashMap<[u8; 4], Vec<u8>>>,
        pub calls: Mutex<Vec<(Address, Bytes)>>,
        pub sends: Mutex<Vec<(Address, Bytes, U256)>>,
        pub send_error: Mutex<Option<CollaboratorError>>,
    }

    impl RecordingLedger {
        pub fn respond(&self, function: &Function, output: &[Token]) {
            self.responses
                .lock()
                .insert(function.short_signature(), abi::encode(output));
        }

        pub fn last_send(&self) -> (Address, Bytes, U256) {
            self.sends.lock().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl Ledger for RecordingLedger {
        fn sender(&self) -> Address {
            self.sender
        }

        async fn call(&self, contract: Address, calldata: Bytes) -> CollaboratorResult<Bytes> {
            self.calls.lock().push((contract, calldata.clone()));
            let mut selector = [0u8; 4];
            selector.copy_from_slice(&calldata[..4]);
            self.responses
                .lock()
                .get(&selector)
                .cloned()
                .map(Bytes::from)
                .ok_or_else(|| CollaboratorError::Reverted {
                    reason: "unknown selector".to_string(),
                })
        }

        async fn send(
            &self,
            contract: Address,
            calldata: Bytes,
            value: U256,
        ) -> CollaboratorResult<H256> {
            if let Some(err) = self.send_error.lock().clone() {
                return Err(err);
            }
            let mut sends = self.sends.lock();
            sends.push((contract, calldata, value));
            Ok(H256::from_low_u64_be(sends.len() as u64))
        }

        async fn wait(&self, tx_hash: H256) -> CollaboratorResult<Confirmation> {
            Ok(Confirmation {
                tx_hash,
                block_number: Some(1),
                succeeded: true,
            })
        }
    }
}
