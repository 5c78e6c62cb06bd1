//! Mapping adapter failures onto collaborator errors
//!
//! `CollaboratorError` and the transport error types are both foreign to this
//! crate, so conversions are plain functions rather than `From` impls.

use ethers::abi::{self, ParamType, Token};
use ethers::providers::{JsonRpcError, MiddlewareError};
use swap_orchestrator::CollaboratorError;

/// Selector of Solidity's `Error(string)`
const ERROR_STRING_SELECTOR: [u8; 4] = [0x08, 0xc3, 0x79, 0xa0];

const EXECUTION_REVERTED: &str = "execution reverted";

/// Reverts the pair contract raises when the trade deadline has passed
const DEADLINE_REASONS: &[&str] = &["Expired"];

/// HTTP client failures
pub fn http_error(err: reqwest::Error) -> CollaboratorError {
    if err.is_decode() {
        CollaboratorError::Malformed(err.to_string())
    } else {
        CollaboratorError::Transport(err.to_string())
    }
}

/// ABI encoding or decoding failures
pub fn abi_error(err: abi::Error) -> CollaboratorError {
    CollaboratorError::Malformed(err.to_string())
}

/// Split middleware failures into node rejections and transport problems
pub fn middleware_error<E: MiddlewareError>(err: E) -> CollaboratorError {
    match err.as_error_response() {
        Some(response) => CollaboratorError::Reverted {
            reason: revert_reason(response),
        },
        None => CollaboratorError::Transport(err.to_string()),
    }
}

/// Re-tag reverts the pair contract uses for its deadline check
pub fn classify_pair_revert(err: CollaboratorError) -> CollaboratorError {
    match err {
        CollaboratorError::Reverted { reason } if is_deadline_reason(&reason) => {
            CollaboratorError::DeadlineExpired { reason }
        }
        other => other,
    }
}

fn is_deadline_reason(reason: &str) -> bool {
    DEADLINE_REASONS.iter().any(|known| reason == *known)
}

/// Best available revert reason from a JSON-RPC error response
///
/// Prefers ABI-encoded `Error(string)` data, then the reason embedded in the
/// node's message, then the message itself.
pub fn revert_reason(response: &JsonRpcError) -> String {
    let from_data = response
        .data
        .as_ref()
        .and_then(|data| data.as_str())
        .and_then(|hex_data| hex::decode(hex_data.trim_start_matches("0x")).ok())
        .and_then(|bytes| decode_error_string(&bytes));
    if let Some(reason) = from_data {
        return reason;
    }

    match response.message.strip_prefix(EXECUTION_REVERTED) {
        Some(rest) if !rest.trim().is_empty() => {
            rest.trim_start_matches(':').trim().to_string()
        }
        _ => response.message.clone(),
    }
}

/// Decode `Error(string)` revert data
pub fn decode_error_string(data: &[u8]) -> Option<String> {
    let payload = data.strip_prefix(&ERROR_STRING_SELECTOR[..])?;
    match abi::decode(&[ParamType::String], payload).ok()?.pop()? {
        Token::String(reason) => Some(reason),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn encoded_reason(reason: &str) -> Vec<u8> {
        let mut data = ERROR_STRING_SELECTOR.to_vec();
        data.extend(abi::encode(&[Token::String(reason.to_string())]));
        data
    }

    fn rpc_error(message: &str, data: Option<serde_json::Value>) -> JsonRpcError {
        JsonRpcError {
            code: 3,
            message: message.to_string(),
            data,
        }
    }

    #[test]
    fn test_decodes_error_string() {
        assert_eq!(
            decode_error_string(&encoded_reason("Slippage: amount in")).as_deref(),
            Some("Slippage: amount in")
        );
        assert_eq!(decode_error_string(&[0xde, 0xad, 0xbe, 0xef]), None);
        assert_eq!(decode_error_string(&[]), None);
    }

    #[test]
    fn test_reason_prefers_revert_data() {
        let data = format!("0x{}", hex::encode(encoded_reason("Expired")));
        let response = rpc_error("execution reverted: something else", Some(json!(data)));
        assert_eq!(revert_reason(&response), "Expired");
    }

    #[test]
    fn test_reason_falls_back_to_message() {
        assert_eq!(
            revert_reason(&rpc_error("execution reverted: Expired", None)),
            "Expired"
        );
        assert_eq!(
            revert_reason(&rpc_error("insufficient funds for gas * price + value", None)),
            "insufficient funds for gas * price + value"
        );
        assert_eq!(
            revert_reason(&rpc_error("execution reverted", None)),
            "execution reverted"
        );
    }

    #[test]
    fn test_deadline_revert_is_retagged() {
        let err = classify_pair_revert(CollaboratorError::Reverted {
            reason: "Expired".to_string(),
        });
        assert_eq!(
            err,
            CollaboratorError::DeadlineExpired {
                reason: "Expired".to_string()
            }
        );

        let other = CollaboratorError::Reverted {
            reason: "Invalid merkle proof".to_string(),
        };
        assert_eq!(classify_pair_revert(other.clone()), other);
    }
}
