//! Error taxonomy for a single swap run

use std::fmt;

use floorswap_amm::QuoteError;
use floorswap_types::{PoolKey, UnitId, ValidationError, U256};
use thiserror::Error;

/// Failure reported by an external collaborator
///
/// Adapters must keep transport problems apart from calls the ledger executed
/// and rejected, so the caller can tell a retryable outage from a refusal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CollaboratorError {
    /// Collaborator unreachable or timed out
    #[error("Transport failure: {0}")]
    Transport(String),

    /// Call executed and was rejected; `reason` is the verbatim revert reason
    #[error("Execution reverted: {reason}")]
    Reverted { reason: String },

    /// Revert the pool adapter recognised as its deadline check
    #[error("Deadline expired: {reason}")]
    DeadlineExpired { reason: String },

    /// Response could not be decoded
    #[error("Malformed response: {0}")]
    Malformed(String),
}

/// Stable error classification exposed to callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidRequest,
    InvalidAmount,
    InsufficientLiquidity,
    ArithmeticOverflow,
    PoolNotFound,
    InsufficientUnits,
    AttestationMissing,
    ApprovalNotConfirmed,
    DeadlineExpired,
    TransportFailure,
    Reverted,
}

impl ErrorKind {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InvalidRequest => "INVALID_REQUEST",
            Self::InvalidAmount => "INVALID_AMOUNT",
            Self::InsufficientLiquidity => "INSUFFICIENT_LIQUIDITY",
            Self::ArithmeticOverflow => "ARITHMETIC_OVERFLOW",
            Self::PoolNotFound => "POOL_NOT_FOUND",
            Self::InsufficientUnits => "INSUFFICIENT_UNITS",
            Self::AttestationMissing => "ATTESTATION_MISSING",
            Self::ApprovalNotConfirmed => "APPROVAL_NOT_CONFIRMED",
            Self::DeadlineExpired => "DEADLINE_EXPIRED",
            Self::TransportFailure => "TRANSPORT_FAILURE",
            Self::Reverted => "REVERTED",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that end a swap run
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwapError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Trade amount must be positive")]
    InvalidAmount,

    #[error("Insufficient liquidity: requested {requested}, pool holds {available}")]
    InsufficientLiquidity { requested: U256, available: U256 },

    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow { operation: &'static str },

    #[error("No pool registered for {key}")]
    PoolNotFound { key: PoolKey },

    #[error("Insufficient units: requested {requested}, {available} available")]
    InsufficientUnits { requested: usize, available: usize },

    #[error("No attestation returned for unit {unit_id}")]
    AttestationMissing { unit_id: UnitId },

    #[error("Approval not confirmed: {reason}")]
    ApprovalNotConfirmed { reason: String },

    #[error("Deadline expired: {reason}")]
    DeadlineExpired { reason: String },

    #[error("Transport failure: {0}")]
    TransportFailure(String),

    #[error("Reverted: {reason}")]
    Reverted { reason: String },
}

impl SwapError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidRequest(_) => ErrorKind::InvalidRequest,
            Self::InvalidAmount => ErrorKind::InvalidAmount,
            Self::InsufficientLiquidity { .. } => ErrorKind::InsufficientLiquidity,
            Self::ArithmeticOverflow { .. } => ErrorKind::ArithmeticOverflow,
            Self::PoolNotFound { .. } => ErrorKind::PoolNotFound,
            Self::InsufficientUnits { .. } => ErrorKind::InsufficientUnits,
            Self::AttestationMissing { .. } => ErrorKind::AttestationMissing,
            Self::ApprovalNotConfirmed { .. } => ErrorKind::ApprovalNotConfirmed,
            Self::DeadlineExpired { .. } => ErrorKind::DeadlineExpired,
            Self::TransportFailure(_) => ErrorKind::TransportFailure,
            Self::Reverted { .. } => ErrorKind::Reverted,
        }
    }

    /// Whether the caller may retry, re-quoting first
    ///
    /// Pricing and selection failures reflect facts that an immediate retry
    /// will not change.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::TransportFailure | ErrorKind::Reverted)
    }
}

impl From<QuoteError> for SwapError {
    fn from(err: QuoteError) -> Self {
        match err {
            QuoteError::InvalidAmount => Self::InvalidAmount,
            QuoteError::InsufficientLiquidity {
                requested,
                available,
            } => Self::InsufficientLiquidity {
                requested,
                available,
            },
            QuoteError::Overflow { operation } => Self::ArithmeticOverflow { operation },
        }
    }
}

impl From<ValidationError> for SwapError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<CollaboratorError> for SwapError {
    fn from(err: CollaboratorError) -> Self {
        match err {
            CollaboratorError::Transport(message) => Self::TransportFailure(message),
            CollaboratorError::Reverted { reason } => Self::Reverted { reason },
            CollaboratorError::DeadlineExpired { reason } => Self::DeadlineExpired { reason },
            // An undecodable answer leaves the collaborator as unusable as an unreachable one
            CollaboratorError::Malformed(message) => {
                Self::TransportFailure(format!("malformed response: {message}"))
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, SwapError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names() {
        assert_eq!(SwapError::InvalidAmount.kind().as_str(), "INVALID_AMOUNT");
        assert_eq!(
            SwapError::AttestationMissing {
                unit_id: UnitId::from(9)
            }
            .kind()
            .to_string(),
            "ATTESTATION_MISSING"
        );
    }

    #[test]
    fn test_collaborator_errors_keep_revert_reason() {
        let err: SwapError = CollaboratorError::Reverted {
            reason: "Slippage: amount out".to_string(),
        }
        .into();
        assert_eq!(
            err,
            SwapError::Reverted {
                reason: "Slippage: amount out".to_string()
            }
        );
        assert!(err.is_retryable());

        let err: SwapError = CollaboratorError::DeadlineExpired {
            reason: "Expired".to_string(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::DeadlineExpired);
        assert!(!err.is_retryable());

        let err: SwapError = CollaboratorError::Malformed("short return data".into()).into();
        assert_eq!(err.kind(), ErrorKind::TransportFailure);
    }

    #[test]
    fn test_quote_errors_are_terminal() {
        let err: SwapError = QuoteError::InsufficientLiquidity {
            requested: U256::from(5),
            available: U256::from(4),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::InsufficientLiquidity);
        assert!(!err.is_retryable());
    }
}
