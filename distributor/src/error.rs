use distributor_host::{ExecutionHalt, HostError, TokenRevert};
use distributor_types::{Address, Amount};
use serde::Serialize;
use thiserror::Error;

/// Why a distribution invocation aborted.
///
/// Every variant means the whole invocation was rolled back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributorError {
    /// A payment to a recipient, or the refund to the caller, did not go through.
    #[error("ether transfer failed (distributor {distributor})")]
    EtherTransferFail { distributor: Address },

    /// The token signalled failure without a reason: `false`, malformed or
    /// missing return data, or a reason-less revert.
    #[error("safe transfer failed for token {token}")]
    SafeTransferFailed { token: Address },

    /// The token's own failure, passed through verbatim.
    #[error(transparent)]
    Token(#[from] TokenRevert),

    #[error("arithmetic overflow")]
    ArithmeticOverflow,

    #[error(transparent)]
    ResourceExhausted(#[from] ExecutionHalt),

    #[error("function is not payable, {value} attached")]
    NonPayable { value: Amount },

    #[error(transparent)]
    Host(#[from] HostError),
}

/// Coarse failure category for callers that branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// A value-movement step failed (payment or refund).
    TransferFailure,
    /// The token ledger rejected the transfer with its own reason.
    TokenFailure,
    ArithmeticOverflow,
    ResourceExhausted,
    /// The invocation was refused before any transfer was attempted.
    Rejected,
}

impl DistributorError {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EtherTransferFail { .. } | Self::SafeTransferFailed { .. } => {
                FailureKind::TransferFailure
            }
            Self::Token(_) => FailureKind::TokenFailure,
            Self::ArithmeticOverflow => FailureKind::ArithmeticOverflow,
            Self::ResourceExhausted(_) => FailureKind::ResourceExhausted,
            Self::NonPayable { .. } | Self::Host(_) => FailureKind::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refund_and_payment_failures_share_a_kind() {
        let err = DistributorError::EtherTransferFail {
            distributor: Address::from_low_u64(1),
        };
        assert_eq!(err.kind(), FailureKind::TransferFailure);
        let err = DistributorError::SafeTransferFailed {
            token: Address::from_low_u64(2),
        };
        assert_eq!(err.kind(), FailureKind::TransferFailure);
    }

    #[test]
    fn halts_and_host_refusals_are_distinguishable() {
        let halt = DistributorError::from(ExecutionHalt::OutOfGas { limit: 1, needed: 2 });
        assert_eq!(halt.kind(), FailureKind::ResourceExhausted);
        assert_eq!(halt.to_string(), "out of gas: limit 1, needed 2");

        let refused = DistributorError::from(HostError::IntrinsicGas {
            required: 21_000,
            provided: 10,
        });
        assert_eq!(refused.kind(), FailureKind::Rejected);
    }

    #[test]
    fn kinds_serialize_in_snake_case() {
        assert_eq!(
            serde_json::to_string(&FailureKind::TransferFailure).unwrap(),
            "\"transfer_failure\""
        );
        assert_eq!(
            serde_json::to_string(&FailureKind::ResourceExhausted).unwrap(),
            "\"resource_exhausted\""
        );
    }
}
