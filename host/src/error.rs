use distributor_types::{Address, Amount};
use thiserror::Error;

/// The host stopped executing the invocation.
///
/// Never caught by the distributor: it propagates unmodified and the host
/// rolls the whole invocation back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExecutionHalt {
    #[error("out of gas: limit {limit}, needed {needed}")]
    OutOfGas { limit: u64, needed: u64 },
}

/// The host refused to start the invocation. No state has been touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("transaction requires at least {required} gas but got {provided}")]
    IntrinsicGas { required: u64, provided: u64 },

    #[error("insufficient funds for attached value: {account} has {balance}, needs {needed}")]
    InsufficientFunds {
        account: Address,
        balance: Amount,
        needed: Amount,
    },
}

/// A token ledger's own failure reason, surfaced verbatim to the caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenRevert {
    #[error("insufficient allowance: spender {spender} has {allowance}, needs {needed}")]
    InsufficientAllowance {
        spender: Address,
        allowance: Amount,
        needed: Amount,
    },

    #[error("insufficient balance: {sender} has {balance}, needs {needed}")]
    InsufficientBalance {
        sender: Address,
        balance: Amount,
        needed: Amount,
    },

    #[error("invalid receiver: {0}")]
    InvalidReceiver(Address),

    #[error("invalid sender: {0}")]
    InvalidSender(Address),

    #[error("{0}")]
    Custom(String),
}

/// How a token call failed before producing return data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenCallError {
    /// The token aborted. `None` means it gave no reason.
    #[error("token call reverted{}", .0.as_ref().map(|r| format!(": {r}")).unwrap_or_default())]
    Reverted(Option<TokenRevert>),

    #[error(transparent)]
    Halted(#[from] ExecutionHalt),
}
