//! Value-movement primitives.

use distributor_types::{Address, Amount};

use crate::error::{ExecutionHalt, HostError, TokenCallError};

/// Outcome of a native value transfer that did not halt execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransferOutcome {
    Delivered,
    /// The recipient refused the funds or the sender could not cover them.
    Rejected,
}

impl TransferOutcome {
    pub fn is_delivered(self) -> bool {
        matches!(self, Self::Delivered)
    }
}

/// Native-currency side of the host ledger.
pub trait NativeLedger {
    fn balance_of(&self, account: &Address) -> Amount;

    /// Move the value attached to a call from `caller` into `callee` before
    /// the callee runs.
    fn attach_value(
        &mut self,
        caller: &Address,
        callee: &Address,
        value: Amount,
    ) -> Result<(), HostError>;

    /// Send `amount` from `from` to `to`, invoking whatever receive logic the
    /// recipient has.
    fn transfer_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TransferOutcome, ExecutionHalt>;
}

/// Fungible-token side of the host ledger.
pub trait TokenLedger {
    /// Call `token.transferFrom(owner, recipient, amount)` with `spender` as
    /// the calling account. Returns the raw return data untouched.
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        owner: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<ReturnData, TokenCallError>;

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount;

    /// Whether `account` has code deployed.
    fn has_code(&self, account: &Address) -> bool;
}

/// Raw ABI return data from a token call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReturnData(Vec<u8>);

impl ReturnData {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// An ABI-encoded `bool` word.
    pub fn bool(value: bool) -> Self {
        let mut word = vec![0u8; 32];
        word[31] = u8::from(value);
        Self(word)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Strictly decode the first word as a `bool`.
    ///
    /// `None` for data shorter than one word or a word that is neither 0 nor 1.
    pub fn decode_bool(&self) -> Option<bool> {
        let word = self.0.get(..32)?;
        if word[..31].iter().any(|&b| b != 0) {
            return None;
        }
        match word[31] {
            0 => Some(false),
            1 => Some(true),
            _ => None,
        }
    }
}
