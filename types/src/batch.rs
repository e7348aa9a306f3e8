//! Transactions and batches.
//!
//! A batch is assembled entirely by the caller and handed by value to one
//! distribution invocation. Nothing in the workspace stores a batch past the
//! call that consumes it.

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::error::TypesError;

/// A single payment: `amount` raw units to `recipient`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    pub recipient: Address,
    pub amount: Amount,
}

impl Transaction {
    pub fn new(recipient: Address, amount: impl Into<Amount>) -> Self {
        Self {
            recipient,
            amount: amount.into(),
        }
    }
}

/// An ordered, possibly empty list of transactions.
///
/// Order is processing order. Duplicate recipients are allowed and apply
/// cumulatively.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch {
    pub txns: Vec<Transaction>,
}

impl Batch {
    pub fn new(txns: Vec<Transaction>) -> Self {
        Self { txns }
    }

    pub fn len(&self) -> usize {
        self.txns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.txns.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Transaction> {
        self.txns.iter()
    }

    pub fn push(&mut self, recipient: Address, amount: impl Into<Amount>) {
        self.txns.push(Transaction::new(recipient, amount));
    }

    /// Sum of all amounts, failing instead of wrapping past 256 bits.
    pub fn total(&self) -> Result<Amount, TypesError> {
        self.txns.iter().try_fold(Amount::ZERO, |acc, txn| {
            acc.checked_add(txn.amount).ok_or(TypesError::Overflow)
        })
    }
}

impl FromIterator<Transaction> for Batch {
    fn from_iter<I: IntoIterator<Item = Transaction>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Batch {
    type Item = Transaction;
    type IntoIter = std::vec::IntoIter<Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.txns.into_iter()
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a Transaction;
    type IntoIter = std::slice::Iter<'a, Transaction>;

    fn into_iter(self) -> Self::IntoIter {
        self.txns.iter()
    }
}
