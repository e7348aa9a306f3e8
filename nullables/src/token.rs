//! Nullable fungible token with selectable failure dialect.

use std::collections::HashMap;

use distributor_host::{ReturnData, TokenCallError, TokenRevert};
use distributor_types::{Address, Amount};

/// How a token reports the outcome of `transferFrom`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TokenDialect {
    /// Returns `true` on success, reverts with a reason on failure.
    #[default]
    Standard,
    /// Returns `false` on failure instead of reverting.
    ReturnFalse,
    /// Returns nothing on success, reverts without a reason on failure.
    NoReturn,
}

/// An in-memory token ledger.
///
/// A `MAX` allowance is treated as unlimited and never decremented, the way
/// most production tokens do it.
#[derive(Clone, Debug, Default)]
pub struct NullToken {
    dialect: TokenDialect,
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
}

impl NullToken {
    pub fn new(dialect: TokenDialect) -> Self {
        Self {
            dialect,
            ..Self::default()
        }
    }

    pub fn dialect(&self) -> TokenDialect {
        self.dialect
    }

    pub fn balance_of(&self, account: &Address) -> Amount {
        self.balances.get(account).copied().unwrap_or_default()
    }

    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Credit `amount` to `to`, saturating at `MAX`.
    pub fn mint(&mut self, to: Address, amount: Amount) {
        let balance = self.balances.entry(to).or_default();
        *balance = balance.saturating_add(amount);
    }

    pub fn approve(&mut self, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((owner, spender), amount);
    }

    /// Execute `transferFrom(owner, to, amount)` called by `spender`.
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<ReturnData, TokenCallError> {
        match self.try_transfer_from(spender, owner, to, amount) {
            Ok(()) => Ok(match self.dialect {
                TokenDialect::NoReturn => ReturnData::empty(),
                _ => ReturnData::bool(true),
            }),
            Err(reason) => match self.dialect {
                TokenDialect::Standard => Err(TokenCallError::Reverted(Some(reason))),
                TokenDialect::ReturnFalse => Ok(ReturnData::bool(false)),
                TokenDialect::NoReturn => Err(TokenCallError::Reverted(None)),
            },
        }
    }

    /// Validate everything first, then mutate, so a failure leaves no trace.
    fn try_transfer_from(
        &mut self,
        spender: &Address,
        owner: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TokenRevert> {
        let allowance = self.allowance(owner, spender);
        if allowance != Amount::MAX && allowance < amount {
            return Err(TokenRevert::InsufficientAllowance {
                spender: *spender,
                allowance,
                needed: amount,
            });
        }
        if owner.is_zero() {
            return Err(TokenRevert::InvalidSender(*owner));
        }
        if to.is_zero() {
            return Err(TokenRevert::InvalidReceiver(*to));
        }
        let balance = self.balance_of(owner);
        if balance < amount {
            return Err(TokenRevert::InsufficientBalance {
                sender: *owner,
                balance,
                needed: amount,
            });
        }

        if allowance != Amount::MAX {
            self.approve(*owner, *spender, allowance.saturating_sub(amount));
        }
        self.balances.insert(*owner, balance.saturating_sub(amount));
        let credited = self.balance_of(to).saturating_add(amount);
        self.balances.insert(*to, credited);
        Ok(())
    }
}
