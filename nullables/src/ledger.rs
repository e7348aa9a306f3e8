//! Nullable ledger: an in-memory host for deterministic distribution tests.

use std::collections::HashMap;

use distributor_host::{
    ExecutionHalt, GasMeter, GasSchedule, HostError, Journaled, Metered, NativeLedger,
    ReturnData, TokenCallError, TokenLedger, TransferOutcome,
};
use distributor_types::{Address, Amount};

use crate::token::{NullToken, TokenDialect};

/// What sits at an address with code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContractKind {
    /// Accepts native value.
    Payable,
    /// Has no receive hook: every non-zero value transfer to it fails.
    NonPayable,
}

#[derive(Clone, Debug, Default)]
struct LedgerState {
    balances: HashMap<Address, Amount>,
    contracts: HashMap<Address, ContractKind>,
    tokens: HashMap<Address, NullToken>,
}

/// An in-memory host ledger.
///
/// Checkpoints are whole-state copies, which keeps rollback trivially
/// correct at test sizes.
pub struct NullLedger {
    state: LedgerState,
    schedule: GasSchedule,
    meter: GasMeter,
}

impl NullLedger {
    pub fn new() -> Self {
        Self::with_schedule(GasSchedule::default())
    }

    pub fn with_schedule(schedule: GasSchedule) -> Self {
        Self {
            state: LedgerState::default(),
            schedule,
            meter: GasMeter::unlimited(),
        }
    }

    /// Credit native value out of thin air.
    pub fn fund(&mut self, account: Address, amount: Amount) {
        let balance = self.state.balances.entry(account).or_default();
        *balance = balance.saturating_add(amount);
    }

    /// Place code at `account`, keeping any balance it already holds.
    pub fn deploy_contract(&mut self, account: Address, kind: ContractKind) {
        self.state.contracts.insert(account, kind);
    }

    /// Deploy a token ledger at `account`. Token contracts are non-payable.
    pub fn deploy_token(&mut self, account: Address, dialect: TokenDialect) -> &mut NullToken {
        self.state.contracts.insert(account, ContractKind::NonPayable);
        self.state
            .tokens
            .entry(account)
            .or_insert_with(|| NullToken::new(dialect))
    }

    pub fn token(&self, account: &Address) -> Option<&NullToken> {
        self.state.tokens.get(account)
    }

    pub fn token_mut(&mut self, account: &Address) -> Option<&mut NullToken> {
        self.state.tokens.get_mut(account)
    }

    pub fn token_balance(&self, token: &Address, account: &Address) -> Amount {
        self.token(token)
            .map(|t| t.balance_of(account))
            .unwrap_or_default()
    }

    fn exists(&self, account: &Address) -> bool {
        self.state.balances.contains_key(account) || self.state.contracts.contains_key(account)
    }

    fn accepts_value(&self, account: &Address) -> bool {
        !matches!(
            self.state.contracts.get(account),
            Some(ContractKind::NonPayable)
        )
    }

    fn move_value(&mut self, from: &Address, to: &Address, amount: Amount) {
        let debited = self.balance_of(from).saturating_sub(amount);
        self.state.balances.insert(*from, debited);
        let credited = self.balance_of(to).saturating_add(amount);
        self.state.balances.insert(*to, credited);
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl NativeLedger for NullLedger {
    fn balance_of(&self, account: &Address) -> Amount {
        self.state.balances.get(account).copied().unwrap_or_default()
    }

    fn attach_value(
        &mut self,
        caller: &Address,
        callee: &Address,
        value: Amount,
    ) -> Result<(), HostError> {
        if value.is_zero() {
            return Ok(());
        }
        let balance = self.balance_of(caller);
        if balance < value {
            return Err(HostError::InsufficientFunds {
                account: *caller,
                balance,
                needed: value,
            });
        }
        self.move_value(caller, callee, value);
        Ok(())
    }

    fn transfer_value(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<TransferOutcome, ExecutionHalt> {
        let creates_account = !self.exists(to);
        let cost = self
            .schedule
            .value_transfer_cost(amount.is_zero(), creates_account);
        self.meter.charge(cost)?;

        if amount.is_zero() {
            return Ok(TransferOutcome::Delivered);
        }
        if self.balance_of(from) < amount || !self.accepts_value(to) {
            return Ok(TransferOutcome::Rejected);
        }
        self.move_value(from, to, amount);
        Ok(TransferOutcome::Delivered)
    }
}

impl TokenLedger for NullLedger {
    fn transfer_from(
        &mut self,
        token: &Address,
        spender: &Address,
        owner: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<ReturnData, TokenCallError> {
        self.meter.charge(self.schedule.token_call)?;
        match self.state.tokens.get_mut(token) {
            Some(ledger) => ledger.transfer_from(spender, owner, recipient, amount),
            // A call into an account without code succeeds and returns nothing.
            None => Ok(ReturnData::empty()),
        }
    }

    fn allowance(&self, token: &Address, owner: &Address, spender: &Address) -> Amount {
        self.token(token)
            .map(|t| t.allowance(owner, spender))
            .unwrap_or_default()
    }

    fn has_code(&self, account: &Address) -> bool {
        self.state.contracts.contains_key(account)
    }
}

impl Journaled for NullLedger {
    type Checkpoint = LedgerCheckpoint;

    fn checkpoint(&mut self) -> LedgerCheckpoint {
        LedgerCheckpoint(self.state.clone())
    }

    fn revert_to(&mut self, checkpoint: LedgerCheckpoint) {
        self.state = checkpoint.0;
    }

    fn commit(&mut self, _checkpoint: LedgerCheckpoint) {}
}

/// Saved ledger state, restorable via [`Journaled::revert_to`].
pub struct LedgerCheckpoint(LedgerState);

impl Metered for NullLedger {
    fn gas_schedule(&self) -> &GasSchedule {
        &self.schedule
    }

    fn meter(&self) -> &GasMeter {
        &self.meter
    }

    fn meter_mut(&mut self) -> &mut GasMeter {
        &mut self.meter
    }
}
