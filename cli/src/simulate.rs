//! Run a batch against a fresh in-memory ledger.

use std::collections::BTreeMap;

use serde::Serialize;

use distributor_core::{BatchDistributor, DistributorError, FailureKind, Invocation, Receipt};
use distributor_host::{GasSchedule, NativeLedger, TokenLedger};
use distributor_nullables::{ContractKind, NullLedger, TokenDialect};
use distributor_types::{Address, Amount, Batch, NATIVE_DECIMALS};

/// Where the simulated distributor is deployed.
pub fn distributor_address() -> Address {
    Address::from_low_u64(0xd157)
}

/// The simulated caller.
pub fn caller_address() -> Address {
    Address::from_low_u64(0xca11)
}

/// The simulated token contract.
pub fn token_address() -> Address {
    Address::from_low_u64(0x70c3)
}

/// How a simulated run ended.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Committed {
        receipt: Receipt,
        /// Final balance of every distinct recipient, in whole units.
        balances: BTreeMap<Address, String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        allowance_left: Option<String>,
    },
    Reverted {
        kind: FailureKind,
        error: String,
    },
}

impl Outcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    fn reverted(err: DistributorError) -> Self {
        Self::Reverted {
            kind: err.kind(),
            error: err.to_string(),
        }
    }
}

fn balances(
    batch: &Batch,
    decimals: u8,
    balance_of: impl Fn(&Address) -> Amount,
) -> BTreeMap<Address, String> {
    batch
        .iter()
        .map(|txn| (txn.recipient, balance_of(&txn.recipient).format_units(decimals)))
        .collect()
}

fn deploy(schedule: &GasSchedule) -> (NullLedger, BatchDistributor) {
    let mut ledger = NullLedger::with_schedule(schedule.clone());
    ledger.deploy_contract(distributor_address(), ContractKind::Payable);
    (ledger, BatchDistributor::new(distributor_address()))
}

/// Simulate `distributeEther` with `value` attached. The caller is funded
/// with exactly `value`, so every wei it ends with is the refund.
pub fn simulate_ether(
    schedule: &GasSchedule,
    batch: Batch,
    value: Amount,
    gas_limit: Option<u64>,
) -> Outcome {
    let (mut ledger, distributor) = deploy(schedule);
    ledger.fund(caller_address(), value);

    let recipients = batch.clone();
    let mut invocation = Invocation::distribute_ether(caller_address(), value, batch);
    if let Some(limit) = gas_limit {
        invocation = invocation.with_gas_limit(limit);
    }

    match distributor.execute(&mut ledger, invocation) {
        Ok(receipt) => Outcome::Committed {
            receipt,
            balances: balances(&recipients, NATIVE_DECIMALS, |a| ledger.balance_of(a)),
            allowance_left: None,
        },
        Err(err) => Outcome::reverted(err),
    }
}

/// Parameters for a simulated `distributeToken` run.
#[derive(Clone, Debug)]
pub struct TokenRun {
    pub dialect: TokenDialect,
    pub allowance: Amount,
    /// Caller's token balance. `None` mints exactly the batch total.
    pub balance: Option<Amount>,
    pub decimals: u8,
    pub gas_limit: Option<u64>,
}

/// Simulate `distributeToken` against a freshly deployed token.
pub fn simulate_token(schedule: &GasSchedule, batch: Batch, run: &TokenRun) -> Outcome {
    let (mut ledger, distributor) = deploy(schedule);
    let minted = run
        .balance
        .unwrap_or_else(|| batch.total().unwrap_or(Amount::MAX));
    let token = ledger.deploy_token(token_address(), run.dialect);
    token.mint(caller_address(), minted);
    token.approve(caller_address(), distributor_address(), run.allowance);

    let recipients = batch.clone();
    let mut invocation = Invocation::distribute_token(caller_address(), token_address(), batch);
    if let Some(limit) = run.gas_limit {
        invocation = invocation.with_gas_limit(limit);
    }

    match distributor.execute(&mut ledger, invocation) {
        Ok(receipt) => {
            let left = ledger.allowance(&token_address(), &caller_address(), &distributor_address());
            Outcome::Committed {
                receipt,
                balances: balances(&recipients, run.decimals, |a| {
                    ledger.token_balance(&token_address(), a)
                }),
                allowance_left: Some(left.format_units(run.decimals)),
            }
        }
        Err(err) => Outcome::reverted(err),
    }
}
