//! Batch size is bounded by the execution budget, not by a recipient count.

use distributor_core::{BatchDistributor, FailureKind, Invocation};
use distributor_host::{GasSchedule, NativeLedger, TokenLedger};
use distributor_nullables::{ContractKind, NullLedger, TokenDialect};
use distributor_types::{Address, Amount, Batch};

const DISTRIBUTOR: u64 = 0xd157;
const SENDER: u64 = 0x5e;
const TOKEN: u64 = 0x20;

fn addr(n: u64) -> Address {
    Address::from_low_u64(n)
}

fn setup() -> (NullLedger, BatchDistributor) {
    let mut ledger = NullLedger::new();
    ledger.deploy_contract(addr(DISTRIBUTOR), ContractKind::Payable);
    ledger.fund(addr(SENDER), Amount::parse_native("10000").unwrap());
    (ledger, BatchDistributor::new(addr(DISTRIBUTOR)))
}

/// `count` fresh recipients, none of which exist on the ledger yet.
fn fresh_recipients(count: u64, amount: Amount) -> Batch {
    let mut batch = Batch::default();
    for n in 0..count {
        batch.push(addr(0x1_0000 + n), amount);
    }
    batch
}

#[test]
fn transfers_ether_to_five_hundred_fresh_addresses() {
    let (mut ledger, distributor) = setup();
    let amount = Amount::parse_native("0.00001").unwrap();
    let payload = fresh_recipients(500, amount);

    let receipt = distributor
        .execute(
            &mut ledger,
            Invocation::distribute_ether(addr(SENDER), Amount::parse_native("5.0").unwrap(), payload),
        )
        .unwrap();

    assert_eq!(receipt.distribution.transfers, 500);
    assert!(receipt.gas_used <= GasSchedule::default().gas_limit);
    assert_eq!(ledger.balance_of(&addr(0x1_0000 + 499)), amount);
    assert_eq!(receipt.distribution.refunded, Amount::parse_native("4.995").unwrap());
}

#[test]
fn thousand_fresh_addresses_exhaust_the_default_budget() {
    let (mut ledger, distributor) = setup();
    let amount = Amount::parse_native("0.00001").unwrap();
    let payload = fresh_recipients(1000, amount);

    let err = distributor
        .execute(
            &mut ledger,
            Invocation::distribute_ether(addr(SENDER), Amount::parse_native("5.0").unwrap(), payload),
        )
        .unwrap_err();

    assert_eq!(err.kind(), FailureKind::ResourceExhausted);
    assert_eq!(ledger.balance_of(&addr(0x1_0000)), Amount::ZERO);
    assert_eq!(ledger.balance_of(&addr(SENDER)), Amount::parse_native("10000").unwrap());
}

#[test]
fn raising_the_budget_lifts_the_limit() {
    let schedule = GasSchedule {
        gas_limit: 60_000_000,
        ..GasSchedule::default()
    };
    let mut ledger = NullLedger::with_schedule(schedule);
    ledger.deploy_contract(addr(DISTRIBUTOR), ContractKind::Payable);
    ledger.fund(addr(SENDER), Amount::parse_native("10000").unwrap());
    let distributor = BatchDistributor::new(addr(DISTRIBUTOR));
    let payload = fresh_recipients(1000, Amount::parse_native("0.00001").unwrap());

    let receipt = distributor
        .execute(
            &mut ledger,
            Invocation::distribute_ether(addr(SENDER), Amount::parse_native("5.0").unwrap(), payload),
        )
        .unwrap();

    assert_eq!(receipt.distribution.transfers, 1000);
}

#[test]
fn transfers_tokens_to_a_hundred_addresses() {
    let (mut ledger, distributor) = setup();
    let token = ledger.deploy_token(addr(TOKEN), TokenDialect::Standard);
    token.mint(addr(SENDER), Amount::from_raw(1_000_000));
    token.approve(addr(SENDER), addr(DISTRIBUTOR), Amount::from_raw(100));
    let payload = fresh_recipients(100, Amount::from_raw(1));

    distributor
        .execute(
            &mut ledger,
            Invocation::distribute_token(addr(SENDER), addr(TOKEN), payload),
        )
        .unwrap();

    assert_eq!(
        ledger.allowance(&addr(TOKEN), &addr(SENDER), &addr(DISTRIBUTOR)),
        Amount::ZERO
    );
    assert_eq!(ledger.token_balance(&addr(TOKEN), &addr(0x1_0000 + 42)), Amount::from_raw(1));
}
