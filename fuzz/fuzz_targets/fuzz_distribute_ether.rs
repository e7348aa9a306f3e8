#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use distributor_core::{BatchDistributor, Invocation};
use distributor_host::NativeLedger;
use distributor_nullables::{ContractKind, NullLedger};
use distributor_types::{Address, Amount, Batch};

#[derive(Debug, Arbitrary)]
struct Input {
    value: u64,
    gas_limit: Option<u32>,
    entries: Vec<(u8, u64)>,
    non_payable: Vec<u8>,
}

// Whatever the outcome, no native value is created or destroyed and the
// distributor never keeps any.
fuzz_target!(|input: Input| {
    let caller = Address::from_low_u64(0x5e);
    let distributor_addr = Address::from_low_u64(0xd157);
    let mut ledger = NullLedger::new();
    ledger.deploy_contract(distributor_addr, ContractKind::Payable);
    ledger.fund(caller, Amount::from_raw(u64::MAX as u128));
    for &n in &input.non_payable {
        ledger.deploy_contract(Address::from_low_u64(n as u64 + 1), ContractKind::NonPayable);
    }

    let mut batch = Batch::default();
    for &(n, amount) in input.entries.iter().take(64) {
        batch.push(Address::from_low_u64(n as u64 + 1), amount as u128);
    }
    // Recipients and the caller all live in 1..=256.
    let accounts: Vec<Address> = (1..=256u64)
        .map(Address::from_low_u64)
        .chain([distributor_addr])
        .collect();
    let sum = |ledger: &NullLedger| {
        accounts
            .iter()
            .fold(Amount::ZERO, |acc, a| acc.saturating_add(ledger.balance_of(a)))
    };
    let before = sum(&ledger);

    let mut invocation =
        Invocation::distribute_ether(caller, Amount::from_raw(input.value as u128), batch);
    if let Some(limit) = input.gas_limit {
        invocation = invocation.with_gas_limit(limit as u64);
    }
    let _ = BatchDistributor::new(distributor_addr).execute(&mut ledger, invocation);

    assert_eq!(sum(&ledger), before);
    assert_eq!(ledger.balance_of(&distributor_addr), Amount::ZERO);
});
