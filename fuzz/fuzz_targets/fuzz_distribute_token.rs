#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use distributor_core::{BatchDistributor, Invocation};
use distributor_host::TokenLedger;
use distributor_nullables::{NullLedger, TokenDialect};
use distributor_types::{Address, Amount, Batch};

#[derive(Debug, Arbitrary)]
struct Input {
    dialect: u8,
    allowance: u64,
    balance: u64,
    entries: Vec<(u8, u64)>,
}

// The allowance is consumed by exactly the batch total or not at all.
fuzz_target!(|input: Input| {
    let caller = Address::from_low_u64(0x5e);
    let distributor_addr = Address::from_low_u64(0xd157);
    let token_addr = Address::from_low_u64(0x7070);
    let dialect = match input.dialect % 3 {
        0 => TokenDialect::Standard,
        1 => TokenDialect::ReturnFalse,
        _ => TokenDialect::NoReturn,
    };

    let mut ledger = NullLedger::new();
    let token = ledger.deploy_token(token_addr, dialect);
    token.mint(caller, Amount::from_raw(input.balance as u128));
    token.approve(caller, distributor_addr, Amount::from_raw(input.allowance as u128));

    let mut batch = Batch::default();
    for &(n, amount) in input.entries.iter().take(64) {
        batch.push(Address::from_low_u64(n as u64 + 1), amount as u128);
    }
    let total = batch.total();

    let result = BatchDistributor::new(distributor_addr)
        .execute(&mut ledger, Invocation::distribute_token(caller, token_addr, batch));
    let left = ledger.allowance(&token_addr, &caller, &distributor_addr);
    let allowance = Amount::from_raw(input.allowance as u128);

    match (result, total) {
        (Ok(_), Ok(total)) => assert_eq!(left.checked_add(total), Some(allowance)),
        (Ok(_), Err(_)) => panic!("overflowing batch committed"),
        (Err(_), _) => assert_eq!(left, allowance),
    }
});
