//! Batch files through the simulator, end to end.

use std::io::Write;
use std::path::PathBuf;

use distributor_cli::{load_batch, simulate_ether, simulate_token, DistributorConfig, Outcome, TokenRun};
use distributor_core::FailureKind;
use distributor_nullables::TokenDialect;
use distributor_types::{Address, Amount, NATIVE_DECIMALS};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const RECIPIENTS: [&str; 4] = [
    "0x70997970c51812dc3a010c7d01b50e0d17dc79c8",
    "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc",
    "0x90f79bf6eb2c4f870365e785982e1f101e93b906",
    "0x15d34aaf54267db7d7c367839aaf71a00a2c6a65",
];

fn write_batch(dir: &tempfile::TempDir, name: &str, amounts: &[&str]) -> PathBuf {
    let txns: Vec<String> = RECIPIENTS
        .iter()
        .zip(amounts)
        .map(|(r, a)| format!(r#"{{ "recipient": "{r}", "amount": "{a}" }}"#))
        .collect();
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    write!(file, r#"{{ "txns": [{}] }}"#, txns.join(",")).unwrap();
    path
}

// ---------------------------------------------------------------------------
// Ether
// ---------------------------------------------------------------------------

#[test]
fn ether_file_commits_and_refunds() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "ether.json", &["0.2151", "2.040194018"]);
    let batch = load_batch(&path, NATIVE_DECIMALS).unwrap();

    let outcome = simulate_ether(
        &DistributorConfig::default().gas,
        batch,
        Amount::parse_native("5.0").unwrap(),
        None,
    );

    let Outcome::Committed { receipt, balances, .. } = outcome else {
        panic!("expected a committed run");
    };
    assert_eq!(
        receipt.distribution.refunded,
        Amount::parse_native("2.744705982").unwrap()
    );
    assert_eq!(balances[&RECIPIENTS[1].parse::<Address>().unwrap()], "2.040194018");
}

#[test]
fn underfunded_ether_file_reverts() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "ether.json", &["3", "3"]);
    let batch = load_batch(&path, NATIVE_DECIMALS).unwrap();

    let outcome = simulate_ether(
        &DistributorConfig::default().gas,
        batch,
        Amount::parse_native("5").unwrap(),
        None,
    );

    assert!(matches!(
        outcome,
        Outcome::Reverted { kind: FailureKind::TransferFailure, .. }
    ));
}

#[test]
fn configured_budget_limits_the_batch() {
    let config = DistributorConfig::from_toml_str("[gas]\ngas_limit = 50_000").unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "ether.json", &["1", "1", "1", "1"]);
    let batch = load_batch(&path, NATIVE_DECIMALS).unwrap();

    let outcome = simulate_ether(&config.gas, batch, Amount::parse_native("4").unwrap(), None);

    assert!(matches!(
        outcome,
        Outcome::Reverted { kind: FailureKind::ResourceExhausted, .. }
    ));
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[test]
fn token_file_uses_configured_decimals() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "token.json", &["1.5", "0.25"]);
    let batch = load_batch(&path, 6).unwrap();
    let run = TokenRun {
        dialect: TokenDialect::NoReturn,
        allowance: Amount::parse_units("10", 6).unwrap(),
        balance: None,
        decimals: 6,
        gas_limit: None,
    };

    let outcome = simulate_token(&DistributorConfig::default().gas, batch, &run);

    let Outcome::Committed { allowance_left, balances, .. } = outcome else {
        panic!("expected a committed run");
    };
    assert_eq!(allowance_left.as_deref(), Some("8.25"));
    assert_eq!(balances[&RECIPIENTS[0].parse::<Address>().unwrap()], "1.5");
}

#[test]
fn false_returning_token_reports_transfer_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_batch(&dir, "token.json", &["1"]);
    let batch = load_batch(&path, 0).unwrap();
    let run = TokenRun {
        dialect: TokenDialect::ReturnFalse,
        allowance: Amount::ZERO,
        balance: None,
        decimals: 0,
        gas_limit: None,
    };

    let outcome = simulate_token(&DistributorConfig::default().gas, batch, &run);

    assert!(matches!(
        outcome,
        Outcome::Reverted { kind: FailureKind::TransferFailure, .. }
    ));
}
