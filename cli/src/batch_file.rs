//! Batch files with human-readable amounts.
//!
//! Same shape as the wire batch, but amounts are decimal strings in whole
//! units that get scaled by the token's decimals:
//!
//! ```json
//! { "txns": [ { "recipient": "0x…", "amount": "0.2151" } ] }
//! ```
//!
//! Files ending in `.toml` are read as TOML (`[[txns]]` tables), anything
//! else as JSON.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use distributor_types::{Address, Amount, Batch, Transaction, TypesError};

#[derive(Debug, thiserror::Error)]
pub enum BatchFileError {
    #[error("failed to read batch file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid JSON batch: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid TOML batch: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("entry {index}: {source}")]
    Amount { index: usize, source: TypesError },
}

#[derive(Deserialize)]
struct BatchFile {
    txns: Vec<Entry>,
}

#[derive(Deserialize)]
struct Entry {
    recipient: Address,
    amount: UnitAmount,
}

/// Quoted decimals keep full precision; bare integers are accepted for
/// convenience.
#[derive(Deserialize)]
#[serde(untagged)]
enum UnitAmount {
    Text(String),
    Whole(u64),
}

impl BatchFile {
    fn into_batch(self, decimals: u8) -> Result<Batch, BatchFileError> {
        self.txns
            .into_iter()
            .enumerate()
            .map(|(index, entry)| {
                let amount = match entry.amount {
                    UnitAmount::Text(text) => Amount::parse_units(&text, decimals),
                    UnitAmount::Whole(n) => Amount::parse_units(&n.to_string(), decimals),
                }
                .map_err(|source| BatchFileError::Amount { index, source })?;
                Ok(Transaction::new(entry.recipient, amount))
            })
            .collect()
    }
}

pub fn parse_batch_json(text: &str, decimals: u8) -> Result<Batch, BatchFileError> {
    serde_json::from_str::<BatchFile>(text)?.into_batch(decimals)
}

pub fn parse_batch_toml(text: &str, decimals: u8) -> Result<Batch, BatchFileError> {
    toml::from_str::<BatchFile>(text)?.into_batch(decimals)
}

/// Read a batch file, picking the format from the extension.
pub fn load_batch(path: &Path, decimals: u8) -> Result<Batch, BatchFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| BatchFileError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let batch = match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => parse_batch_toml(&text, decimals)?,
        _ => parse_batch_json(&text, decimals)?,
    };
    tracing::debug!(path = %path.display(), entries = batch.len(), "batch loaded");
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ALICE: &str = "0x70997970c51812dc3a010c7d01b50e0d17dc79c8";
    const BOB: &str = "0x3c44cdddb6a900fa2b585dd299e03d12fa4293bc";

    #[test]
    fn scales_decimal_amounts() {
        let text = format!(
            r#"{{ "txns": [
                {{ "recipient": "{ALICE}", "amount": "0.2151" }},
                {{ "recipient": "{BOB}", "amount": 3 }}
            ] }}"#
        );
        let batch = parse_batch_json(&text, 18).unwrap();
        let amounts: Vec<Amount> = batch.iter().map(|t| t.amount).collect();
        assert_eq!(
            amounts,
            vec![
                Amount::from_raw(215_100_000_000_000_000),
                Amount::from_raw(3_000_000_000_000_000_000),
            ]
        );
        assert_eq!(batch.iter().next().unwrap().recipient, ALICE.parse().unwrap());
    }

    #[test]
    fn reads_toml_tables() {
        let text = format!(
            r#"
            [[txns]]
            recipient = "{ALICE}"
            amount = "1000"
            "#
        );
        let batch = parse_batch_toml(&text, 0).unwrap();
        assert_eq!(batch.total(), Ok(Amount::from_raw(1000)));
    }

    #[test]
    fn negative_amount_is_rejected_with_its_index() {
        let text = format!(
            r#"{{ "txns": [
                {{ "recipient": "{ALICE}", "amount": "1" }},
                {{ "recipient": "{BOB}", "amount": "-1" }}
            ] }}"#
        );
        let err = parse_batch_json(&text, 18).unwrap_err();
        assert!(matches!(err, BatchFileError::Amount { index: 1, .. }));
    }

    #[test]
    fn amount_beyond_256_bits_is_out_of_range() {
        let huge = "9".repeat(80);
        let text = format!(r#"{{ "txns": [ {{ "recipient": "{ALICE}", "amount": "{huge}" }} ] }}"#);
        let err = parse_batch_json(&text, 0).unwrap_err();
        assert!(matches!(
            err,
            BatchFileError::Amount { source: TypesError::OutOfRange(_), .. }
        ));
    }

    #[test]
    fn malformed_recipient_fails_to_parse() {
        let text = r#"{ "txns": [ { "recipient": "0x1234", "amount": "1" } ] }"#;
        assert!(matches!(parse_batch_json(text, 18), Err(BatchFileError::Json(_))));
    }

    #[test]
    fn format_follows_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batch.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[[txns]]\nrecipient = \"{BOB}\"\namount = \"2.5\"").unwrap();

        let batch = load_batch(&path, 1).unwrap();
        assert_eq!(batch.total(), Ok(Amount::from_raw(25)));
    }
}
