//! Offline simulator for the batch distributor.
//!
//! Loads batches from JSON or TOML files, runs them against a fresh
//! [`NullLedger`](distributor_nullables::NullLedger), and reports the outcome
//! as JSON.

pub mod batch_file;
pub mod config;
pub mod simulate;

pub use batch_file::{load_batch, parse_batch_json, parse_batch_toml, BatchFileError};
pub use config::{ConfigError, DistributorConfig};
pub use simulate::{simulate_ether, simulate_token, Outcome, TokenRun};
