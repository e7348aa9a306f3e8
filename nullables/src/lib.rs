//! Nullable infrastructure for deterministic testing.
//!
//! The distributor depends on the host only through the traits in
//! `distributor-host`. This crate provides in-memory implementations of those
//! traits that:
//! - Return deterministic results
//! - Can be arranged programmatically (funded accounts, non-payable contracts,
//!   tokens with different failure dialects)
//! - Never touch a real chain
//!
//! Usage: hand a `NullLedger` to the distributor wherever a real host would go.

pub mod ledger;
pub mod token;

pub use ledger::{ContractKind, LedgerCheckpoint, NullLedger};
pub use token::{NullToken, TokenDialect};
