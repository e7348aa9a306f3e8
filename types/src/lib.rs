//! Fundamental value types for batch distribution.
//!
//! This crate defines the types shared by every other crate in the workspace:
//! account addresses, 256-bit amounts, and the batch of transactions a caller
//! hands to one distribution invocation.

pub mod address;
pub mod amount;
pub mod batch;
pub mod error;

pub use address::Address;
pub use amount::{Amount, NATIVE_DECIMALS};
pub use batch::{Batch, Transaction};
pub use error::TypesError;
