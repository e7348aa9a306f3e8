//! Atomic batch distribution.
//!
//! Two operations share one batch representation:
//! - **distributeEther**: pays every recipient out of the value attached to the
//!   call and refunds the remainder to the caller.
//! - **distributeToken**: pulls every amount from the caller's allowance
//!   straight to its recipient, tolerating tokens that report failure with
//!   `false` or with no return value at all.
//!
//! Either every transfer in an invocation commits or none does. The host
//! supplies that guarantee through [`distributor_host::Journaled`]; the
//! routines here only have to fail loudly.

pub mod distributor;
pub mod error;
mod native;
pub mod safe_transfer;
mod token;
pub mod tracing_spans;

pub use distributor::{BatchDistributor, Call, Distribution, Invocation, Receipt};
pub use error::{DistributorError, FailureKind};
pub use safe_transfer::safe_transfer_from;
