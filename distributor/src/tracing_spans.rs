//! Span constructors for distribution invocations.

use distributor_types::Address;
use tracing::{info_span, Span};

/// Span covering one full invocation, from intrinsic check to commit/revert.
pub fn invocation_span(call: &str, caller: &Address, entries: usize) -> Span {
    info_span!("distribute", call = %call, caller = %caller, entries = entries)
}
