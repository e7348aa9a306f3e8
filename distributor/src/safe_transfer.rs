//! Safe token transfers.
//!
//! Tokens disagree on how to say "no": some revert, some return `false`, some
//! return nothing at all. [`safe_transfer_from`] folds every dialect into one
//! outcome so the distribution loop never has to care which one it is
//! talking to.

use distributor_host::{ReturnData, TokenCallError, TokenLedger};
use distributor_types::{Address, Amount};

use crate::error::DistributorError;

/// Call `token.transferFrom(from, to, amount)` as `spender` and normalize the
/// outcome.
///
/// - explicit `true` is success;
/// - empty return data is success only when `token` has code;
/// - `false` or malformed data is [`DistributorError::SafeTransferFailed`];
/// - a revert carrying a reason passes that reason through verbatim, a
///   reason-less revert is [`DistributorError::SafeTransferFailed`];
/// - a halted call propagates as resource exhaustion.
pub fn safe_transfer_from<L>(
    ledger: &mut L,
    token: &Address,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: Amount,
) -> Result<(), DistributorError>
where
    L: TokenLedger + ?Sized,
{
    let failed = || DistributorError::SafeTransferFailed { token: *token };

    let returned = match ledger.transfer_from(token, spender, from, to, amount) {
        Ok(data) => data,
        Err(TokenCallError::Reverted(Some(reason))) => return Err(reason.into()),
        Err(TokenCallError::Reverted(None)) => return Err(failed()),
        Err(TokenCallError::Halted(halt)) => return Err(halt.into()),
    };

    if call_succeeded(&returned, || ledger.has_code(token)) {
        Ok(())
    } else {
        tracing::debug!(%token, %to, %amount, "token signalled failure without reverting");
        Err(failed())
    }
}

fn call_succeeded(returned: &ReturnData, token_has_code: impl FnOnce() -> bool) -> bool {
    if returned.is_empty() {
        token_has_code()
    } else {
        returned.decode_bool() == Some(true)
    }
}
