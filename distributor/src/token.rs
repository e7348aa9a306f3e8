//! Allowance-based token distribution.

use distributor_host::TokenLedger;
use distributor_types::{Address, Amount, Batch};

use crate::distributor::Distribution;
use crate::error::DistributorError;
use crate::safe_transfer::safe_transfer_from;

/// Pull each amount from `caller`'s allowance to `distributor` straight to
/// its recipient.
///
/// The allowance is consumed by the token itself, one transfer at a time;
/// nothing here inspects it beforehand or treats a `MAX` allowance specially.
pub(crate) fn distribute<L>(
    ledger: &mut L,
    distributor: &Address,
    caller: &Address,
    token: &Address,
    batch: Batch,
) -> Result<Distribution, DistributorError>
where
    L: TokenLedger + ?Sized,
{
    let total = batch
        .total()
        .map_err(|_| DistributorError::ArithmeticOverflow)?;
    let transfers = batch.len();
    tracing::debug!(%token, %total, transfers, "pulling from allowance");

    for txn in batch {
        safe_transfer_from(ledger, token, distributor, caller, &txn.recipient, txn.amount)?;
    }

    Ok(Distribution {
        transfers,
        distributed: total,
        refunded: Amount::ZERO,
    })
}
