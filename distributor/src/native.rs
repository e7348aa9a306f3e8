//! Native-currency distribution with refund of the unspent remainder.

use distributor_host::NativeLedger;
use distributor_types::{Address, Amount, Batch};

use crate::distributor::Distribution;
use crate::error::DistributorError;

/// Pay every recipient from `distributor`'s balance, in batch order, then
/// return `value - total` to `caller`.
///
/// `value` must already sit in `distributor`'s balance. Sufficiency is never
/// checked up front: an overdrawn payment is rejected by the ledger like any
/// other failed transfer.
pub(crate) fn distribute<L>(
    ledger: &mut L,
    distributor: &Address,
    caller: &Address,
    value: Amount,
    batch: Batch,
) -> Result<Distribution, DistributorError>
where
    L: NativeLedger + ?Sized,
{
    let transfer_failed = || DistributorError::EtherTransferFail {
        distributor: *distributor,
    };
    let total = batch
        .total()
        .map_err(|_| DistributorError::ArithmeticOverflow)?;
    let transfers = batch.len();

    for txn in batch {
        let outcome = ledger.transfer_value(distributor, &txn.recipient, txn.amount)?;
        if !outcome.is_delivered() {
            tracing::debug!(recipient = %txn.recipient, amount = %txn.amount, "payment rejected");
            return Err(transfer_failed());
        }
    }

    // Payments can be funded by a balance the distributor held before the
    // call; the batch still may not spend more than `value`.
    let leftover = value.checked_sub(total).ok_or_else(transfer_failed)?;
    if !leftover.is_zero() {
        let outcome = ledger.transfer_value(distributor, caller, leftover)?;
        if !outcome.is_delivered() {
            tracing::debug!(%caller, %leftover, "refund rejected");
            return Err(transfer_failed());
        }
    }

    Ok(Distribution {
        transfers,
        distributed: total,
        refunded: leftover,
    })
}
