//! Invocation entry point.

use serde::{Deserialize, Serialize};

use distributor_host::{run_atomic, Host, NativeLedger, TokenLedger};
use distributor_types::{Address, Amount, Batch};

use crate::error::DistributorError;
use crate::tracing_spans::invocation_span;
use crate::{native, token};

/// One call into the distributor.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    /// Payable: the attached value funds the batch, the remainder is refunded.
    DistributeEther { batch: Batch },
    /// Non-payable: amounts are pulled from the caller's token allowance.
    DistributeToken { token: Address, batch: Batch },
}

impl Call {
    /// Entry-point name as it appears in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::DistributeEther { .. } => "distributeEther",
            Self::DistributeToken { .. } => "distributeToken",
        }
    }

    /// The batch this call distributes.
    pub fn batch(&self) -> &Batch {
        match self {
            Self::DistributeEther { batch } | Self::DistributeToken { batch, .. } => batch,
        }
    }
}

/// A call plus the envelope the host executes it in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    pub caller: Address,
    /// Native value attached to the call.
    pub value: Amount,
    /// Execution budget. `None` uses the host schedule's default.
    pub gas_limit: Option<u64>,
    pub call: Call,
}

impl Invocation {
    pub fn distribute_ether(caller: Address, value: Amount, batch: Batch) -> Self {
        Self {
            caller,
            value,
            gas_limit: None,
            call: Call::DistributeEther { batch },
        }
    }

    pub fn distribute_token(caller: Address, token: Address, batch: Batch) -> Self {
        Self {
            caller,
            value: Amount::ZERO,
            gas_limit: None,
            call: Call::DistributeToken { token, batch },
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(gas_limit);
        self
    }

    pub fn with_value(mut self, value: Amount) -> Self {
        self.value = value;
        self
    }
}

/// What a successful distribution moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Number of batch entries processed.
    pub transfers: usize,
    /// Sum of all batch amounts.
    pub distributed: Amount,
    /// Native value returned to the caller.
    pub refunded: Amount,
}

/// Diagnostics for a committed invocation. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub gas_used: u64,
    #[serde(flatten)]
    pub distribution: Distribution,
}

/// The batch distributor deployed at `address`.
///
/// Holds nothing but its own address. There is no balance cache, counter, or
/// lock to corrupt: a recipient that calls back in mid-batch runs against the
/// same stateless routine under the same rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatchDistributor {
    address: Address,
}

impl BatchDistributor {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    /// Run `invocation` on `host` as one atomic unit.
    ///
    /// The gas limit is checked against the intrinsic cost before anything
    /// happens. After that, any failure reverts every effect of the
    /// invocation, including the attached value moving in.
    pub fn execute<H: Host>(
        &self,
        host: &mut H,
        invocation: Invocation,
    ) -> Result<Receipt, DistributorError> {
        let Invocation {
            caller,
            value,
            gas_limit,
            call,
        } = invocation;
        let span = invocation_span(call.name(), &caller, call.batch().len());
        let _enter = span.enter();

        let gas_limit = gas_limit.unwrap_or(host.gas_schedule().gas_limit);
        let intrinsic = host
            .gas_schedule()
            .check_intrinsic(call.batch().len(), gas_limit)?;
        if matches!(call, Call::DistributeToken { .. }) && !value.is_zero() {
            return Err(DistributorError::NonPayable { value });
        }

        host.start_metering(gas_limit);
        host.meter_mut().charge(intrinsic)?;

        let result = run_atomic(host, |host| {
            host.attach_value(&caller, &self.address, value)?;
            match call {
                Call::DistributeEther { batch } => self.distribute_ether(host, &caller, value, batch),
                Call::DistributeToken { token, batch } => {
                    self.distribute_token(host, &caller, &token, batch)
                }
            }
        });
        let gas_used = host.meter().used();

        match result {
            Ok(distribution) => {
                tracing::info!(
                    gas_used,
                    transfers = distribution.transfers,
                    distributed = %distribution.distributed,
                    refunded = %distribution.refunded,
                    "distribution committed"
                );
                Ok(Receipt {
                    gas_used,
                    distribution,
                })
            }
            Err(e) => {
                tracing::warn!(gas_used, error = %e, "distribution reverted");
                Err(e)
            }
        }
    }

    /// `distributeEther` body. Expects `value` to be attached already and an
    /// atomic boundary to be open around the call.
    pub fn distribute_ether<L>(
        &self,
        ledger: &mut L,
        caller: &Address,
        value: Amount,
        batch: Batch,
    ) -> Result<Distribution, DistributorError>
    where
        L: NativeLedger + ?Sized,
    {
        native::distribute(ledger, &self.address, caller, value, batch)
    }

    /// `distributeToken` body. Expects an atomic boundary to be open around
    /// the call.
    pub fn distribute_token<L>(
        &self,
        ledger: &mut L,
        caller: &Address,
        token: &Address,
        batch: Batch,
    ) -> Result<Distribution, DistributorError>
    where
        L: TokenLedger + ?Sized,
    {
        token::distribute(ledger, &self.address, caller, token, batch)
    }
}
