//! Metered execution budget.
//!
//! The effective batch-size limit is whatever fits in the budget: there is no
//! recipient-count constant anywhere. The schedule is plain data so it can be
//! loaded from configuration and tuned per host.

use serde::{Deserialize, Serialize};

use crate::error::{ExecutionHalt, HostError};

/// Gas costs charged by a host for the primitives the distributor uses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasSchedule {
    /// Default budget for one invocation when the caller does not set one.
    #[serde(default = "default_gas_limit")]
    pub gas_limit: u64,

    /// Flat cost of starting an invocation.
    #[serde(default = "default_base")]
    pub base: u64,

    /// Call-data cost per batch entry (recipient word + amount word).
    #[serde(default = "default_per_entry_calldata")]
    pub per_entry_calldata: u64,

    /// Cost of any outbound call, value-bearing or not.
    #[serde(default = "default_call")]
    pub call: u64,

    /// Surcharge for a call carrying non-zero value.
    #[serde(default = "default_value_transfer")]
    pub value_transfer: u64,

    /// Surcharge when a value transfer brings a new account into existence.
    #[serde(default = "default_new_account")]
    pub new_account: u64,

    /// Cost of one token `transferFrom` call.
    #[serde(default = "default_token_call")]
    pub token_call: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_gas_limit() -> u64 {
    30_000_000
}

fn default_base() -> u64 {
    21_000
}

fn default_per_entry_calldata() -> u64 {
    // two 32-byte words at 16 gas per non-zero byte
    1_024
}

fn default_call() -> u64 {
    2_600
}

fn default_value_transfer() -> u64 {
    9_000
}

fn default_new_account() -> u64 {
    25_000
}

fn default_token_call() -> u64 {
    30_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GasSchedule {
    /// Cost charged before execution starts for a batch of `entries`.
    pub fn intrinsic_cost(&self, entries: usize) -> u64 {
        let entries = u64::try_from(entries).unwrap_or(u64::MAX);
        self.base
            .saturating_add(self.per_entry_calldata.saturating_mul(entries))
    }

    /// Cost of one native value transfer.
    pub fn value_transfer_cost(&self, zero_amount: bool, creates_account: bool) -> u64 {
        if zero_amount {
            return self.call;
        }
        let cost = self.call.saturating_add(self.value_transfer);
        if creates_account {
            cost.saturating_add(self.new_account)
        } else {
            cost
        }
    }

    /// Reject a gas limit that cannot even cover the intrinsic cost.
    pub fn check_intrinsic(&self, entries: usize, gas_limit: u64) -> Result<u64, HostError> {
        let required = self.intrinsic_cost(entries);
        if gas_limit < required {
            return Err(HostError::IntrinsicGas {
                required,
                provided: gas_limit,
            });
        }
        Ok(required)
    }
}

impl Default for GasSchedule {
    fn default() -> Self {
        Self {
            gas_limit: default_gas_limit(),
            base: default_base(),
            per_entry_calldata: default_per_entry_calldata(),
            call: default_call(),
            value_transfer: default_value_transfer(),
            new_account: default_new_account(),
            token_call: default_token_call(),
        }
    }
}

/// Running gas account for one invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GasMeter {
    limit: u64,
    used: u64,
}

impl GasMeter {
    pub fn new(limit: u64) -> Self {
        Self { limit, used: 0 }
    }

    /// A meter that never runs out. For hosts that do not meter.
    pub fn unlimited() -> Self {
        Self::new(u64::MAX)
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn remaining(&self) -> u64 {
        self.limit - self.used
    }

    /// Charge `cost`. On exhaustion the whole budget is consumed.
    pub fn charge(&mut self, cost: u64) -> Result<(), ExecutionHalt> {
        let needed = self.used.saturating_add(cost);
        if needed > self.limit {
            self.used = self.limit;
            return Err(ExecutionHalt::OutOfGas {
                limit: self.limit,
                needed,
            });
        }
        self.used = needed;
        Ok(())
    }
}

impl Default for GasMeter {
    fn default() -> Self {
        Self::unlimited()
    }
}

/// A host that meters execution.
pub trait Metered {
    fn gas_schedule(&self) -> &GasSchedule;
    fn meter(&self) -> &GasMeter;
    fn meter_mut(&mut self) -> &mut GasMeter;

    /// Start a fresh budget for the next invocation.
    fn start_metering(&mut self, limit: u64) {
        *self.meter_mut() = GasMeter::new(limit);
    }
}
