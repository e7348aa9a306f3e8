//! Abstract host-ledger capabilities for the batch distributor.
//!
//! The distributor never touches ledger internals. It sees only the narrow
//! primitives defined here: a native value transfer with an outcome, a token
//! pull-transfer with raw return data, a gas meter, and a checkpoint journal
//! that gives each invocation its all-or-nothing boundary. Every host (a real
//! chain adapter, the in-memory nullable ledger used in tests) implements
//! these traits; the rest of the codebase depends only on the traits.

pub mod atomic;
pub mod error;
pub mod gas;
pub mod ledger;

pub use atomic::{run_atomic, Journaled};
pub use error::{ExecutionHalt, HostError, TokenCallError, TokenRevert};
pub use gas::{GasMeter, GasSchedule, Metered};
pub use ledger::{NativeLedger, ReturnData, TokenLedger, TransferOutcome};

/// Everything a distribution invocation needs from its host.
pub trait Host: NativeLedger + TokenLedger + Journaled + Metered {}

impl<T: NativeLedger + TokenLedger + Journaled + Metered> Host for T {}
