//! Shared utilities for the distributor binaries.

pub mod logging;

pub use logging::{init_logging, LogFormat, UnknownLogFormat};
