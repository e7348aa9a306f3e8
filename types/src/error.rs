//! Errors raised while building or inspecting distribution values.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypesError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount out of 256-bit range: {0}")]
    OutOfRange(String),

    #[error("arithmetic overflow while summing batch amounts")]
    Overflow,
}
