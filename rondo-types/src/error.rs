//! Result codes and the error type carried by failed queries.

use std::collections::TryReserveError;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The three outcomes a control query can report to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResultCode {
    Success,
    /// Expected, recoverable failure: not found, out of bounds, invalid input, empty.
    Generic,
    /// The request could not be serviced because an allocation failed.
    OutOfMemory,
}

/// Why a query failed. Every variant maps onto a [`ResultCode`]; the extra
/// context is for logs and callers that want it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ControlError {
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },

    #[error("{0} not found")]
    NotFound(String),

    /// An empty collection where the query's contract requires entries.
    #[error("no {0}")]
    Empty(&'static str),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The variable store refused the value.
    #[error("variable '{0}' rejected value")]
    Rejected(String),

    #[error("unknown query {0:#x}")]
    UnknownQuery(u32),

    #[error("query {code:#x}: {reason}")]
    BadArguments { code: u32, reason: String },

    #[error("control queue full")]
    QueueFull,

    #[error("control queue disconnected")]
    Disconnected,

    #[error("out of memory")]
    OutOfMemory,
}

impl ControlError {
    pub fn code(&self) -> ResultCode {
        match self {
            ControlError::OutOfMemory => ResultCode::OutOfMemory,
            _ => ResultCode::Generic,
        }
    }
}

impl From<TryReserveError> for ControlError {
    fn from(_: TryReserveError) -> Self {
        ControlError::OutOfMemory
    }
}

impl<T> From<&Result<T, ControlError>> for ResultCode {
    fn from(result: &Result<T, ControlError>) -> Self {
        match result {
            Ok(_) => ResultCode::Success,
            Err(e) => e.code(),
        }
    }
}
