//! Errors in the library.
use thiserror::Error;

/// Errors in the library.
#[derive(Error, Debug)]
pub enum FledgeError {
    /// An argument violating a method's contract, like a batch size
    /// exceeding the number of stored transitions.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
