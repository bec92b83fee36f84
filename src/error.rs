use thiserror::Error;

/// Failures surfaced by `ChainedHashMap` operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    #[error("invalid table configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("key and value sequences differ in length ({keys} keys, {values} values)")]
    LengthMismatch { keys: usize, values: usize },
    #[error("key not found in table")]
    KeyNotFound,
    #[error("failed to allocate a bucket array of {buckets} buckets")]
    AllocationFailure { buckets: usize },
}

pub type Result<T, E = TableError> = std::result::Result<T, E>;
