//! Errors surfaced by the chained tables.

use thiserror::Error;

/// Failure of a table operation.
///
/// Absence and duplication are not errors: lookups report them through
/// `Option`/`bool`. These variants are the conditions that abort a call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// A computed bucket index fell outside the bucket array.
    #[error("bucket index {index} out of range for capacity {capacity}")]
    IndexOutOfRange { index: usize, capacity: usize },
    /// A set was handed something other than a string.
    #[error("set values must be strings, got `{found}`")]
    InvalidType { found: &'static str },
    /// Construction parameters were rejected.
    #[error("invalid table configuration: {0}")]
    InvalidConfig(String),
}

pub type TableResult<T> = Result<T, TableError>;
